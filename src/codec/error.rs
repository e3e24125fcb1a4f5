//! Codec error types
//!
//! Encode errors (`*Input`) mean the caller handed the codec a value that
//! doesn't match the field's declared type; decode errors (`*Value`) mean
//! the stored data doesn't — external corruption or schema drift. All are
//! raised synchronously and never retried here.

use thiserror::Error;

/// Errors that can occur while encoding or decoding entities
#[derive(Error, Debug)]
pub enum CodecError {
    /// Entity value doesn't match the declared type (HASH encode)
    #[error("Invalid hash input: field '{field}' expected {expected}, got {actual}")]
    InvalidHashInput {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Stored hash value can't be parsed as the declared type
    #[error("Invalid hash value: field '{field}' expected {expected}, got '{value}'")]
    InvalidHashValue {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// Entity value doesn't match the declared type (JSON encode)
    #[error("Invalid JSON input: field '{field}' expected {expected}, got {actual}")]
    InvalidJsonInput {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Stored JSON value doesn't match the declared type
    #[error("Invalid JSON value: field '{field}' expected {expected} at {path}")]
    InvalidJsonValue {
        field: String,
        expected: &'static str,
        path: String,
    },

    /// Geo coordinate outside the range GEO fields accept
    #[error(
        "Point out of range: field '{field}' ({longitude}, {latitude}) exceeds \
         ±180 longitude / ±85.05112878 latitude"
    )]
    PointOutOfRange {
        field: String,
        longitude: f64,
        latitude: f64,
    },
}

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::InvalidHashValue {
            field: "aNumber".to_string(),
            expected: "number",
            value: "forty-two".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid hash value: field 'aNumber' expected number, got 'forty-two'"
        );

        let err = CodecError::InvalidJsonValue {
            field: "addr.city".to_string(),
            expected: "string",
            path: "$.addr.city".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid JSON value: field 'addr.city' expected string at $.addr.city"
        );
    }
}
