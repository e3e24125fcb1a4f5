//! Schema compilation error types
//!
//! All schema errors are fatal at compile time and never retried.

use crate::schema::{DataStructure, FieldType};
use thiserror::Error;

/// Errors raised while compiling a schema
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema was given an empty name
    #[error("Invalid schema: schema name must not be empty")]
    EmptySchemaName,

    /// A field was declared with an empty name
    #[error("Invalid schema: field names must not be empty")]
    EmptyFieldName,

    /// Two fields resolved to the same logical path
    #[error("Invalid schema: duplicate field '{0}'")]
    DuplicateField(String),

    /// The key prefix override was an empty string
    #[error("Invalid schema: prefix must not be an empty string")]
    EmptyPrefix,

    /// The index name override was an empty string
    #[error("Invalid schema: index name must not be an empty string")]
    EmptyIndexName,

    /// The fingerprint key override was an empty string
    #[error("Invalid schema: index hash name must not be an empty string")]
    EmptyIndexHashName,

    /// An object or array field declared no properties
    #[error("Invalid schema: field '{field}' of type {field_type} declares no properties")]
    MissingProperties {
        field: String,
        field_type: FieldType,
    },

    /// A tuple field declared no elements
    #[error("Invalid schema: tuple field '{field}' declares no elements")]
    MissingElements { field: String },

    /// A vector field carried no vector parameters
    #[error("Invalid schema: vector field '{field}' declares no vector parameters")]
    MissingVectorParams { field: String },

    /// The field type cannot be stored under the requested structure
    #[error(
        "Invalid schema: field '{field}' of type {field_type} is not supported under the {structure} structure"
    )]
    UnsupportedInStructure {
        field: String,
        field_type: FieldType,
        structure: DataStructure,
    },

    /// A custom stop-word list was requested but no words were given
    #[error("Invalid schema: custom stop words requested but the list is empty")]
    EmptyStopWords,
}

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::DuplicateField("aString".to_string());
        assert_eq!(err.to_string(), "Invalid schema: duplicate field 'aString'");

        let err = SchemaError::UnsupportedInStructure {
            field: "embedding".to_string(),
            field_type: FieldType::Vector,
            structure: DataStructure::Hash,
        };
        assert_eq!(
            err.to_string(),
            "Invalid schema: field 'embedding' of type vector is not supported under the HASH structure"
        );
    }
}
