//! Query compilation error types

use crate::schema::FieldType;
use thiserror::Error;

/// Errors that can occur while compiling a query
#[derive(Error, Debug)]
pub enum SearchError {
    /// The query referenced a field the schema doesn't declare
    #[error("Field not in schema: '{0}'")]
    FieldNotInSchema(String),

    /// The operator doesn't apply to the field's type
    #[error("Unsupported operation: '{op}' on field '{field}' of type {field_type}")]
    UnsupportedOperation {
        field: String,
        op: &'static str,
        field_type: FieldType,
    },

    /// The operand's type doesn't fit the operator/field combination
    #[error("Invalid operand for field '{field}': expected {expected}")]
    InvalidOperand {
        field: String,
        expected: &'static str,
    },
}

/// Result type alias for query compilation
pub type SearchResult<T> = Result<T, SearchError>;
