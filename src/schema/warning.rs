//! Non-fatal compilation warnings
//!
//! Warnings are advisory signals raised while compiling a schema. They
//! never interrupt compilation: they are collected on the compiled
//! schema, handed to the caller's [`WarningHandler`](super::WarningHandler)
//! when one is registered, and logged via `tracing::warn!`.

use std::fmt;

/// A non-fatal condition noticed during schema compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaWarning {
    /// `sortable` was requested for a `string` field under the JSON
    /// structure. RediSearch rejects SORTABLE on a TAG field for JSON,
    /// so the token is omitted from the compiled output.
    SortableTagIgnored {
        /// Logical path of the offending field
        field: String,
    },
}

impl SchemaWarning {
    /// Logical path of the field that triggered the warning
    pub fn field(&self) -> &str {
        match self {
            SchemaWarning::SortableTagIgnored { field } => field,
        }
    }
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaWarning::SortableTagIgnored { .. } => f.write_str(
                "You have marked a string field as sortable but RediSearch doesn't support the SORTABLE argument on a TAG for JSON. Ignored.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sortable_tag_message_is_exact() {
        let w = SchemaWarning::SortableTagIgnored {
            field: "aString".to_string(),
        };
        assert_eq!(
            w.to_string(),
            "You have marked a string field as sortable but RediSearch doesn't support the SORTABLE argument on a TAG for JSON. Ignored."
        );
        assert_eq!(w.field(), "aString");
    }
}
