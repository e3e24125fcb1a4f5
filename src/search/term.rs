//! Query term model
//!
//! A query is an ordered sequence of [`QueryTerm`]s, each naming a logical
//! field path, a predicate operator, an optional operand, and how the term
//! joins the preceding ones (AND by default). The fluent builder that
//! produces these sequences lives outside this crate; only the compiled
//! query-string contract is covered here.

use crate::entity::Value;
use serde::{Deserialize, Serialize};

/// Predicate operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryOp {
    /// Exact equality (TAG fields, NUMERIC point ranges)
    Eq,
    /// Full-text match (TEXT fields; stemming applies)
    Matches,
    /// Boolean is true
    True,
    /// Boolean is false
    False,
    /// Strictly less than
    Lt,
    /// Less than or equal
    Lte,
    /// Strictly greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Array contains the value
    Contains,
}

impl QueryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOp::Eq => "eq",
            QueryOp::Matches => "matches",
            QueryOp::True => "true",
            QueryOp::False => "false",
            QueryOp::Lt => "lt",
            QueryOp::Lte => "lte",
            QueryOp::Gt => "gt",
            QueryOp::Gte => "gte",
            QueryOp::Contains => "contains",
        }
    }
}

/// How a term combines with the terms before it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Join {
    /// Both sides must match (space-joined)
    #[default]
    And,
    /// Either side may match (parenthesized `|`)
    Or,
}

/// One predicate in a query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTerm {
    /// Logical field path, as declared in the schema
    pub field: String,
    pub op: QueryOp,
    /// Operand; absent for `True`/`False`
    pub operand: Option<Value>,
    pub join: Join,
}

impl QueryTerm {
    fn new(field: impl Into<String>, op: QueryOp, operand: Option<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            operand,
            join: Join::And,
        }
    }

    /// `field == value`
    pub fn eq(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, QueryOp::Eq, Some(operand.into()))
    }

    /// Full-text match against a TEXT field
    pub fn matches(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, QueryOp::Matches, Some(operand.into()))
    }

    /// Boolean field is true
    pub fn is_true(field: impl Into<String>) -> Self {
        Self::new(field, QueryOp::True, None)
    }

    /// Boolean field is false
    pub fn is_false(field: impl Into<String>) -> Self {
        Self::new(field, QueryOp::False, None)
    }

    /// `field < value`
    pub fn lt(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, QueryOp::Lt, Some(operand.into()))
    }

    /// `field <= value`
    pub fn lte(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, QueryOp::Lte, Some(operand.into()))
    }

    /// `field > value`
    pub fn gt(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, QueryOp::Gt, Some(operand.into()))
    }

    /// `field >= value`
    pub fn gte(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, QueryOp::Gte, Some(operand.into()))
    }

    /// Array field contains the value
    pub fn contains(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, QueryOp::Contains, Some(operand.into()))
    }

    /// Join this term to the preceding ones with OR instead of AND
    pub fn or(mut self) -> Self {
        self.join = Join::Or;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let term = QueryTerm::eq("name", "alice");
        assert_eq!(term.field, "name");
        assert_eq!(term.op, QueryOp::Eq);
        assert_eq!(term.operand, Some(Value::String("alice".to_string())));
        assert_eq!(term.join, Join::And);

        let term = QueryTerm::is_true("active");
        assert!(term.operand.is_none());
    }

    #[test]
    fn test_or_marks_join() {
        let term = QueryTerm::lte("age", 23i64).or();
        assert_eq!(term.join, Join::Or);
    }
}
