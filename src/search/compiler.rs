//! Query-string compiler
//!
//! Translates a sequence of [`QueryTerm`]s into RediSearch query syntax,
//! using the compiled schema to resolve field paths to index attributes
//! and to pick the right fragment shape per field type:
//!
//! - TAG fields: `@field:{escaped_value}`
//! - TEXT fields: `@field:(term)` (no tag escaping; stemming applies)
//! - NUMERIC fields (numbers and dates): `@field:[min max]` with
//!   `-inf`/`+inf` open bounds and `(` exclusive bounds
//! - Boolean TAG fields: `@field:{1}` / `@field:{0}`
//!
//! Terms join with a literal space (AND) or a parenthesized `|` (OR),
//! left-associatively so precedence is preserved. No terms compiles to the
//! match-all query `*`. Compilation is stateless and deterministic.

use crate::entity::Value;
use crate::search::{escape_tag, Join, QueryOp, QueryTerm, SearchError, SearchResult};
use crate::schema::{CompiledField, CompiledSchema, FieldType};

/// Compile predicate terms into a RediSearch query string
///
/// # Errors
///
/// [`SearchError::FieldNotInSchema`] for unknown field paths,
/// [`SearchError::UnsupportedOperation`] when the operator doesn't apply
/// to the field's type, [`SearchError::InvalidOperand`] when the operand's
/// type doesn't fit.
pub fn compile_query(terms: &[QueryTerm], schema: &CompiledSchema) -> SearchResult<String> {
    if terms.is_empty() {
        return Ok("*".to_string());
    }

    let mut query: Option<String> = None;
    for term in terms {
        let field = schema
            .field(&term.field)
            .ok_or_else(|| SearchError::FieldNotInSchema(term.field.clone()))?;
        let fragment = compile_term(term, field)?;
        query = Some(match query {
            None => fragment,
            Some(acc) => match term.join {
                Join::And => format!("{acc} {fragment}"),
                Join::Or => format!("( {acc} | {fragment} )"),
            },
        });
    }
    // The loop always produces at least one fragment.
    Ok(query.unwrap_or_else(|| "*".to_string()))
}

fn compile_term(term: &QueryTerm, field: &CompiledField) -> SearchResult<String> {
    let attribute = field.search_alias();
    let unsupported = || SearchError::UnsupportedOperation {
        field: term.field.clone(),
        op: term.op.as_str(),
        field_type: field.field_type(),
    };

    match term.op {
        QueryOp::Eq | QueryOp::Contains => match field.field_type() {
            FieldType::String | FieldType::StringArray => {
                let value = tag_operand(term)?;
                Ok(format!("@{attribute}:{{{}}}", escape_tag(&value)))
            }
            FieldType::Text if term.op == QueryOp::Eq => {
                let value = text_operand(term)?;
                Ok(format!("@{attribute}:({value})"))
            }
            FieldType::Number | FieldType::Date if term.op == QueryOp::Eq => {
                let n = numeric_operand(term)?;
                Ok(format!("@{attribute}:[{n} {n}]"))
            }
            FieldType::Boolean if term.op == QueryOp::Eq => match term.operand {
                Some(Value::Bool(true)) => Ok(format!("@{attribute}:{{1}}")),
                Some(Value::Bool(false)) => Ok(format!("@{attribute}:{{0}}")),
                _ => Err(SearchError::InvalidOperand {
                    field: term.field.clone(),
                    expected: "boolean",
                }),
            },
            _ => Err(unsupported()),
        },
        QueryOp::Matches => match field.field_type() {
            FieldType::Text => {
                let value = text_operand(term)?;
                Ok(format!("@{attribute}:({value})"))
            }
            _ => Err(unsupported()),
        },
        QueryOp::True | QueryOp::False => match field.field_type() {
            FieldType::Boolean => {
                let bit = if term.op == QueryOp::True { "1" } else { "0" };
                Ok(format!("@{attribute}:{{{bit}}}"))
            }
            _ => Err(unsupported()),
        },
        QueryOp::Lt | QueryOp::Lte | QueryOp::Gt | QueryOp::Gte => match field.field_type() {
            FieldType::Number | FieldType::Date => {
                let n = numeric_operand(term)?;
                Ok(match term.op {
                    QueryOp::Lt => format!("@{attribute}:[-inf ({n}]"),
                    QueryOp::Lte => format!("@{attribute}:[-inf {n}]"),
                    QueryOp::Gt => format!("@{attribute}:[({n} +inf]"),
                    _ => format!("@{attribute}:[{n} +inf]"),
                })
            }
            _ => Err(unsupported()),
        },
    }
}

/// Operand for a TAG fragment: a string, or a scalar stringified the way
/// the hash codec stores it
fn tag_operand(term: &QueryTerm) -> SearchResult<String> {
    match &term.operand {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(format!("{n}")),
        _ => Err(SearchError::InvalidOperand {
            field: term.field.clone(),
            expected: "string",
        }),
    }
}

fn text_operand(term: &QueryTerm) -> SearchResult<String> {
    match &term.operand {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(SearchError::InvalidOperand {
            field: term.field.clone(),
            expected: "string",
        }),
    }
}

/// Operand for a NUMERIC fragment; dates compare as epoch milliseconds
fn numeric_operand(term: &QueryTerm) -> SearchResult<String> {
    match &term.operand {
        Some(Value::Number(n)) => Ok(format!("{n}")),
        Some(Value::Date(d)) => Ok(d.timestamp_millis().to_string()),
        _ => Err(SearchError::InvalidOperand {
            field: term.field.clone(),
            expected: "number or date",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{compile, FieldDefinition, SchemaOptions};
    use chrono::{TimeZone, Utc};

    fn schema() -> CompiledSchema {
        compile(
            "thing",
            vec![
                ("aString".to_string(), FieldDefinition::string()),
                ("aText".to_string(), FieldDefinition::text()),
                ("aNumber".to_string(), FieldDefinition::number()),
                ("aBoolean".to_string(), FieldDefinition::boolean()),
                ("aDate".to_string(), FieldDefinition::date()),
                ("anArray".to_string(), FieldDefinition::string_array()),
                (
                    "addr".to_string(),
                    FieldDefinition::object(vec![("city", FieldDefinition::string())]),
                ),
            ],
            SchemaOptions::hash(),
        )
        .unwrap()
    }

    #[test]
    fn test_no_terms_compiles_to_wildcard() {
        assert_eq!(compile_query(&[], &schema()).unwrap(), "*");
    }

    #[test]
    fn test_string_equality() {
        let q = compile_query(&[QueryTerm::eq("aString", "foo")], &schema()).unwrap();
        assert_eq!(q, "@aString:{foo}");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let q = compile_query(&[QueryTerm::eq("aString", "foo,bar baz")], &schema()).unwrap();
        assert_eq!(q, "@aString:{foo\\,bar\\ baz}");

        let q = compile_query(
            &[QueryTerm::eq("aString", "a.b|c@d!e(f)g")],
            &schema(),
        )
        .unwrap();
        assert_eq!(q, "@aString:{a\\.b\\|c\\@d\\!e\\(f\\)g}");
    }

    #[test]
    fn test_text_match_is_not_tag_escaped() {
        let q = compile_query(&[QueryTerm::matches("aText", "quick brown")], &schema()).unwrap();
        assert_eq!(q, "@aText:(quick brown)");
    }

    #[test]
    fn test_numeric_ranges() {
        let s = schema();
        assert_eq!(
            compile_query(&[QueryTerm::lte("aNumber", 23i64)], &s).unwrap(),
            "@aNumber:[-inf 23]"
        );
        assert_eq!(
            compile_query(&[QueryTerm::lt("aNumber", 23i64)], &s).unwrap(),
            "@aNumber:[-inf (23]"
        );
        assert_eq!(
            compile_query(&[QueryTerm::gte("aNumber", 23i64)], &s).unwrap(),
            "@aNumber:[23 +inf]"
        );
        assert_eq!(
            compile_query(&[QueryTerm::gt("aNumber", 23i64)], &s).unwrap(),
            "@aNumber:[(23 +inf]"
        );
        assert_eq!(
            compile_query(&[QueryTerm::eq("aNumber", 23i64)], &s).unwrap(),
            "@aNumber:[23 23]"
        );
    }

    #[test]
    fn test_date_ranges_use_epoch_millis() {
        let date = Utc.timestamp_millis_opt(1_640_995_200_000).unwrap();
        let q = compile_query(&[QueryTerm::gt("aDate", date)], &schema()).unwrap();
        assert_eq!(q, "@aDate:[(1640995200000 +inf]");
    }

    #[test]
    fn test_booleans() {
        let s = schema();
        assert_eq!(
            compile_query(&[QueryTerm::is_true("aBoolean")], &s).unwrap(),
            "@aBoolean:{1}"
        );
        assert_eq!(
            compile_query(&[QueryTerm::is_false("aBoolean")], &s).unwrap(),
            "@aBoolean:{0}"
        );
        assert_eq!(
            compile_query(&[QueryTerm::eq("aBoolean", false)], &s).unwrap(),
            "@aBoolean:{0}"
        );
    }

    #[test]
    fn test_array_containment() {
        let q = compile_query(&[QueryTerm::contains("anArray", "alfa")], &schema()).unwrap();
        assert_eq!(q, "@anArray:{alfa}");
    }

    #[test]
    fn test_and_joins_with_space() {
        let q = compile_query(
            &[
                QueryTerm::eq("aString", "foo"),
                QueryTerm::lte("aNumber", 23i64),
            ],
            &schema(),
        )
        .unwrap();
        assert_eq!(q, "@aString:{foo} @aNumber:[-inf 23]");
    }

    #[test]
    fn test_or_joins_with_parentheses() {
        let q = compile_query(
            &[
                QueryTerm::eq("aString", "foo"),
                QueryTerm::eq("aString", "bar").or(),
            ],
            &schema(),
        )
        .unwrap();
        assert_eq!(q, "( @aString:{foo} | @aString:{bar} )");
    }

    #[test]
    fn test_mixed_joins_are_left_associative() {
        let q = compile_query(
            &[
                QueryTerm::eq("aString", "foo"),
                QueryTerm::eq("aString", "bar").or(),
                QueryTerm::is_true("aBoolean"),
            ],
            &schema(),
        )
        .unwrap();
        assert_eq!(q, "( @aString:{foo} | @aString:{bar} ) @aBoolean:{1}");
    }

    #[test]
    fn test_nested_fields_use_compiled_alias() {
        let q = compile_query(&[QueryTerm::eq("addr.city", "berlin")], &schema()).unwrap();
        assert_eq!(q, "@addr_city:{berlin}");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = compile_query(&[QueryTerm::eq("nope", "x")], &schema()).unwrap_err();
        assert!(matches!(err, SearchError::FieldNotInSchema(f) if f == "nope"));
    }

    #[test]
    fn test_type_mismatches_are_rejected() {
        let s = schema();
        assert!(matches!(
            compile_query(&[QueryTerm::matches("aString", "foo")], &s).unwrap_err(),
            SearchError::UnsupportedOperation { .. }
        ));
        assert!(matches!(
            compile_query(&[QueryTerm::is_true("aNumber")], &s).unwrap_err(),
            SearchError::UnsupportedOperation { .. }
        ));
        assert!(matches!(
            compile_query(&[QueryTerm::lt("aString", 1i64)], &s).unwrap_err(),
            SearchError::UnsupportedOperation { .. }
        ));
        assert!(matches!(
            compile_query(&[QueryTerm::eq("aNumber", "x")], &s).unwrap_err(),
            SearchError::InvalidOperand { .. }
        ));
    }
}
