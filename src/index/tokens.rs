//! Index definition token emission
//!
//! Produces the literal argument vector for `FT.CREATE`, one token per
//! element. Token order is part of the wire contract: the repository layer
//! compares these arguments (via the fingerprint) against a previously
//! created index to decide whether it is stale, and RediSearch itself is
//! picky about argument order.

use crate::schema::{
    CompiledField, CompiledSchema, DataStructure, FieldType, StopWordsMode, VectorAlgorithm,
    VectorParams,
};

/// Full argument vector for `FT.CREATE`, starting with the index name
///
/// Layout: `<index> ON <HASH|JSON> PREFIX 1 <prefix>: [STOPWORDS ...]
/// SCHEMA <field tokens>...`
pub fn index_definition_tokens(schema: &CompiledSchema) -> Vec<String> {
    let mut tokens = vec![
        schema.index_name().to_string(),
        "ON".to_string(),
        schema.data_structure().as_str().to_string(),
        "PREFIX".to_string(),
        "1".to_string(),
        format!("{}:", schema.prefix()),
    ];

    match schema.stop_words_mode {
        StopWordsMode::Default => {}
        StopWordsMode::Off => {
            tokens.push("STOPWORDS".to_string());
            tokens.push("0".to_string());
        }
        StopWordsMode::Custom => {
            tokens.push("STOPWORDS".to_string());
            tokens.push(schema.stop_words.len().to_string());
            tokens.extend(schema.stop_words.iter().cloned());
        }
    }

    tokens.push("SCHEMA".to_string());
    for field in schema.fields() {
        tokens.extend(field_tokens(field, schema.data_structure()));
    }
    tokens
}

/// Tokens for a single field: its path, optional alias, and type suffixes
pub fn field_tokens(field: &CompiledField, structure: DataStructure) -> Vec<String> {
    let mut tokens = Vec::new();

    match structure {
        DataStructure::Hash => {
            tokens.push(field.storage_key().to_string());
            if field.storage_key() != field.search_alias() {
                tokens.push("AS".to_string());
                tokens.push(field.search_alias().to_string());
            }
        }
        DataStructure::Json => {
            tokens.push(field.search_path().to_string());
            tokens.push("AS".to_string());
            tokens.push(field.search_alias().to_string());
        }
    }

    match field.field_type() {
        FieldType::String => {
            tokens.push("TAG".to_string());
            tokens.push("SEPARATOR".to_string());
            tokens.push(field.separator().to_string());
            if field.case_sensitive {
                tokens.push("CASESENSITIVE".to_string());
            }
            // SORTABLE on a TAG is HASH-only; the compiler already cleared
            // the flag for JSON and warned.
            if field.is_sortable() {
                tokens.push("SORTABLE".to_string());
            }
        }
        FieldType::Text => {
            tokens.push("TEXT".to_string());
            if !field.stemming {
                tokens.push("NOSTEM".to_string());
            }
            if let Some(matcher) = &field.matcher {
                tokens.push("PHONETIC".to_string());
                tokens.push(matcher.clone());
            }
            if field.is_sortable() {
                tokens.push("SORTABLE".to_string());
            }
            if !field.normalized {
                tokens.push("UNF".to_string());
            }
            if let Some(weight) = field.weight {
                tokens.push("WEIGHT".to_string());
                tokens.push(format_number(weight));
            }
        }
        FieldType::Number | FieldType::Date => {
            tokens.push("NUMERIC".to_string());
            if field.is_sortable() {
                tokens.push("SORTABLE".to_string());
            }
        }
        FieldType::Boolean => {
            tokens.push("TAG".to_string());
            tokens.push("SEPARATOR".to_string());
            tokens.push(",".to_string());
        }
        FieldType::Point => {
            tokens.push("GEO".to_string());
        }
        FieldType::StringArray => {
            tokens.push("TAG".to_string());
            tokens.push("SEPARATOR".to_string());
            tokens.push(field.separator().to_string());
        }
        FieldType::Vector => {
            // The compiler guarantees params are present for vector fields.
            if let Some(params) = field.vector_params() {
                tokens.extend(vector_tokens(params));
            }
        }
        // Container types never reach the compiled leaf list.
        FieldType::Array | FieldType::Tuple | FieldType::Object => {}
    }

    if !field.is_indexed() {
        tokens.push("NOINDEX".to_string());
    }
    tokens
}

/// `VECTOR <ALGO> <count> <param tokens>` where `count` is the number of
/// tokens that follow it
fn vector_tokens(params: &VectorParams) -> Vec<String> {
    let mut args = vec![
        "TYPE".to_string(),
        params.element_type.as_str().to_string(),
        "DIM".to_string(),
        params.dim.to_string(),
        "DISTANCE_METRIC".to_string(),
        params.distance_metric.as_str().to_string(),
    ];
    if let Some(cap) = params.initial_cap {
        args.push("INITIAL_CAP".to_string());
        args.push(cap.to_string());
    }
    match params.algorithm {
        VectorAlgorithm::Flat => {
            if let Some(block_size) = params.block_size {
                args.push("BLOCK_SIZE".to_string());
                args.push(block_size.to_string());
            }
        }
        VectorAlgorithm::Hnsw => {
            if let Some(m) = params.m {
                args.push("M".to_string());
                args.push(m.to_string());
            }
            if let Some(ef) = params.ef_construction {
                args.push("EF_CONSTRUCTION".to_string());
                args.push(ef.to_string());
            }
            if let Some(ef) = params.ef_runtime {
                args.push("EF_RUNTIME".to_string());
                args.push(ef.to_string());
            }
            if let Some(epsilon) = params.epsilon {
                args.push("EPSILON".to_string());
                args.push(format_number(epsilon));
            }
        }
    }

    let mut tokens = vec![
        "VECTOR".to_string(),
        params.algorithm.as_str().to_string(),
        args.len().to_string(),
    ];
    tokens.extend(args);
    tokens
}

/// Format a float the way the wire expects: no trailing `.0` on integers
fn format_number(n: f64) -> String {
    format!("{n}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        compile, DistanceMetric, FieldDefinition, SchemaOptions, VectorType,
    };

    fn defs(fields: Vec<(&str, FieldDefinition)>) -> Vec<(String, FieldDefinition)> {
        fields
            .into_iter()
            .map(|(n, d)| (n.to_string(), d))
            .collect()
    }

    #[test]
    fn test_hash_schema_definition() {
        let schema = compile(
            "thing",
            defs(vec![
                ("aString", FieldDefinition::string()),
                ("aNumber", FieldDefinition::number()),
                ("aBoolean", FieldDefinition::boolean()),
            ]),
            SchemaOptions::hash(),
        )
        .unwrap();

        let tokens = index_definition_tokens(&schema);
        assert_eq!(
            tokens,
            vec![
                "thing:index",
                "ON",
                "HASH",
                "PREFIX",
                "1",
                "thing:",
                "SCHEMA",
                "aString",
                "TAG",
                "SEPARATOR",
                "|",
                "aNumber",
                "NUMERIC",
                "aBoolean",
                "TAG",
                "SEPARATOR",
                ",",
            ]
        );
    }

    #[test]
    fn test_json_paths_are_aliased() {
        let schema = compile(
            "thing",
            defs(vec![
                ("aString", FieldDefinition::string()),
                ("anArray", FieldDefinition::string_array()),
            ]),
            SchemaOptions::json(),
        )
        .unwrap();

        let tokens = index_definition_tokens(&schema);
        let schema_at = tokens.iter().position(|t| t == "SCHEMA").unwrap();
        assert_eq!(
            &tokens[schema_at + 1..],
            &[
                "$.aString",
                "AS",
                "aString",
                "TAG",
                "SEPARATOR",
                "|",
                "$.anArray[*]",
                "AS",
                "anArray",
                "TAG",
                "SEPARATOR",
                "|",
            ]
        );
    }

    #[test]
    fn test_string_options() {
        let schema = compile(
            "t",
            defs(vec![(
                "s",
                FieldDefinition::string()
                    .separator(';')
                    .case_sensitive(true)
                    .sortable(true),
            )]),
            SchemaOptions::hash(),
        )
        .unwrap();
        assert_eq!(
            field_tokens(&schema.fields()[0], DataStructure::Hash),
            vec!["s", "TAG", "SEPARATOR", ";", "CASESENSITIVE", "SORTABLE"]
        );
    }

    #[test]
    fn test_sortable_string_omitted_under_json() {
        let schema = compile(
            "t",
            defs(vec![("s", FieldDefinition::string().sortable(true))]),
            SchemaOptions::json(),
        )
        .unwrap();
        let tokens = field_tokens(&schema.fields()[0], DataStructure::Json);
        assert!(!tokens.contains(&"SORTABLE".to_string()));
    }

    #[test]
    fn test_text_option_order() {
        let schema = compile(
            "t",
            defs(vec![(
                "body",
                FieldDefinition::text()
                    .stemming(false)
                    .matcher("dm:en")
                    .sortable(true)
                    .normalized(false)
                    .weight(2.0),
            )]),
            SchemaOptions::hash(),
        )
        .unwrap();
        assert_eq!(
            field_tokens(&schema.fields()[0], DataStructure::Hash),
            vec![
                "body", "TEXT", "NOSTEM", "PHONETIC", "dm:en", "SORTABLE", "UNF", "WEIGHT", "2"
            ]
        );
    }

    #[test]
    fn test_date_and_point_and_noindex() {
        let schema = compile(
            "t",
            defs(vec![
                ("when", FieldDefinition::date().sortable(true)),
                ("where", FieldDefinition::point()),
                ("hidden", FieldDefinition::string().indexed(false)),
            ]),
            SchemaOptions::hash(),
        )
        .unwrap();
        assert_eq!(
            field_tokens(schema.field("when").unwrap(), DataStructure::Hash),
            vec!["when", "NUMERIC", "SORTABLE"]
        );
        assert_eq!(
            field_tokens(schema.field("where").unwrap(), DataStructure::Hash),
            vec!["where", "GEO"]
        );
        assert_eq!(
            field_tokens(schema.field("hidden").unwrap(), DataStructure::Hash),
            vec!["hidden", "TAG", "SEPARATOR", "|", "NOINDEX"]
        );
    }

    #[test]
    fn test_nested_hash_field_gets_alias() {
        let schema = compile(
            "t",
            defs(vec![(
                "addr",
                FieldDefinition::object(vec![("city", FieldDefinition::string())]),
            )]),
            SchemaOptions::hash(),
        )
        .unwrap();
        assert_eq!(
            field_tokens(&schema.fields()[0], DataStructure::Hash),
            vec!["addr.city", "AS", "addr_city", "TAG", "SEPARATOR", "|"]
        );
    }

    #[test]
    fn test_flat_vector_tokens() {
        let params = VectorParams {
            initial_cap: Some(1000),
            block_size: Some(100),
            ..VectorParams::new(
                VectorAlgorithm::Flat,
                VectorType::Float32,
                512,
                DistanceMetric::Cosine,
            )
        };
        let schema = compile(
            "doc",
            defs(vec![("embedding", FieldDefinition::vector(params))]),
            SchemaOptions::json(),
        )
        .unwrap();
        assert_eq!(
            field_tokens(&schema.fields()[0], DataStructure::Json),
            vec![
                "$.embedding",
                "AS",
                "embedding",
                "VECTOR",
                "FLAT",
                "10",
                "TYPE",
                "FLOAT32",
                "DIM",
                "512",
                "DISTANCE_METRIC",
                "COSINE",
                "INITIAL_CAP",
                "1000",
                "BLOCK_SIZE",
                "100",
            ]
        );
    }

    #[test]
    fn test_hnsw_vector_tokens() {
        let params = VectorParams {
            m: Some(16),
            ef_construction: Some(200),
            ef_runtime: Some(10),
            epsilon: Some(0.01),
            ..VectorParams::new(
                VectorAlgorithm::Hnsw,
                VectorType::Float64,
                384,
                DistanceMetric::L2,
            )
        };
        let schema = compile(
            "doc",
            defs(vec![("embedding", FieldDefinition::vector(params))]),
            SchemaOptions::json(),
        )
        .unwrap();
        let tokens = field_tokens(&schema.fields()[0], DataStructure::Json);
        assert_eq!(
            tokens,
            vec![
                "$.embedding",
                "AS",
                "embedding",
                "VECTOR",
                "HNSW",
                "14",
                "TYPE",
                "FLOAT64",
                "DIM",
                "384",
                "DISTANCE_METRIC",
                "L2",
                "M",
                "16",
                "EF_CONSTRUCTION",
                "200",
                "EF_RUNTIME",
                "10",
                "EPSILON",
                "0.01",
            ]
        );
    }

    #[test]
    fn test_stop_words_modes() {
        let fields = || defs(vec![("body", FieldDefinition::text())]);

        let default = compile("t", fields(), SchemaOptions::json()).unwrap();
        assert!(!index_definition_tokens(&default)
            .iter()
            .any(|t| t == "STOPWORDS"));

        let off = compile("t", fields(), SchemaOptions::json().stop_words_off()).unwrap();
        let tokens = index_definition_tokens(&off);
        let at = tokens.iter().position(|t| t == "STOPWORDS").unwrap();
        assert_eq!(&tokens[at..at + 2], &["STOPWORDS", "0"]);

        let custom = compile(
            "t",
            fields(),
            SchemaOptions::json().stop_words(vec!["a".to_string(), "the".to_string()]),
        )
        .unwrap();
        let tokens = index_definition_tokens(&custom);
        let at = tokens.iter().position(|t| t == "STOPWORDS").unwrap();
        assert_eq!(&tokens[at..at + 4], &["STOPWORDS", "2", "a", "the"]);
    }
}
