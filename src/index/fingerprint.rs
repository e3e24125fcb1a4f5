//! Index fingerprinting
//!
//! A fingerprint is a deterministic digest of everything that shapes the
//! index definition: the index name, the storage structure, and the exact
//! `FT.CREATE` token sequence. The repository layer stores it next to the
//! index and compares on startup — a mismatch means the index was built
//! from an older schema and must be dropped and recreated.
//!
//! Options that do not change the emitted tokens (the id strategy, the
//! warning callback, the fingerprint key name itself) deliberately do not
//! participate.

use crate::index::index_definition_tokens;
use crate::schema::CompiledSchema;
use sha2::{Digest, Sha256};

/// Fixed-length hex fingerprint of a compiled schema's index definition
///
/// Pure function: identical compiled schemas always produce identical
/// fingerprints, and any change to field order, type, or a token-affecting
/// option produces a different one.
pub fn index_fingerprint(schema: &CompiledSchema) -> String {
    let mut hasher = Sha256::new();
    hasher.update(schema.data_structure().as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(schema.index_name().as_bytes());
    for token in index_definition_tokens(schema) {
        // NUL-separate tokens so concatenations can't collide
        hasher.update([0u8]);
        hasher.update(token.as_bytes());
    }
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{compile, FieldDefinition, SchemaOptions};

    fn defs(fields: Vec<(&str, FieldDefinition)>) -> Vec<(String, FieldDefinition)> {
        fields
            .into_iter()
            .map(|(n, d)| (n.to_string(), d))
            .collect()
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let build = || {
            compile(
                "user",
                defs(vec![
                    ("name", FieldDefinition::text()),
                    ("age", FieldDefinition::number()),
                ]),
                SchemaOptions::hash(),
            )
            .unwrap()
        };
        let a = index_fingerprint(&build());
        let b = index_fingerprint(&build());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_changes_with_field_order() {
        let a = compile(
            "user",
            defs(vec![
                ("name", FieldDefinition::text()),
                ("age", FieldDefinition::number()),
            ]),
            SchemaOptions::hash(),
        )
        .unwrap();
        let b = compile(
            "user",
            defs(vec![
                ("age", FieldDefinition::number()),
                ("name", FieldDefinition::text()),
            ]),
            SchemaOptions::hash(),
        )
        .unwrap();
        assert_ne!(index_fingerprint(&a), index_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_changes_with_token_affecting_options() {
        let base = compile(
            "user",
            defs(vec![("tags", FieldDefinition::string_array())]),
            SchemaOptions::hash(),
        )
        .unwrap();
        let changed = compile(
            "user",
            defs(vec![("tags", FieldDefinition::string_array().separator(';'))]),
            SchemaOptions::hash(),
        )
        .unwrap();
        assert_ne!(index_fingerprint(&base), index_fingerprint(&changed));

        let json = compile(
            "user",
            defs(vec![("tags", FieldDefinition::string_array())]),
            SchemaOptions::json(),
        )
        .unwrap();
        assert_ne!(index_fingerprint(&base), index_fingerprint(&json));
    }

    #[test]
    fn test_fingerprint_ignores_non_token_options() {
        fn other_strategy() -> String {
            "other".to_string()
        }
        fn handler(_: &crate::schema::SchemaWarning) {}

        let a = compile(
            "user",
            defs(vec![("name", FieldDefinition::text())]),
            SchemaOptions::hash(),
        )
        .unwrap();
        let b = compile(
            "user",
            defs(vec![("name", FieldDefinition::text())]),
            SchemaOptions::hash()
                .id_strategy(other_strategy)
                .on_warning(handler)
                .index_hash_name("user:index:hash"),
        )
        .unwrap();
        assert_eq!(index_fingerprint(&a), index_fingerprint(&b));
    }
}
