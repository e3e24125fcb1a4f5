//! Compiled schema types
//!
//! A [`CompiledSchema`] is the normalized, immutable output of the schema
//! compiler: an ordered list of leaf [`CompiledField`]s (nested objects,
//! tuples and arrays flattened to dotted logical paths), plus the resolved
//! naming and option set. Building one is deterministic — the same
//! definitions and options always produce the same compiled output, which
//! is what makes the index fingerprint stable.
//!
//! A compiled schema is safe for concurrent read-only use: every codec and
//! query-compiler call borrows it immutably.

use crate::schema::{
    DataStructure, FieldDefinition, FieldType, IdStrategy, SchemaWarning, StopWordsMode,
    VectorParams,
};
use std::collections::HashMap;

/// One leaf field after flattening
///
/// `logical_path` is the dotted path callers use (`"addr.city"`,
/// `"pos.0"`); `storage_key` is the HASH field name; `search_path` is the
/// JSON path (`$.addr.city`) for JSON schemas or the storage key for HASH
/// schemas; `search_alias` is the attribute name the index and the query
/// compiler use.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledField {
    pub(crate) logical_path: String,
    pub(crate) storage_key: String,
    pub(crate) search_path: String,
    pub(crate) search_alias: String,
    pub(crate) field_type: FieldType,
    pub(crate) indexed: bool,
    pub(crate) sortable: bool,
    pub(crate) case_sensitive: bool,
    pub(crate) normalized: bool,
    pub(crate) stemming: bool,
    pub(crate) separator: char,
    pub(crate) matcher: Option<String>,
    pub(crate) weight: Option<f64>,
    pub(crate) vector: Option<VectorParams>,
}

impl CompiledField {
    /// Dotted logical path of the field
    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    /// HASH storage key (dotted for nested fields)
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Path used in the index definition (`$.`-path for JSON)
    pub fn search_path(&self) -> &str {
        &self.search_path
    }

    /// Attribute name used in index aliases and query strings
    pub fn search_alias(&self) -> &str {
        &self.search_alias
    }

    /// The field's declared type
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the field participates in the index
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Whether the field compiled as sortable
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// TAG separator in effect for this field
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Vector parameters, when this is a vector field
    pub fn vector_params(&self) -> Option<&VectorParams> {
        self.vector.as_ref()
    }
}

/// A fully compiled schema
///
/// Built once by [`compile`](super::compile) and immutable afterwards.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    pub(crate) name: String,
    pub(crate) data_structure: DataStructure,
    pub(crate) prefix: String,
    pub(crate) index_name: String,
    pub(crate) index_hash_name: String,
    pub(crate) fields: Vec<CompiledField>,
    pub(crate) by_path: HashMap<String, usize>,
    /// Original definition tree, kept for the structural codecs
    pub(crate) definitions: Vec<(String, FieldDefinition)>,
    pub(crate) stop_words_mode: StopWordsMode,
    pub(crate) stop_words: Vec<String>,
    pub(crate) id_strategy: IdStrategy,
    pub(crate) warnings: Vec<SchemaWarning>,
}

impl CompiledSchema {
    /// The schema's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The physical storage structure
    pub fn data_structure(&self) -> DataStructure {
        self.data_structure
    }

    /// Key prefix for stored records
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of the search index
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Key under which the index fingerprint is stored
    pub fn index_hash_name(&self) -> &str {
        &self.index_hash_name
    }

    /// Compiled leaf fields, in declaration order
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// Look up a compiled field by logical path
    pub fn field(&self, logical_path: &str) -> Option<&CompiledField> {
        self.by_path.get(logical_path).map(|&i| &self.fields[i])
    }

    /// Warnings raised during compilation
    pub fn warnings(&self) -> &[SchemaWarning] {
        &self.warnings
    }

    /// Generate a fresh entity id using the schema's id strategy
    pub fn generate_id(&self) -> String {
        (self.id_strategy)()
    }

    /// Storage key for an entity with the given id (`<prefix>:<id>`)
    pub fn entity_key(&self, id: &str) -> String {
        format!("{}:{}", self.prefix, id)
    }
}
