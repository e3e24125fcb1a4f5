//! Field definitions
//!
//! A [`FieldDefinition`] is the user-authored description of one entity
//! field: its type plus the per-field options that influence how it is
//! stored and indexed. Definitions are plain data; the
//! [`compiler`](super::compiler) normalizes them into
//! [`CompiledField`](super::CompiledField)s.

use serde::{Deserialize, Serialize};

/// Default separator for string and string-array TAG fields
pub const DEFAULT_SEPARATOR: char = '|';

/// Separator for boolean TAG fields
///
/// Booleans always use `,` regardless of the configured string separator.
/// This asymmetry is intentional: a boolean serializes to a single `1`/`0`
/// tag, so the field keeps RediSearch's stock TAG separator.
pub const BOOLEAN_SEPARATOR: char = ',';

/// The supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Exact-match string, indexed as TAG
    String,
    /// Full-text string, indexed as TEXT with stemming
    Text,
    /// Double-precision number, indexed as NUMERIC
    Number,
    /// Boolean flag, indexed as TAG with values `1`/`0`
    Boolean,
    /// Timestamp, stored as epoch milliseconds, indexed as NUMERIC
    Date,
    /// Geographic coordinate, indexed as GEO
    Point,
    /// Array of strings, indexed as TAG
    #[serde(rename = "string[]")]
    StringArray,
    /// Array of nested objects (JSON structure only)
    Array,
    /// Fixed-arity positional sequence of typed elements
    Tuple,
    /// Nested object with its own typed properties
    Object,
    /// Embedding vector (JSON structure only)
    Vector,
}

impl FieldType {
    /// Display name matching the user-facing type keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Point => "point",
            FieldType::StringArray => "string[]",
            FieldType::Array => "array",
            FieldType::Tuple => "tuple",
            FieldType::Object => "object",
            FieldType::Vector => "vector",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vector indexing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VectorAlgorithm {
    /// Brute-force search
    Flat,
    /// Hierarchical navigable small world graph
    Hnsw,
}

impl VectorAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorAlgorithm::Flat => "FLAT",
            VectorAlgorithm::Hnsw => "HNSW",
        }
    }
}

/// Vector element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VectorType {
    Float32,
    Float64,
}

impl VectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorType::Float32 => "FLOAT32",
            VectorType::Float64 => "FLOAT64",
        }
    }
}

/// Vector distance metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DistanceMetric {
    /// Euclidean distance
    L2,
    /// Inner product
    Ip,
    /// Cosine similarity
    Cosine,
}

impl DistanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::L2 => "L2",
            DistanceMetric::Ip => "IP",
            DistanceMetric::Cosine => "COSINE",
        }
    }
}

/// Parameters for a vector field's index
///
/// `block_size` applies to FLAT indexes; `m`, `ef_construction`,
/// `ef_runtime` and `epsilon` to HNSW indexes. Parameters set for the
/// wrong algorithm are ignored at token-emission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorParams {
    pub algorithm: VectorAlgorithm,
    pub element_type: VectorType,
    /// Number of dimensions
    pub dim: usize,
    pub distance_metric: DistanceMetric,
    /// Initial index capacity hint
    pub initial_cap: Option<usize>,
    /// FLAT: growth block size
    pub block_size: Option<usize>,
    /// HNSW: max outgoing edges per node
    pub m: Option<usize>,
    /// HNSW: build-time candidate list size
    pub ef_construction: Option<usize>,
    /// HNSW: query-time candidate list size
    pub ef_runtime: Option<usize>,
    /// HNSW: range query accuracy bound
    pub epsilon: Option<f64>,
}

impl VectorParams {
    /// Create params with the required arguments, optionals unset
    pub fn new(
        algorithm: VectorAlgorithm,
        element_type: VectorType,
        dim: usize,
        distance_metric: DistanceMetric,
    ) -> Self {
        Self {
            algorithm,
            element_type,
            dim,
            distance_metric,
            initial_cap: None,
            block_size: None,
            m: None,
            ef_construction: None,
            ef_runtime: None,
            epsilon: None,
        }
    }
}

/// A user-authored field definition
///
/// Build one with the typed constructors, then chain option setters:
///
/// ```rust
/// use redimap::schema::FieldDefinition;
///
/// let name = FieldDefinition::text().sortable(true).weight(2.0);
/// let tags = FieldDefinition::string_array().separator(';');
/// ```
///
/// Definitions are immutable once handed to the schema compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub(crate) field_type: FieldType,
    /// Search alias; overrides the field name in index aliases and,
    /// for HASH, the storage key (unless `field` is set)
    pub(crate) alias: Option<String>,
    /// Explicit HASH storage key; wins over `alias`
    pub(crate) field: Option<String>,
    /// Explicit JSON search path (e.g. `$.nested.thing`); wins over
    /// the derived `$.`-dotted path
    pub(crate) path: Option<String>,
    /// Whether the field participates in the index (default true)
    pub(crate) indexed: bool,
    pub(crate) sortable: bool,
    pub(crate) case_sensitive: bool,
    /// TEXT: whether values are normalized for sorting (default true)
    pub(crate) normalized: bool,
    /// TAG separator for strings and string arrays
    pub(crate) separator: char,
    /// TEXT: phonetic matcher (e.g. `dm:en`)
    pub(crate) matcher: Option<String>,
    /// TEXT: whether stemming applies (default true)
    pub(crate) stemming: bool,
    /// TEXT: relative weight
    pub(crate) weight: Option<f64>,
    /// Tuple: positional element definitions
    pub(crate) elements: Vec<FieldDefinition>,
    /// Object/array: named property definitions, in declaration order
    pub(crate) properties: Vec<(String, FieldDefinition)>,
    /// Vector: index parameters
    pub(crate) vector: Option<VectorParams>,
}

impl FieldDefinition {
    fn with_type(field_type: FieldType) -> Self {
        Self {
            field_type,
            alias: None,
            field: None,
            path: None,
            indexed: true,
            sortable: false,
            case_sensitive: false,
            normalized: true,
            separator: DEFAULT_SEPARATOR,
            matcher: None,
            stemming: true,
            weight: None,
            elements: Vec::new(),
            properties: Vec::new(),
            vector: None,
        }
    }

    /// An exact-match string field (TAG)
    pub fn string() -> Self {
        Self::with_type(FieldType::String)
    }

    /// A full-text field (TEXT)
    pub fn text() -> Self {
        Self::with_type(FieldType::Text)
    }

    /// A numeric field (NUMERIC)
    pub fn number() -> Self {
        Self::with_type(FieldType::Number)
    }

    /// A boolean field (TAG `1`/`0`)
    pub fn boolean() -> Self {
        Self::with_type(FieldType::Boolean)
    }

    /// A date field (NUMERIC epoch milliseconds)
    pub fn date() -> Self {
        Self::with_type(FieldType::Date)
    }

    /// A geographic point field (GEO)
    pub fn point() -> Self {
        Self::with_type(FieldType::Point)
    }

    /// An array-of-strings field (TAG)
    pub fn string_array() -> Self {
        Self::with_type(FieldType::StringArray)
    }

    /// An array of nested objects (JSON structure only)
    pub fn array_of(properties: Vec<(impl Into<String>, FieldDefinition)>) -> Self {
        let mut def = Self::with_type(FieldType::Array);
        def.properties = properties
            .into_iter()
            .map(|(name, d)| (name.into(), d))
            .collect();
        def
    }

    /// A positional tuple field
    pub fn tuple(elements: Vec<FieldDefinition>) -> Self {
        let mut def = Self::with_type(FieldType::Tuple);
        def.elements = elements;
        def
    }

    /// A nested object field
    pub fn object(properties: Vec<(impl Into<String>, FieldDefinition)>) -> Self {
        let mut def = Self::with_type(FieldType::Object);
        def.properties = properties
            .into_iter()
            .map(|(name, d)| (name.into(), d))
            .collect();
        def
    }

    /// A vector field (JSON structure only)
    pub fn vector(params: VectorParams) -> Self {
        let mut def = Self::with_type(FieldType::Vector);
        def.vector = Some(params);
        def
    }

    /// The field's declared type
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Set the search alias
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the explicit HASH storage key
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the explicit JSON search path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Include or exclude the field from the index (stored either way)
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Mark the field sortable
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// TAG: match case-sensitively
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// TEXT: normalize values for sorting (`false` emits UNF)
    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// TAG separator for strings and string arrays
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// TEXT: phonetic matcher, e.g. `dm:en`
    pub fn matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matcher = Some(matcher.into());
        self
    }

    /// TEXT: enable/disable stemming (`false` emits NOSTEM)
    pub fn stemming(mut self, stemming: bool) -> Self {
        self.stemming = stemming;
        self
    }

    /// TEXT: relative weight
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let def = FieldDefinition::string();
        assert_eq!(def.field_type(), FieldType::String);
        assert!(def.indexed);
        assert!(!def.sortable);
        assert_eq!(def.separator, '|');
    }

    #[test]
    fn test_text_defaults_stem_and_normalize() {
        let def = FieldDefinition::text();
        assert!(def.stemming);
        assert!(def.normalized);
    }

    #[test]
    fn test_builder_chain() {
        let def = FieldDefinition::text()
            .alias("headline")
            .sortable(true)
            .stemming(false)
            .weight(2.5);
        assert_eq!(def.alias.as_deref(), Some("headline"));
        assert!(def.sortable);
        assert!(!def.stemming);
        assert_eq!(def.weight, Some(2.5));
    }

    #[test]
    fn test_nested_constructors() {
        let def = FieldDefinition::object(vec![
            ("city", FieldDefinition::string()),
            ("zip", FieldDefinition::string()),
        ]);
        assert_eq!(def.field_type(), FieldType::Object);
        assert_eq!(def.properties.len(), 2);
        assert_eq!(def.properties[0].0, "city");

        let tup = FieldDefinition::tuple(vec![
            FieldDefinition::number(),
            FieldDefinition::number(),
        ]);
        assert_eq!(tup.elements.len(), 2);
    }
}
