//! Schema-level options
//!
//! Options that apply to a whole schema rather than one field: the
//! physical storage structure, key prefix and index naming, stop-word
//! handling, the entity-id strategy, and the warning callback.

use crate::schema::SchemaWarning;
use serde::{Deserialize, Serialize};

/// Which physical encoding records use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataStructure {
    /// Flat field-value map (`HSET`)
    Hash,
    /// Nested document (`JSON.SET`)
    Json,
}

impl DataStructure {
    /// Token used in `FT.CREATE ... ON <structure>`
    pub fn as_str(&self) -> &'static str {
        match self {
            DataStructure::Hash => "HASH",
            DataStructure::Json => "JSON",
        }
    }
}

impl std::fmt::Display for DataStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stop-word handling for the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWordsMode {
    /// Use RediSearch's built-in stop-word list (emits nothing)
    Default,
    /// Disable stop words (emits `STOPWORDS 0`)
    Off,
    /// Use the schema's own list (emits `STOPWORDS <n> <word>...`)
    Custom,
}

/// Strategy for generating new entity ids
///
/// Must return a non-empty string on every call. The default produces a
/// 32-character uuid-v4 hex string.
pub type IdStrategy = fn() -> String;

/// Default id strategy: uuid v4 without hyphens
pub fn default_id_strategy() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Callback invoked for each non-fatal warning raised during compilation
pub type WarningHandler = fn(&SchemaWarning);

/// Options controlling schema compilation
///
/// All fields have sensible defaults; `SchemaOptions::default()` compiles
/// a JSON-structured schema with names derived from the schema name.
#[derive(Debug, Clone)]
pub struct SchemaOptions {
    /// Physical storage structure (default JSON)
    pub data_structure: DataStructure,
    /// Key prefix for stored records; defaults to the schema name
    pub prefix: Option<String>,
    /// Index name; defaults to `<prefix>:index`
    pub index_name: Option<String>,
    /// Key under which the index fingerprint is stored; defaults to
    /// `<prefix>:index:hash`
    pub index_hash_name: Option<String>,
    /// Entity id generator
    pub id_strategy: IdStrategy,
    /// Stop-word handling (default: RediSearch built-ins)
    pub stop_words_mode: StopWordsMode,
    /// Custom stop-word list, used when mode is [`StopWordsMode::Custom`]
    pub stop_words: Vec<String>,
    /// Observer for non-fatal compilation warnings
    pub on_warning: Option<WarningHandler>,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            data_structure: DataStructure::Json,
            prefix: None,
            index_name: None,
            index_hash_name: None,
            id_strategy: default_id_strategy,
            stop_words_mode: StopWordsMode::Default,
            stop_words: Vec::new(),
            on_warning: None,
        }
    }
}

impl SchemaOptions {
    /// Options for a HASH-structured schema
    pub fn hash() -> Self {
        Self {
            data_structure: DataStructure::Hash,
            ..Self::default()
        }
    }

    /// Options for a JSON-structured schema
    pub fn json() -> Self {
        Self::default()
    }

    /// Set the key prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the index name
    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Set the fingerprint storage key
    pub fn index_hash_name(mut self, name: impl Into<String>) -> Self {
        self.index_hash_name = Some(name.into());
        self
    }

    /// Set the id strategy
    pub fn id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Disable stop words entirely
    pub fn stop_words_off(mut self) -> Self {
        self.stop_words_mode = StopWordsMode::Off;
        self
    }

    /// Use a custom stop-word list
    pub fn stop_words(mut self, words: Vec<String>) -> Self {
        self.stop_words_mode = StopWordsMode::Custom;
        self.stop_words = words;
        self
    }

    /// Subscribe to compilation warnings
    pub fn on_warning(mut self, handler: WarningHandler) -> Self {
        self.on_warning = Some(handler);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = SchemaOptions::default();
        assert_eq!(opts.data_structure, DataStructure::Json);
        assert_eq!(opts.stop_words_mode, StopWordsMode::Default);
        assert!(opts.prefix.is_none());
    }

    #[test]
    fn test_default_id_strategy_shape() {
        let id = default_id_strategy();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(default_id_strategy(), id);
    }

    #[test]
    fn test_builder_chain() {
        let opts = SchemaOptions::hash()
            .prefix("user")
            .index_name("user:idx")
            .stop_words(vec!["a".to_string(), "the".to_string()]);
        assert_eq!(opts.data_structure, DataStructure::Hash);
        assert_eq!(opts.prefix.as_deref(), Some("user"));
        assert_eq!(opts.index_name.as_deref(), Some("user:idx"));
        assert_eq!(opts.stop_words_mode, StopWordsMode::Custom);
        assert_eq!(opts.stop_words.len(), 2);
    }
}
