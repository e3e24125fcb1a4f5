//! Schema definition and compilation
//!
//! This module turns user-authored field definitions into the compiled
//! form the rest of the crate works from:
//!
//! - **field**: [`FieldDefinition`] and the supported [`FieldType`]s
//! - **options**: schema-level [`SchemaOptions`] (structure, naming,
//!   stop words, id strategy)
//! - **compiler**: [`compile`] — flattening, path resolution, validation
//! - **compiled**: [`CompiledSchema`] / [`CompiledField`], the immutable
//!   output shared by the codecs, the index emitter and the query compiler
//! - **warning**: non-fatal [`SchemaWarning`]s
//! - **error**: [`SchemaError`] for malformed definitions
//!
//! # Example
//!
//! ```rust
//! use redimap::schema::{compile, FieldDefinition, SchemaOptions};
//!
//! let schema = compile(
//!     "user",
//!     vec![
//!         ("name".to_string(), FieldDefinition::text().sortable(true)),
//!         ("age".to_string(), FieldDefinition::number()),
//!         ("active".to_string(), FieldDefinition::boolean()),
//!     ],
//!     SchemaOptions::hash(),
//! )?;
//!
//! assert_eq!(schema.index_name(), "user:index");
//! # Ok::<(), redimap::schema::SchemaError>(())
//! ```

mod compiled;
mod compiler;
mod error;
mod field;
mod options;
mod warning;

pub use compiled::{CompiledField, CompiledSchema};
pub use compiler::compile;
pub use error::{SchemaError, SchemaResult};
pub use field::{
    DistanceMetric, FieldDefinition, FieldType, VectorAlgorithm, VectorParams, VectorType,
    BOOLEAN_SEPARATOR, DEFAULT_SEPARATOR,
};
pub use options::{
    default_id_strategy, DataStructure, IdStrategy, SchemaOptions, StopWordsMode, WarningHandler,
};
pub use warning::SchemaWarning;
