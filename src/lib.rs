//! # Redimap
//!
//! Schema-driven object mapping core for Redis Stack (RediSearch +
//! RedisJSON). Describe an entity's shape once as a schema of typed
//! fields, and redimap will:
//!
//! - **Compile the schema**: flatten nested objects, tuples and arrays
//!   into an ordered table of compiled fields with resolved storage keys
//!   and search paths
//! - **Emit the index definition**: the exact `FT.CREATE` argument vector
//!   for either storage structure, plus a stable fingerprint for stale
//!   index detection
//! - **Encode/decode entities**: to a flat HASH field map or a nested
//!   JSON document, with canonical encodings for dates, points and
//!   vectors
//! - **Compile queries**: field-typed predicates into RediSearch query
//!   strings with correct per-type escaping
//!
//! Network transport, repository orchestration and the fluent query
//! builder are external collaborators: this crate only produces and
//! consumes token arrays, storage maps, JSON trees and query strings.
//!
//! ## Modules
//!
//! - [`entity`]: typed values and the entity bag
//! - [`schema`]: field definitions, options, and the schema compiler
//! - [`index`]: `FT.CREATE` token emission and index fingerprinting
//! - [`codec`]: HASH and JSON codecs
//! - [`search`]: query-term model and query-string compiler
//!
//! ## Quick Start
//!
//! ```rust
//! use redimap::entity::Entity;
//! use redimap::schema::{compile, FieldDefinition, SchemaOptions};
//! use redimap::search::{compile_query, QueryTerm};
//! use redimap::{codec, index};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Describe the shape once
//!     let schema = compile(
//!         "user",
//!         vec![
//!             ("name".to_string(), FieldDefinition::text().sortable(true)),
//!             ("age".to_string(), FieldDefinition::number()),
//!             ("active".to_string(), FieldDefinition::boolean()),
//!         ],
//!         SchemaOptions::hash(),
//!     )?;
//!
//!     // Index creation arguments for the transport layer
//!     let create_args = index::index_definition_tokens(&schema);
//!     assert_eq!(create_args[0], "user:index");
//!     let fingerprint = index::index_fingerprint(&schema);
//!     assert_eq!(fingerprint.len(), 64);
//!
//!     // Encode an entity for HSET
//!     let entity = Entity::new()
//!         .with("name", "alice")
//!         .with("age", 42)
//!         .with("active", true);
//!     let fields = codec::hash::encode(&entity, &schema)?;
//!     assert_eq!(fields["age"], "42");
//!
//!     // Compile a query for FT.SEARCH
//!     let q = compile_query(
//!         &[QueryTerm::eq("name", "alice"), QueryTerm::lte("age", 42)],
//!         &schema,
//!     )?;
//!     assert_eq!(q, "@name:(alice) @age:[-inf 42]");
//!
//!     Ok(())
//! }
//! ```
//!
//! All compiled schemas are immutable and safe for concurrent read-only
//! use; every codec and compiler call is pure and synchronous.

pub mod codec;
pub mod entity;
pub mod index;
pub mod schema;
pub mod search;

// Re-export top-level types for convenience
pub use codec::{CodecError, CodecResult};
pub use entity::{Entity, GeoPoint, Value};
pub use index::{field_tokens, index_definition_tokens, index_fingerprint};
pub use schema::{
    compile, CompiledField, CompiledSchema, DataStructure, FieldDefinition, FieldType,
    SchemaError, SchemaOptions, SchemaResult, SchemaWarning,
};
pub use search::{compile_query, Join, QueryOp, QueryTerm, SearchError, SearchResult};
