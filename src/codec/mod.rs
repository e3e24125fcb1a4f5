//! Entity codecs
//!
//! Bidirectional converters between entities and the two physical
//! encodings:
//!
//! - **hash**: flat string-keyed field map (`HSET`), nested structures
//!   flattened into dotted keys
//! - **json**: nested document tree (`JSON.SET`), structure preserved
//! - **error**: [`CodecError`] for input/value mismatches
//!
//! Both codecs walk the compiled schema's definition tree, so encode and
//! decode are symmetric inverses by construction: for any entity that
//! matches its schema, `decode(encode(e)) == e`.
//!
//! Codecs are pure functions over `(&Entity, &CompiledSchema)` — no
//! shared state, safe to call concurrently from any number of threads.

pub mod hash;
pub mod json;

mod error;

pub use error::{CodecError, CodecResult};
