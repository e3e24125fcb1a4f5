//! Search-index emission
//!
//! Everything the repository layer needs to create and track a RediSearch
//! index for a compiled schema:
//!
//! - **tokens**: [`index_definition_tokens`] — the literal `FT.CREATE`
//!   argument vector, and [`field_tokens`] for a single field
//! - **fingerprint**: [`index_fingerprint`] — stable digest used to detect
//!   stale indexes
//!
//! This module only produces token arrays; sending them to the database is
//! the transport collaborator's job.

mod fingerprint;
mod tokens;

pub use fingerprint::index_fingerprint;
pub use tokens::{field_tokens, index_definition_tokens};
