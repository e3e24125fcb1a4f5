//! Query compilation
//!
//! Turns field-typed predicates into RediSearch query strings:
//!
//! - **term**: the [`QueryTerm`] / [`QueryOp`] / [`Join`] predicate model
//! - **escape**: TAG-value escaping rules
//! - **compiler**: [`compile_query`], terms → query string
//! - **error**: [`SearchError`] for unknown fields and type mismatches
//!
//! # Example
//!
//! ```rust
//! use redimap::schema::{compile, FieldDefinition, SchemaOptions};
//! use redimap::search::{compile_query, QueryTerm};
//!
//! let schema = compile(
//!     "thing",
//!     vec![("aNumber".to_string(), FieldDefinition::number())],
//!     SchemaOptions::hash(),
//! )
//! .unwrap();
//!
//! let q = compile_query(&[QueryTerm::lte("aNumber", 23)], &schema).unwrap();
//! assert_eq!(q, "@aNumber:[-inf 23]");
//! ```

mod compiler;
mod error;
mod escape;
mod term;

pub use compiler::compile_query;
pub use error::{SearchError, SearchResult};
pub use escape::escape_tag;
pub use term::{Join, QueryOp, QueryTerm};
