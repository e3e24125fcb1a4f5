//! Entity value model
//!
//! This module provides the in-memory representation of mapped objects:
//!
//! - **value**: The tagged [`Value`] variants a field can hold, plus
//!   [`GeoPoint`] with its GEO range constants
//! - **entity**: The [`Entity`] bag mapping logical field names to values
//!
//! Entities are plain data; validation against a schema happens in the
//! [`codec`](crate::codec) layer.

mod entity;
mod value;

pub use entity::Entity;
pub use value::{GeoPoint, Value, MAX_LATITUDE, MAX_LONGITUDE};
