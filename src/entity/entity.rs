//! The entity bag
//!
//! An [`Entity`] is a mutable map from logical field name to typed
//! [`Value`]. It carries no schema knowledge of its own: the compiled
//! schema is the single source of truth for which names are legal and
//! which variant each field may hold, and the codecs enforce that at
//! encode/decode time. A field that was never set is "null" by omission.

use crate::entity::{GeoPoint, Value};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A bag of logical field name → typed value
///
/// Created empty or by decoding a stored record. The codecs only read and
/// write named fields; they never retain a reference to the entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    fields: HashMap<String, Value>,
}

impl Entity {
    /// Create an empty entity (all fields null)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder method: set a field and return the entity by value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value, `None` when the field is null/absent
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Clear a field (back to null)
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// True when no field holds a value
    ///
    /// An empty entity produces no stored record at all; the repository
    /// layer treats "encodes to nothing" as a delete.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields holding a value
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over defined field names
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Get a string field
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Get a numeric field
    pub fn get_number(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Get a boolean field
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.fields.get(name) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Get a date field
    pub fn get_date(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.fields.get(name) {
            Some(Value::Date(d)) => Some(*d),
            _ => None,
        }
    }

    /// Get a point field
    pub fn get_point(&self, name: &str) -> Option<GeoPoint> {
        match self.fields.get(name) {
            Some(Value::Point(p)) => Some(*p),
            _ => None,
        }
    }

    /// Get an array field's elements
    pub fn get_array(&self, name: &str) -> Option<&[Value]> {
        match self.fields.get(name) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }
    }

    /// Get a vector field
    pub fn get_vector(&self, name: &str) -> Option<&[f64]> {
        match self.fields.get(name) {
            Some(Value::Vector(v)) => Some(v),
            _ => None,
        }
    }

    /// Resolve a dotted logical path (`"addr.city"`, `"pos.0"`) to a value
    ///
    /// Numeric segments index into tuples and arrays; named segments into
    /// nested objects. Returns `None` when any segment is absent or `Null`.
    pub fn resolve_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for seg in segments {
            current = match current {
                Value::Object(map) => map.get(seg)?,
                Value::Tuple(items) | Value::Array(items) => {
                    items.get(seg.parse::<usize>().ok()?)?
                }
                _ => return None,
            };
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }
}

impl From<HashMap<String, Value>> for Entity {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_entity() {
        let e = Entity::new();
        assert!(e.is_empty());
        assert_eq!(e.len(), 0);
        assert!(e.get("anything").is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut e = Entity::new();
        e.set("name", "alice").set("age", 42i64).set("active", true);
        assert_eq!(e.get_string("name"), Some("alice"));
        assert_eq!(e.get_number("age"), Some(42.0));
        assert_eq!(e.get_bool("active"), Some(true));
        assert_eq!(e.len(), 3);
    }

    #[test]
    fn test_remove_returns_to_null() {
        let mut e = Entity::new().with("name", "alice");
        assert!(e.remove("name").is_some());
        assert!(e.get("name").is_none());
        assert!(e.is_empty());
    }

    #[test]
    fn test_resolve_nested_path() {
        let mut addr = HashMap::new();
        addr.insert("city".to_string(), Value::String("berlin".to_string()));
        let e = Entity::new().with("addr", Value::Object(addr)).with(
            "pos",
            Value::Tuple(vec![Value::Number(1.0), Value::Number(2.0)]),
        );

        assert_eq!(
            e.resolve_path("addr.city"),
            Some(&Value::String("berlin".to_string()))
        );
        assert_eq!(e.resolve_path("pos.1"), Some(&Value::Number(2.0)));
        assert!(e.resolve_path("addr.zip").is_none());
        assert!(e.resolve_path("pos.5").is_none());
        assert!(e.resolve_path("missing.x").is_none());
    }

    #[test]
    fn test_resolve_path_skips_null_tuple_elements() {
        let e = Entity::new().with(
            "pos",
            Value::Tuple(vec![Value::Null, Value::Number(2.0)]),
        );
        assert!(e.resolve_path("pos.0").is_none());
        assert_eq!(e.resolve_path("pos.1"), Some(&Value::Number(2.0)));
    }
}
