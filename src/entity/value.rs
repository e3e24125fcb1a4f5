//! Typed values for entity fields
//!
//! Every field of an entity holds one of these tagged variants. The codec
//! layer converts them to/from the HASH and JSON storage encodings; the
//! compiled schema decides which variant a given field is allowed to hold.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Northernmost/southernmost latitude RediSearch GEO fields accept
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Easternmost/westernmost longitude RediSearch GEO fields accept
pub const MAX_LONGITUDE: f64 = 180.0;

/// A geographic coordinate pair
///
/// Stored on the wire as `"<longitude>,<latitude>"` in both HASH and JSON
/// encodings, matching the argument order of the GEO field type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    /// Degrees east of the prime meridian, negative for west
    pub longitude: f64,
    /// Degrees north of the equator, negative for south
    pub latitude: f64,
}

impl GeoPoint {
    /// Create a new point from longitude and latitude
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Check whether this point lies inside the range GEO fields accept
    ///
    /// Latitude is bounded by the Web Mercator projection limit
    /// (±85.05112878°), longitude by ±180°.
    pub fn is_in_range(&self) -> bool {
        self.longitude.abs() <= MAX_LONGITUDE && self.latitude.abs() <= MAX_LATITUDE
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

impl FromStr for GeoPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s
            .split_once(',')
            .ok_or_else(|| format!("expected '<longitude>,<latitude>', got '{s}'"))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| format!("invalid longitude '{lon}'"))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("invalid latitude '{lat}'"))?;
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

/// A typed entity field value
///
/// `Null` only appears as a positional filler inside [`Value::Tuple`] when a
/// stored record is missing one of the tuple's elements; absent scalar fields
/// are represented by omission from the [`Entity`](super::Entity) bag, never
/// by `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent positional element (tuples only)
    Null,
    /// UTF-8 string (TAG or TEXT fields)
    String(String),
    /// Double-precision number
    Number(f64),
    /// Boolean flag
    Bool(bool),
    /// Timestamp, persisted as epoch milliseconds
    Date(DateTime<Utc>),
    /// Geographic coordinate
    Point(GeoPoint),
    /// Homogeneous or mixed array (string arrays, arrays of objects)
    Array(Vec<Value>),
    /// Fixed-arity positional sequence
    Tuple(Vec<Value>),
    /// Nested named fields
    Object(HashMap<String, Value>),
    /// Embedding vector
    Vector(Vec<f64>),
}

impl Value {
    /// Human-readable variant name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Date(_) => "date",
            Value::Point(_) => "point",
            Value::Array(_) => "array",
            Value::Tuple(_) => "tuple",
            Value::Object(_) => "object",
            Value::Vector(_) => "vector",
        }
    }

    /// True for `Null` (used when deciding whether to omit a field)
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build a `Date` value from epoch milliseconds
    ///
    /// Returns `None` when the timestamp is outside chrono's representable
    /// range.
    pub fn date_from_epoch_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Value::Date)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<GeoPoint> for Value {
    fn from(p: GeoPoint) -> Self {
        Value::Point(p)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::Array(items.into_iter().map(Value::String).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::Array(items.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}
