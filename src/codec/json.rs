//! JSON document codec
//!
//! Converts entities to and from the nested tree stored by `JSON.SET`.
//! The mapping is structural — nested objects, tuples and arrays stay
//! nested — with three canonical scalar encodings shared with the hash
//! codec for round-trip symmetry: dates become epoch-millisecond numbers,
//! points become `"<lon>,<lat>"` strings, vectors become plain number
//! arrays.
//!
//! Null/absent fields are omitted from the tree. An entity with zero
//! defined fields encodes to an empty object, which the repository layer
//! treats as "this record does not exist".

use crate::codec::{CodecError, CodecResult};
use crate::entity::{Entity, GeoPoint, Value};
use crate::schema::{CompiledSchema, FieldDefinition, FieldType};
use serde_json::{json, Map, Number};
use std::collections::HashMap;

/// Encode an entity into a JSON tree
///
/// # Errors
///
/// [`CodecError::InvalidJsonInput`] when a value doesn't match its field's
/// declared type, [`CodecError::PointOutOfRange`] for out-of-range geo
/// coordinates.
pub fn encode(entity: &Entity, schema: &CompiledSchema) -> CodecResult<serde_json::Value> {
    let mut tree = Map::new();
    for (name, def) in &schema.definitions {
        if let Some(value) = entity.get(name) {
            if !value.is_null() {
                tree.insert(name.clone(), encode_value(name, def, value)?);
            }
        }
    }
    Ok(serde_json::Value::Object(tree))
}

/// Decode a JSON tree back into an entity
///
/// Missing keys and JSON nulls yield null (absent) logical fields; keys
/// outside the schema are ignored.
///
/// # Errors
///
/// [`CodecError::InvalidJsonValue`] identifying the field, its expected
/// type, and the JSON path of the offending node.
pub fn decode(tree: &serde_json::Value, schema: &CompiledSchema) -> CodecResult<Entity> {
    let serde_json::Value::Object(root) = tree else {
        return Err(CodecError::InvalidJsonValue {
            field: String::new(),
            expected: "object",
            path: "$".to_string(),
        });
    };
    let mut entity = Entity::new();
    for (name, def) in &schema.definitions {
        if let Some(node) = root.get(name) {
            let path = format!("$.{name}");
            if let Some(value) = decode_value(name, &path, def, node)? {
                entity.set(name.clone(), value);
            }
        }
    }
    Ok(entity)
}

fn encode_value(
    logical: &str,
    def: &FieldDefinition,
    value: &Value,
) -> CodecResult<serde_json::Value> {
    match (def.field_type, value) {
        (FieldType::String | FieldType::Text, Value::String(s)) => Ok(json!(s)),
        (FieldType::Number, Value::Number(n)) => Ok(number(*n)),
        (FieldType::Boolean, Value::Bool(b)) => Ok(json!(b)),
        (FieldType::Date, Value::Date(d)) => Ok(json!(d.timestamp_millis())),
        (FieldType::Point, Value::Point(p)) => {
            if !p.is_in_range() {
                return Err(CodecError::PointOutOfRange {
                    field: logical.to_string(),
                    longitude: p.longitude,
                    latitude: p.latitude,
                });
            }
            Ok(json!(p.to_string()))
        }
        (FieldType::StringArray, Value::Array(items)) => {
            let encoded: Vec<serde_json::Value> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(json!(s)),
                    Value::Number(n) => Ok(json!(format!("{n}"))),
                    Value::Bool(b) => Ok(json!(b.to_string())),
                    other => Err(CodecError::InvalidJsonInput {
                        field: logical.to_string(),
                        expected: "string[]",
                        actual: other.type_name(),
                    }),
                })
                .collect::<CodecResult<_>>()?;
            Ok(serde_json::Value::Array(encoded))
        }
        (FieldType::Vector, Value::Vector(v)) => {
            Ok(serde_json::Value::Array(v.iter().map(|n| number(*n)).collect()))
        }
        (FieldType::Object, Value::Object(map)) => {
            let mut tree = Map::new();
            for (prop_name, prop_def) in &def.properties {
                if let Some(v) = map.get(prop_name) {
                    if !v.is_null() {
                        let logical = format!("{logical}.{prop_name}");
                        tree.insert(prop_name.clone(), encode_value(&logical, prop_def, v)?);
                    }
                }
            }
            Ok(serde_json::Value::Object(tree))
        }
        (FieldType::Tuple, Value::Tuple(items)) => {
            let mut encoded = Vec::with_capacity(def.elements.len());
            for (i, el_def) in def.elements.iter().enumerate() {
                match items.get(i) {
                    Some(v) if !v.is_null() => {
                        let logical = format!("{logical}.{i}");
                        encoded.push(encode_value(&logical, el_def, v)?);
                    }
                    _ => encoded.push(serde_json::Value::Null),
                }
            }
            Ok(serde_json::Value::Array(encoded))
        }
        (FieldType::Array, Value::Array(items)) => {
            let mut encoded = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let Value::Object(map) = item else {
                    return Err(CodecError::InvalidJsonInput {
                        field: format!("{logical}.{i}"),
                        expected: "object",
                        actual: item.type_name(),
                    });
                };
                let mut tree = Map::new();
                for (prop_name, prop_def) in &def.properties {
                    if let Some(v) = map.get(prop_name) {
                        if !v.is_null() {
                            let logical = format!("{logical}.{prop_name}");
                            tree.insert(prop_name.clone(), encode_value(&logical, prop_def, v)?);
                        }
                    }
                }
                encoded.push(serde_json::Value::Object(tree));
            }
            Ok(serde_json::Value::Array(encoded))
        }
        (expected, actual) => Err(CodecError::InvalidJsonInput {
            field: logical.to_string(),
            expected: expected.as_str(),
            actual: actual.type_name(),
        }),
    }
}

fn decode_value(
    logical: &str,
    path: &str,
    def: &FieldDefinition,
    node: &serde_json::Value,
) -> CodecResult<Option<Value>> {
    if node.is_null() {
        return Ok(None);
    }
    let invalid = || CodecError::InvalidJsonValue {
        field: logical.to_string(),
        expected: def.field_type.as_str(),
        path: path.to_string(),
    };
    match def.field_type {
        FieldType::String | FieldType::Text => node
            .as_str()
            .map(|s| Some(Value::String(s.to_string())))
            .ok_or_else(|| invalid()),
        FieldType::Number => node
            .as_f64()
            .map(|n| Some(Value::Number(n)))
            .ok_or_else(|| invalid()),
        FieldType::Boolean => node
            .as_bool()
            .map(|b| Some(Value::Bool(b)))
            .ok_or_else(|| invalid()),
        FieldType::Date => node
            .as_i64()
            .and_then(Value::date_from_epoch_millis)
            .map(Some)
            .ok_or_else(|| invalid()),
        FieldType::Point => node
            .as_str()
            .and_then(|s| s.parse::<GeoPoint>().ok())
            .map(|p| Some(Value::Point(p)))
            .ok_or_else(|| invalid()),
        FieldType::StringArray => {
            let items = node.as_array().ok_or_else(|| invalid())?;
            let decoded: Vec<Value> = items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(|s| Value::String(s.to_string()))
                        .ok_or_else(|| invalid())
                })
                .collect::<CodecResult<_>>()?;
            Ok(Some(Value::Array(decoded)))
        }
        FieldType::Vector => {
            let items = node.as_array().ok_or_else(|| invalid())?;
            let decoded: Vec<f64> = items
                .iter()
                .map(|item| item.as_f64().ok_or_else(|| invalid()))
                .collect::<CodecResult<_>>()?;
            Ok(Some(Value::Vector(decoded)))
        }
        FieldType::Object => {
            let tree = node.as_object().ok_or_else(|| invalid())?;
            let mut object = HashMap::new();
            for (prop_name, prop_def) in &def.properties {
                if let Some(child) = tree.get(prop_name) {
                    let logical = format!("{logical}.{prop_name}");
                    let path = format!("{path}.{prop_name}");
                    if let Some(v) = decode_value(&logical, &path, prop_def, child)? {
                        object.insert(prop_name.clone(), v);
                    }
                }
            }
            if object.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Value::Object(object)))
            }
        }
        FieldType::Tuple => {
            let items = node.as_array().ok_or_else(|| invalid())?;
            let mut decoded = Vec::with_capacity(def.elements.len());
            let mut any = false;
            for (i, el_def) in def.elements.iter().enumerate() {
                let logical = format!("{logical}.{i}");
                let path = format!("{path}[{i}]");
                match items.get(i) {
                    Some(child) => match decode_value(&logical, &path, el_def, child)? {
                        Some(v) => {
                            any = true;
                            decoded.push(v);
                        }
                        None => decoded.push(Value::Null),
                    },
                    None => decoded.push(Value::Null),
                }
            }
            if any {
                Ok(Some(Value::Tuple(decoded)))
            } else {
                Ok(None)
            }
        }
        FieldType::Array => {
            let items = node.as_array().ok_or_else(|| invalid())?;
            let mut decoded = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let tree = item.as_object().ok_or_else(|| CodecError::InvalidJsonValue {
                    field: format!("{logical}.{i}"),
                    expected: "object",
                    path: format!("{path}[{i}]"),
                })?;
                let mut object = HashMap::new();
                for (prop_name, prop_def) in &def.properties {
                    if let Some(child) = tree.get(prop_name) {
                        let logical = format!("{logical}.{prop_name}");
                        let path = format!("{path}[{i}].{prop_name}");
                        if let Some(v) = decode_value(&logical, &path, prop_def, child)? {
                            object.insert(prop_name.clone(), v);
                        }
                    }
                }
                decoded.push(Value::Object(object));
            }
            Ok(Some(Value::Array(decoded)))
        }
    }
}

/// Build a JSON number, preferring integer representation when exact
fn number(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 9_007_199_254_740_992.0 {
        json!(n as i64)
    } else {
        Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}
