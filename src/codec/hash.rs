//! Hash codec
//!
//! Converts entities to and from the flat string map stored by `HSET`.
//! Nested objects and tuples are flattened into dotted storage keys
//! (`addr.city`, `pos.0`) on encode and reassembled by the structurally
//! symmetric walk on decode — both directions descend the same definition
//! tree with the same path-building rule, which is what guarantees the
//! round-trip law.
//!
//! Null/absent fields are never written, not even as empty strings. An
//! entity with zero defined fields therefore encodes to an empty map,
//! which the repository layer treats as "this record does not exist".

use crate::codec::{CodecError, CodecResult};
use crate::entity::{Entity, GeoPoint, Value};
use crate::schema::{CompiledSchema, FieldDefinition, FieldType};
use std::collections::HashMap;

/// Encode an entity into a flat storage map
///
/// # Errors
///
/// [`CodecError::InvalidHashInput`] when a value doesn't match its field's
/// declared type, [`CodecError::PointOutOfRange`] for out-of-range geo
/// coordinates.
pub fn encode(entity: &Entity, schema: &CompiledSchema) -> CodecResult<HashMap<String, String>> {
    let mut out = HashMap::new();
    for (name, def) in &schema.definitions {
        if let Some(value) = entity.get(name) {
            if !value.is_null() {
                encode_field(name, storage_segment(name, def), def, value, &mut out)?;
            }
        }
    }
    Ok(out)
}

/// Decode a flat storage map back into an entity
///
/// Storage keys absent from the map yield null (absent) logical fields;
/// keys outside the schema are ignored.
///
/// # Errors
///
/// [`CodecError::InvalidHashValue`] when a stored string can't be parsed
/// as the field's declared type.
pub fn decode(map: &HashMap<String, String>, schema: &CompiledSchema) -> CodecResult<Entity> {
    let mut entity = Entity::new();
    for (name, def) in &schema.definitions {
        if let Some(value) = decode_field(name, storage_segment(name, def), def, map)? {
            entity.set(name.clone(), value);
        }
    }
    Ok(entity)
}

/// Storage-key segment for a field: `field` > `alias` > declared name
///
/// Must stay in lockstep with the schema compiler's path building.
fn storage_segment<'a>(name: &'a str, def: &'a FieldDefinition) -> &'a str {
    def.field
        .as_deref()
        .or(def.alias.as_deref())
        .unwrap_or(name)
}

fn encode_field(
    logical: &str,
    storage: &str,
    def: &FieldDefinition,
    value: &Value,
    out: &mut HashMap<String, String>,
) -> CodecResult<()> {
    match def.field_type {
        FieldType::Object => {
            let Value::Object(map) = value else {
                return Err(mismatch(logical, "object", value));
            };
            for (prop_name, prop_def) in &def.properties {
                if let Some(v) = map.get(prop_name) {
                    if !v.is_null() {
                        let logical = format!("{logical}.{prop_name}");
                        let storage =
                            format!("{storage}.{}", storage_segment(prop_name, prop_def));
                        encode_field(&logical, &storage, prop_def, v, out)?;
                    }
                }
            }
            Ok(())
        }
        FieldType::Tuple => {
            let Value::Tuple(items) = value else {
                return Err(mismatch(logical, "tuple", value));
            };
            for (i, el_def) in def.elements.iter().enumerate() {
                if let Some(v) = items.get(i) {
                    if !v.is_null() {
                        let index = i.to_string();
                        let logical = format!("{logical}.{index}");
                        let storage = format!("{storage}.{}", storage_segment(&index, el_def));
                        encode_field(&logical, &storage, el_def, v, out)?;
                    }
                }
            }
            Ok(())
        }
        // The compiler rejects these under HASH; a hash schema never
        // carries them.
        FieldType::Array | FieldType::Vector => {
            debug_assert!(false, "unreachable field type in hash schema");
            Ok(())
        }
        _ => {
            out.insert(storage.to_string(), stringify_leaf(logical, def, value)?);
            Ok(())
        }
    }
}

/// Convert a leaf value to its stored string form
fn stringify_leaf(logical: &str, def: &FieldDefinition, value: &Value) -> CodecResult<String> {
    match (def.field_type, value) {
        (FieldType::String | FieldType::Text, Value::String(s)) => Ok(s.clone()),
        (FieldType::Number, Value::Number(n)) => Ok(format!("{n}")),
        (FieldType::Boolean, Value::Bool(b)) => Ok(if *b { "1" } else { "0" }.to_string()),
        (FieldType::Date, Value::Date(d)) => Ok(d.timestamp_millis().to_string()),
        (FieldType::Point, Value::Point(p)) => {
            if !p.is_in_range() {
                return Err(CodecError::PointOutOfRange {
                    field: logical.to_string(),
                    longitude: p.longitude,
                    latitude: p.latitude,
                });
            }
            Ok(p.to_string())
        }
        (FieldType::StringArray, Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| stringify_element(logical, item))
                .collect::<CodecResult<_>>()?;
            Ok(parts.join(&def.separator.to_string()))
        }
        (expected, actual) => Err(CodecError::InvalidHashInput {
            field: logical.to_string(),
            expected: expected.as_str(),
            actual: actual.type_name(),
        }),
    }
}

/// Stringify one array element; scalars only
fn stringify_element(logical: &str, value: &Value) -> CodecResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(format!("{n}")),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CodecError::InvalidHashInput {
            field: logical.to_string(),
            expected: "string[]",
            actual: other.type_name(),
        }),
    }
}

fn decode_field(
    logical: &str,
    storage: &str,
    def: &FieldDefinition,
    map: &HashMap<String, String>,
) -> CodecResult<Option<Value>> {
    match def.field_type {
        FieldType::Object => {
            let mut object = HashMap::new();
            for (prop_name, prop_def) in &def.properties {
                let logical = format!("{logical}.{prop_name}");
                let storage = format!("{storage}.{}", storage_segment(prop_name, prop_def));
                if let Some(v) = decode_field(&logical, &storage, prop_def, map)? {
                    object.insert(prop_name.clone(), v);
                }
            }
            if object.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Value::Object(object)))
            }
        }
        FieldType::Tuple => {
            let mut items = Vec::with_capacity(def.elements.len());
            let mut any = false;
            for (i, el_def) in def.elements.iter().enumerate() {
                let index = i.to_string();
                let logical = format!("{logical}.{index}");
                let storage = format!("{storage}.{}", storage_segment(&index, el_def));
                match decode_field(&logical, &storage, el_def, map)? {
                    Some(v) => {
                        any = true;
                        items.push(v);
                    }
                    None => items.push(Value::Null),
                }
            }
            if any {
                Ok(Some(Value::Tuple(items)))
            } else {
                Ok(None)
            }
        }
        FieldType::Array | FieldType::Vector => Ok(None),
        _ => match map.get(storage) {
            Some(raw) => parse_leaf(logical, def, raw).map(Some),
            None => Ok(None),
        },
    }
}

/// Parse a stored string back into a typed value
fn parse_leaf(logical: &str, def: &FieldDefinition, raw: &str) -> CodecResult<Value> {
    let invalid = || CodecError::InvalidHashValue {
        field: logical.to_string(),
        expected: def.field_type.as_str(),
        value: raw.to_string(),
    };
    match def.field_type {
        FieldType::String | FieldType::Text => Ok(Value::String(raw.to_string())),
        FieldType::Number => raw
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| invalid()),
        FieldType::Boolean => match raw {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
        FieldType::Date => raw
            .parse::<i64>()
            .ok()
            .and_then(Value::date_from_epoch_millis)
            .ok_or_else(invalid),
        FieldType::Point => raw
            .parse::<GeoPoint>()
            .map(Value::Point)
            .map_err(|_| invalid()),
        FieldType::StringArray => Ok(Value::Array(
            raw.split(def.separator)
                .map(|s| Value::String(s.to_string()))
                .collect(),
        )),
        // Containers are handled before parse_leaf is reached.
        FieldType::Array | FieldType::Tuple | FieldType::Object | FieldType::Vector => {
            Err(invalid())
        }
    }
}

fn mismatch(logical: &str, expected: &'static str, actual: &Value) -> CodecError {
    CodecError::InvalidHashInput {
        field: logical.to_string(),
        expected,
        actual: actual.type_name(),
    }
}
