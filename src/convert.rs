//! JSON interop for [`Value`].
//!
//! Import from [`serde_json::Value`] is total. Export comes in two
//! flavors: [`Value::to_json`] is strict and fails with a path-tracked
//! [`ConvertError`] on anything JSON cannot express, while the
//! [`serde::Serialize`] impl is lossy and mirrors how the values would
//! stringify in their environment of origin: timestamps render as
//! RFC 3339 strings, callable and foreign map entries are omitted,
//! callable and foreign array elements render as null, and tag channels
//! are dropped.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::errors::ConvertError;
use crate::value::{Mapping, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => {
                let mut map = Mapping::new();
                for (key, value) in entries {
                    map.insert(key, Value::from(value));
                }
                Value::Map(map)
            }
        }
    }
}

impl Value {
    /// Strict export to JSON.
    ///
    /// Fails on callables, foreign payloads, and mappings with tagged
    /// entries, reporting the path of the first offender. Timestamps
    /// export as RFC 3339 strings.
    ///
    /// # Examples
    /// ```
    /// use mergeweave::Value;
    /// use serde_json::json;
    ///
    /// let value = Value::from(json!({"a": [1, 2], "b": {"c": true}}));
    /// assert_eq!(value.to_json().unwrap(), json!({"a": [1, 2], "b": {"c": true}}));
    ///
    /// let mut bad = Value::mapping();
    /// bad.as_map_mut()
    ///     .unwrap()
    ///     .insert("f", Value::callable(|_| Value::Null));
    /// assert!(bad.to_json().is_err());
    /// ```
    pub fn to_json(&self) -> Result<serde_json::Value, ConvertError> {
        to_json_at(self, "")
    }
}

/// Tracks the current path for error reporting.
fn to_json_at(value: &Value, path: &str) -> Result<serde_json::Value, ConvertError> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => Ok(serde_json::Value::Number(n.clone())),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Time(t) => Ok(serde_json::Value::String(t.to_rfc3339())),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                out.push(to_json_at(item, &format!("{path}[{idx}]"))?);
            }
            Ok(serde_json::Value::Array(out))
        }
        Value::Map(map) => {
            if map.tag_count() > 0 {
                return Err(ConvertError::TaggedEntries {
                    path: display_path(path),
                    count: map.tag_count(),
                });
            }
            let mut out = serde_json::Map::new();
            for (key, entry) in map.iter() {
                let entry_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                out.insert(key.clone(), to_json_at(entry, &entry_path)?);
            }
            Ok(serde_json::Value::Object(out))
        }
        other @ (Value::Callable(_) | Value::Foreign(_)) => Err(ConvertError::Unrepresentable {
            path: display_path(path),
            kind: other.kind(),
        }),
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

static NULL: Value = Value::Null;

fn lossy(value: &Value) -> &Value {
    match value {
        Value::Callable(_) | Value::Foreign(_) => &NULL,
        other => other,
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Time(t) => serializer.serialize_str(&t.to_rfc3339()),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(lossy(item))?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let entries: Vec<_> = map
                    .iter()
                    .filter(|(_, v)| !matches!(v, Value::Callable(_) | Value::Foreign(_)))
                    .collect();
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Value::Callable(_) | Value::Foreign(_) => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}
