//! Loosely typed partition input
//!
//! Configuration arrives from a user-editable store as arbitrary JSON. These
//! wrappers give the normalizer typed, forgiving accessors over it; nothing
//! else in the crate reads raw input.

use super::types::KNOWN_BAY_KEYS;
use cabinetkit_core::units::parse_length;
use cabinetkit_core::{LayoutError, LayoutResult};
use serde_json::{Map, Value};

/// JSON type name used in error and warning messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A field lookup result that keeps "absent" apart from "present but unusable".
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Field<T> {
    Missing,
    Invalid,
    Value(T),
}

/// Coerce a JSON number or length string to millimeters.
pub(crate) fn coerce_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_length(s).ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Coerce a JSON number or numeric string to an integer, truncating fractions.
pub(crate) fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| v.min(i64::MAX as u64) as i64))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                parse_length(trimmed)
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

/// Raw fields of one partition node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPartition {
    fields: Map<String, Value>,
}

impl RawPartition {
    /// Wrap a top-level raw value. `null` means "no overrides"; any other
    /// non-object value is a caller error.
    pub fn from_value(value: &Value) -> LayoutResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => Ok(Self {
                fields: fields.clone(),
            }),
            other => Err(LayoutError::RawNotObject {
                found: json_type_name(other),
            }),
        }
    }

    /// Wrap a nested value, degrading non-objects to an empty node. The
    /// second element names the JSON type of a discarded value.
    pub(crate) fn nested(value: Option<&Value>) -> (Self, Option<&'static str>) {
        match value {
            None | Some(Value::Null) => (Self::default(), None),
            Some(Value::Object(fields)) => (
                Self {
                    fields: fields.clone(),
                },
                None,
            ),
            Some(other) => (Self::default(), Some(json_type_name(other))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn str_field<T>(&self, key: &str, parse: impl Fn(&str) -> Option<T>) -> Field<T> {
        read_str(self.fields.get(key), parse)
    }

    pub(crate) fn int_field(&self, key: &str) -> Field<i64> {
        read_with(self.fields.get(key), coerce_int)
    }

    /// `bays`, when it is an array.
    pub(crate) fn bays(&self) -> Field<&Vec<Value>> {
        match self.fields.get("bays") {
            None | Some(Value::Null) => Field::Missing,
            Some(Value::Array(items)) => Field::Value(items),
            Some(_) => Field::Invalid,
        }
    }
}

impl From<Map<String, Value>> for RawPartition {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Raw fields of one bay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBay {
    fields: Map<String, Value>,
}

impl RawBay {
    /// Wrap a bay entry; non-objects degrade to an empty bay and report their
    /// JSON type.
    pub(crate) fn from_entry(value: &Value) -> (Self, Option<&'static str>) {
        match value {
            Value::Object(fields) => (
                Self {
                    fields: fields.clone(),
                },
                None,
            ),
            Value::Null => (Self::default(), None),
            other => (Self::default(), Some(json_type_name(other))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub(crate) fn str_field<T>(&self, key: &str, parse: impl Fn(&str) -> Option<T>) -> Field<T> {
        read_str(self.fields.get(key), parse)
    }

    pub(crate) fn int_field(&self, key: &str) -> Field<i64> {
        read_with(self.fields.get(key), coerce_int)
    }

    /// Keys the normalizer does not interpret, in key order.
    pub fn unknown_fields(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(key, _)| !KNOWN_BAY_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl From<Map<String, Value>> for RawBay {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

fn read_str<T>(value: Option<&Value>, parse: impl Fn(&str) -> Option<T>) -> Field<T> {
    match value {
        None | Some(Value::Null) => Field::Missing,
        Some(Value::String(s)) => parse(s).map_or(Field::Invalid, Field::Value),
        Some(_) => Field::Invalid,
    }
}

fn read_with<T>(value: Option<&Value>, coerce: impl Fn(&Value) -> Option<T>) -> Field<T> {
    match value {
        None | Some(Value::Null) => Field::Missing,
        Some(v) => coerce(v).map_or(Field::Invalid, Field::Value),
    }
}
