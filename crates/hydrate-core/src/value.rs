//! # Input Values — The Untyped Data Tree
//!
//! Every transformation starts from a [`Value`]: the closed tree of null,
//! bool, int, float, string, sequence and mapping that decoding JSON (or
//! YAML, or any self-describing format) produces.
//!
//! ## Numeric Kinds
//!
//! Integers and floats are separate variants and are never widened into one
//! another. When converting from `serde_json::Value`:
//!
//! 1. a number representable as `i64` becomes [`Value::Int`];
//! 2. any other number (fractional, exponent form, or an unsigned integer
//!    above `i64::MAX`) becomes [`Value::Float`].
//!
//! This mirrors how the JSON text was written: `1` is an int, `1.0` is a
//! float, and a float-typed field rejects `1`.
//!
//! ## Mappings
//!
//! Mapping keys are always strings and are stored in a `BTreeMap`. Field
//! order is owned by the target type's descriptor, not by the input, so
//! insertion order is deliberately not preserved.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One node of the untyped input tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicit null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered list of values.
    Sequence(Vec<Value>),
    /// String-keyed map of values.
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Parse JSON text into a value tree.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json::Error` if `text` is not valid JSON.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from(json))
    }

    /// Short name of the runtime kind, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key. Always `None` for anything but a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Returns the string if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an int. Floats are not converted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float if this is a float. Ints are not converted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert into a `serde_json::Value`.
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        value.to_json()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Mapping(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => items.serialize(serializer),
            Value::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_stays_int() {
        let v = Value::from_json_str("42").expect("valid json");
        assert_eq!(v, Value::Int(42));
    }

    #[test]
    fn test_fractional_becomes_float() {
        let v = Value::from_json_str("1.5").expect("valid json");
        assert_eq!(v, Value::Float(1.5));
    }

    #[test]
    fn test_float_literal_with_zero_fraction_is_float() {
        // `1.0` was written as a float and must not collapse into an int.
        let v = Value::from_json_str("1.0").expect("valid json");
        assert_eq!(v, Value::Float(1.0));
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let v = Value::from_json_str("18446744073709551615").expect("valid json");
        assert_eq!(v.type_name(), "float");
    }

    #[test]
    fn test_nested_document() {
        let v = Value::from_json_str(r#"{"a": {"b": [1, "two", null, true]}}"#)
            .expect("valid json");
        let items = v
            .get("a")
            .and_then(|a| a.get("b"))
            .and_then(Value::as_sequence)
            .expect("nested sequence");
        assert_eq!(
            items,
            &[
                Value::Int(1),
                Value::String("two".to_string()),
                Value::Null,
                Value::Bool(true)
            ]
        );
    }

    #[test]
    fn test_get_on_non_mapping_is_none() {
        assert!(Value::Sequence(vec![Value::Int(1)]).get("0").is_none());
        assert!(Value::Null.get("a").is_none());
    }

    #[test]
    fn test_accessors_do_not_convert() {
        assert_eq!(Value::Int(3).as_f64(), None);
        assert_eq!(Value::Float(3.0).as_i64(), None);
        assert_eq!(Value::String("true".into()).as_bool(), None);
    }

    #[test]
    fn test_non_finite_float_serializes_as_null() {
        assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    }

    #[test]
    fn test_deserialize_from_yaml_like_source() {
        // Any self-describing deserializer works; serde_json stands in here.
        let v: Value = serde_json::from_str(r#"{"n": 1, "f": 2.5}"#).expect("deserialize");
        assert_eq!(v.get("n"), Some(&Value::Int(1)));
        assert_eq!(v.get("f"), Some(&Value::Float(2.5)));
    }

    #[test]
    fn test_display_is_compact_json() {
        let v = Value::from_json_str(r#"{"b": 2, "a": [true]}"#).expect("valid json");
        assert_eq!(v.to_string(), r#"{"a":[true],"b":2}"#);
    }
}
