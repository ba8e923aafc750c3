//! Scalar property values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single property value.
///
/// Properties are schema-free, so values are restricted to the JSON scalar
/// types. Arrays and objects that occur in real datasets (centroids, bounding
/// boxes) are carried as [`PropertyValue::Nested`] and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// JSON `null`
    Null,
    /// JSON `true` / `false`
    Bool(bool),
    /// Integral JSON number that fits in an `i64`
    Integer(i64),
    /// Integral JSON number above `i64::MAX`
    UInt(u64),
    /// Any other JSON number
    Float(f64),
    /// JSON string
    String(String),
    /// Array or object, passed through verbatim
    Nested(serde_json::Value),
}

impl PropertyValue {
    /// Returns the string slice if this is a [`PropertyValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`PropertyValue::Integer`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the integer as a `u64` if it is non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PropertyValue::Integer(n) => u64::try_from(*n).ok(),
            PropertyValue::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true for either integral variant.
    pub fn is_integer(&self) -> bool {
        matches!(self, PropertyValue::Integer(_) | PropertyValue::UInt(_))
    }

    /// Returns the value as a float for any numeric variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(n) => Some(*n as f64),
            PropertyValue::UInt(n) => Some(*n as f64),
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`PropertyValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns true for [`PropertyValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Integer(_) | PropertyValue::UInt(_) => "integer",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
            PropertyValue::Nested(_) => "nested",
        }
    }
}

/// Renders the value the way it appears in JSON, so strings are quoted.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Integer(n) => write!(f, "{}", n),
            PropertyValue::UInt(n) => write!(f, "{}", n),
            PropertyValue::Float(x) => write!(f, "{}", x),
            PropertyValue::String(s) => write!(f, "{:?}", s),
            PropertyValue::Nested(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Integer(n)
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        PropertyValue::Integer(n as i64)
    }
}

impl From<u64> for PropertyValue {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(PropertyValue::UInt(n), PropertyValue::Integer)
    }
}

impl From<f64> for PropertyValue {
    fn from(x: f64) -> Self {
        PropertyValue::Float(x)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scalars() {
        let v: PropertyValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, PropertyValue::Null);
        let v: PropertyValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, PropertyValue::Bool(true));
        let v: PropertyValue = serde_json::from_str("8000").unwrap();
        assert_eq!(v, PropertyValue::Integer(8000));
        let v: PropertyValue = serde_json::from_str("47.37").unwrap();
        assert_eq!(v, PropertyValue::Float(47.37));
        let v: PropertyValue = serde_json::from_str("\"ZH\"").unwrap();
        assert_eq!(v, PropertyValue::String("ZH".to_string()));
    }

    #[test]
    fn test_large_integer_keeps_precision() {
        let v: PropertyValue = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(v, PropertyValue::UInt(u64::MAX));
        assert_eq!(v.as_u64(), Some(u64::MAX));
        assert!(v.is_integer());
        assert_eq!(serde_json::to_string(&v).unwrap(), "18446744073709551615");

        let v: PropertyValue = serde_json::from_str("9223372036854775807").unwrap();
        assert_eq!(v, PropertyValue::Integer(i64::MAX));
        let v: PropertyValue = serde_json::from_str("-5").unwrap();
        assert_eq!(v, PropertyValue::Integer(-5));
        assert_eq!(v.as_u64(), None);
    }

    #[test]
    fn test_from_u64_prefers_integer() {
        assert_eq!(PropertyValue::from(8000_u64), PropertyValue::Integer(8000));
        assert_eq!(PropertyValue::from(u64::MAX), PropertyValue::UInt(u64::MAX));
    }

    #[test]
    fn test_deserialize_nested() {
        let v: PropertyValue = serde_json::from_str(r#"{"lat": 47.3, "lon": 8.5}"#).unwrap();
        assert!(matches!(v, PropertyValue::Nested(_)));
        assert_eq!(v.type_name(), "nested");
    }

    #[test]
    fn test_serialize_matches_json() {
        let json = serde_json::to_string(&PropertyValue::from("01")).unwrap();
        assert_eq!(json, "\"01\"");
        let json = serde_json::to_string(&PropertyValue::Null).unwrap();
        assert_eq!(json, "null");
        let json = serde_json::to_string(&PropertyValue::from(1)).unwrap();
        assert_eq!(json, "1");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(PropertyValue::from("ZH").as_str(), Some("ZH"));
        assert_eq!(PropertyValue::from(12).as_i64(), Some(12));
        assert_eq!(PropertyValue::from(12).as_f64(), Some(12.0));
        assert_eq!(PropertyValue::from(false).as_bool(), Some(false));
        assert!(PropertyValue::Null.is_null());
        assert_eq!(PropertyValue::from(1.5).as_i64(), None);
    }

    #[test]
    fn test_display_quotes_strings() {
        assert_eq!(PropertyValue::from("8000").to_string(), "\"8000\"");
        assert_eq!(PropertyValue::from(8000).to_string(), "8000");
    }
}
