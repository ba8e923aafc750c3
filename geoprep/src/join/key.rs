//! Key strategies for correlating features across datasets.
//!
//! Each dataset names and types its identifying attributes differently, so a
//! join is configured with one strategy per side. Both strategies must render
//! the same identity to the same string.

use std::fmt;

use crate::error::{GeoprepError, GeoprepResult};
use crate::model::{Properties, PropertyValue};

/// Derives a join key from a feature's properties.
///
/// Implementations must be pure: the same properties always produce the same
/// key.
pub trait KeyStrategy {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Compute the key for the feature at position `index`.
    ///
    /// `index` is only used for error context.
    fn key(&self, index: usize, properties: &Properties) -> GeoprepResult<String>;
}

/// One fixed-width component of a [`CompositeKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPart {
    /// Property to read
    pub property: String,
    /// Rendered width, zero-padded on the left
    pub width: usize,
}

impl KeyPart {
    /// Create a key part.
    pub fn new(property: impl Into<String>, width: usize) -> Self {
        Self {
            property: property.into(),
            width,
        }
    }

    fn render(&self, index: usize, properties: &Properties) -> GeoprepResult<String> {
        let value = properties
            .get(&self.property)
            .ok_or_else(|| GeoprepError::missing_property(index, &self.property))?;

        let rendered = match value {
            PropertyValue::Integer(n) if *n >= 0 => {
                Some(format!("{:0width$}", n, width = self.width))
            }
            PropertyValue::UInt(n) => Some(format!("{:0width$}", n, width = self.width)),
            PropertyValue::Float(x) if *x >= 0.0 && x.fract() == 0.0 => {
                Some(format!("{:0width$}", *x as u64, width = self.width))
            }
            PropertyValue::String(s) if is_digits(s) => {
                Some(format!("{:0>width$}", s, width = self.width))
            }
            PropertyValue::String(s) if s.chars().count() == self.width => Some(s.clone()),
            _ => None,
        };

        match rendered {
            Some(part) if part.chars().count() == self.width => Ok(part),
            _ => Err(GeoprepError::Validation {
                index,
                property: self.property.clone(),
                check: format!("key part of width {}", self.width),
                value: value.to_string(),
            }),
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Concatenation of fixed-width, zero-padded property values.
///
/// `PLZ = 8000, ZUSZIFF = 1` with widths 4 and 2 renders as `"800001"`, and so
/// does `plz = "8000", zz = "01"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeKey {
    name: String,
    parts: Vec<KeyPart>,
}

impl CompositeKey {
    /// Create a composite key from its parts.
    pub fn new(name: impl Into<String>, parts: Vec<KeyPart>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    /// Postcode attribute table: `plz` (4 digits) + `zz` (2 digit suffix).
    pub fn postcode_data() -> Self {
        Self::new(
            "postcode-data",
            vec![KeyPart::new("plz", 4), KeyPart::new("zz", 2)],
        )
    }

    /// Postcode polygon layer: `PLZ` (4 digits) + `ZUSZIFF` (2 digit suffix).
    pub fn postcode_geometry() -> Self {
        Self::new(
            "postcode-geometry",
            vec![KeyPart::new("PLZ", 4), KeyPart::new("ZUSZIFF", 2)],
        )
    }

    /// The key's parts in order.
    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }
}

impl KeyStrategy for CompositeKey {
    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self, index: usize, properties: &Properties) -> GeoprepResult<String> {
        let mut key = String::new();
        for part in &self.parts {
            key.push_str(&part.render(index, properties)?);
        }
        Ok(key)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}:{}", part.property, part.width)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, PropertyValue)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_postcode_keys_agree() {
        let data = props(&[("plz", "8000".into()), ("zz", "01".into())]);
        let geom = props(&[
            ("PLZ", PropertyValue::Integer(8000)),
            ("ZUSZIFF", PropertyValue::Integer(1)),
        ]);

        let data_key = CompositeKey::postcode_data().key(0, &data).unwrap();
        let geom_key = CompositeKey::postcode_geometry().key(0, &geom).unwrap();

        assert_eq!(data_key, "800001");
        assert_eq!(data_key, geom_key);
    }

    #[test]
    fn test_pads_short_digit_strings() {
        let data = props(&[("plz", "999".into()), ("zz", "0".into())]);
        let key = CompositeKey::postcode_data().key(0, &data).unwrap();
        assert_eq!(key, "099900");
    }

    #[test]
    fn test_integral_float_is_accepted() {
        let geom = props(&[
            ("PLZ", PropertyValue::Float(8000.0)),
            ("ZUSZIFF", PropertyValue::Float(2.0)),
        ]);
        let key = CompositeKey::postcode_geometry().key(0, &geom).unwrap();
        assert_eq!(key, "800002");
    }

    #[test]
    fn test_missing_part_property() {
        let data = props(&[("plz", "8000".into())]);
        let err = CompositeKey::postcode_data().key(5, &data).unwrap_err();
        assert!(matches!(
            err,
            GeoprepError::MissingProperty { index: 5, ref property } if property == "zz"
        ));
    }

    #[test]
    fn test_overflowing_part_is_rejected() {
        let geom = props(&[
            ("PLZ", PropertyValue::Integer(80000)),
            ("ZUSZIFF", PropertyValue::Integer(1)),
        ]);
        let err = CompositeKey::postcode_geometry().key(0, &geom).unwrap_err();
        assert!(matches!(err, GeoprepError::Validation { ref property, .. } if property == "PLZ"));

        let huge = props(&[
            ("PLZ", PropertyValue::UInt(u64::MAX)),
            ("ZUSZIFF", PropertyValue::Integer(1)),
        ]);
        let err = CompositeKey::postcode_geometry().key(0, &huge).unwrap_err();
        assert!(matches!(err, GeoprepError::Validation { ref property, .. } if property == "PLZ"));
    }

    #[test]
    fn test_negative_and_null_are_rejected() {
        let part = KeyPart::new("n", 2);
        let negative = props(&[("n", PropertyValue::Integer(-1))]);
        let null = props(&[("n", PropertyValue::Null)]);
        assert!(part.render(0, &negative).is_err());
        assert!(part.render(0, &null).is_err());
    }

    #[test]
    fn test_exact_width_string_used_verbatim() {
        let part = KeyPart::new("code", 2);
        let p = props(&[("code", "ZH".into())]);
        assert_eq!(part.render(0, &p).unwrap(), "ZH");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CompositeKey::postcode_data().to_string(),
            "postcode-data(plz:4 + zz:2)"
        );
    }
}
