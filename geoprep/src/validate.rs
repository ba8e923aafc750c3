//! Per-property validation gate.
//!
//! A [`PropertyChecks`] set is run over a collection before later stages see
//! it. Validation never transforms anything; it either passes or reports the
//! first failing feature/property pair.

use std::fmt;
use std::sync::Arc;

use crate::error::{GeoprepError, GeoprepResult};
use crate::model::{FeatureCollection, PropertyValue};

type Predicate = dyn Fn(&PropertyValue) -> bool + Send + Sync;

/// A named predicate over a single property value.
#[derive(Clone)]
pub struct PropertyCheck {
    name: String,
    predicate: Arc<Predicate>,
}

impl PropertyCheck {
    /// Create a check from a name and a predicate.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&PropertyValue) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Name shown in validation errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate.
    pub fn passes(&self, value: &PropertyValue) -> bool {
        (self.predicate)(value)
    }

    /// Value is a string.
    pub fn is_string() -> Self {
        Self::new("is_string", |v| v.as_str().is_some())
    }

    /// Value is a string with at least one non-whitespace character.
    pub fn non_empty_string() -> Self {
        Self::new("non_empty_string", |v| {
            v.as_str().is_some_and(|s| !s.trim().is_empty())
        })
    }

    /// Value is an integer.
    pub fn is_integer() -> Self {
        Self::new("is_integer", |v| v.is_integer())
    }

    /// Value is a string of exactly `width` ASCII digits, e.g. a zero-padded
    /// postcode suffix.
    pub fn digits(width: usize) -> Self {
        Self::new(format!("digits({})", width), move |v| {
            v.as_str()
                .is_some_and(|s| s.len() == width && s.bytes().all(|b| b.is_ascii_digit()))
        })
    }

    /// Value is an integer within `min..=max`.
    pub fn integer_in_range(min: i64, max: i64) -> Self {
        Self::new(format!("integer_in_range({}, {})", min, max), move |v| {
            v.as_i64().is_some_and(|n| (min..=max).contains(&n))
        })
    }
}

impl fmt::Debug for PropertyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyCheck")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered `(property, check)` pairs.
///
/// A property may appear more than once; checks run in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PropertyChecks {
    checks: Vec<(String, PropertyCheck)>,
}

impl PropertyChecks {
    /// Create an empty check set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check for `property`.
    pub fn with(mut self, property: impl Into<String>, check: PropertyCheck) -> Self {
        self.checks.push((property.into(), check));
        self
    }

    /// Require every listed property to be a non-empty string.
    pub fn require_all<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        properties.into_iter().fold(Self::new(), |checks, property| {
            checks.with(property, PropertyCheck::non_empty_string())
        })
    }

    /// Checks for the joined postcode data: a four digit postcode and a two
    /// digit suffix, both as strings.
    pub fn postcode_data() -> Self {
        Self::new()
            .with("plz", PropertyCheck::digits(4))
            .with("zz", PropertyCheck::digits(2))
    }

    /// Iterate over `(property, check)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyCheck)> {
        self.checks.iter().map(|(p, c)| (p.as_str(), c))
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Assert that every feature satisfies every check.
///
/// # Errors
///
/// Stops at the first failure:
/// - [`GeoprepError::MissingProperty`] if the property is absent
/// - [`GeoprepError::Validation`] if the predicate returns false
pub fn validate_properties(
    collection: &FeatureCollection,
    checks: &PropertyChecks,
) -> GeoprepResult<()> {
    for (index, feature) in collection.iter().enumerate() {
        for (property, check) in checks.iter() {
            let value = feature.require(index, property)?;
            if !check.passes(value) {
                return Err(GeoprepError::Validation {
                    index,
                    property: property.to_string(),
                    check: check.name().to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        features = collection.len(),
        checks = checks.len(),
        "Validated feature properties"
    );
    Ok(())
}
