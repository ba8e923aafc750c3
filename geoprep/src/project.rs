//! Property projection: rename and reduce the property set of every feature.
//!
//! Used to strip unneeded attributes so the published files stay small.

use tracing::debug;

use crate::error::GeoprepResult;
use crate::model::{Feature, FeatureCollection, Properties};

/// Ordered `output name -> source name` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMapping {
    pairs: Vec<(String, String)>,
}

impl PropertyMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `output <- source` pair.
    pub fn with(mut self, output: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(output, source);
        self
    }

    /// Add or replace the source for an output property.
    pub fn insert(&mut self, output: impl Into<String>, source: impl Into<String>) {
        let output = output.into();
        let source = source.into();
        match self.pairs.iter_mut().find(|(o, _)| *o == output) {
            Some(pair) => pair.1 = source,
            None => self.pairs.push((output, source)),
        }
    }

    /// Mapping used for the published postcode files: the place name and
    /// the postcode under short names.
    pub fn postcode_output() -> Self {
        Self::new()
            .with("ortbez", "ortbez27")
            .with("plz", "postleitzahl")
    }

    /// Iterate over `(output, source)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(o, s)| (o.as_str(), s.as_str()))
    }

    /// Number of output properties.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no pairs are defined.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<O: Into<String>, S: Into<String>> FromIterator<(O, S)> for PropertyMapping {
    fn from_iter<I: IntoIterator<Item = (O, S)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (output, source) in iter {
            mapping.insert(output, source);
        }
        mapping
    }
}

/// Build a new collection whose features carry exactly the output properties
/// of `mapping`.
///
/// Each value is copied from the source property named by the mapping.
/// Geometry and all other feature members pass through unchanged.
///
/// # Errors
///
/// Returns [`GeoprepError::MissingProperty`](crate::GeoprepError::MissingProperty)
/// if a feature lacks a referenced source property. No collection is returned
/// in that case.
pub fn project_properties(
    collection: &FeatureCollection,
    mapping: &PropertyMapping,
) -> GeoprepResult<FeatureCollection> {
    let features = collection
        .iter()
        .enumerate()
        .map(|(index, feature)| project_feature(index, feature, mapping))
        .collect::<GeoprepResult<Vec<_>>>()?;

    debug!(
        features = features.len(),
        properties = mapping.len(),
        "Projected feature properties"
    );

    Ok(FeatureCollection {
        kind: collection.kind.clone(),
        features,
        foreign_members: collection.foreign_members.clone(),
    })
}

fn project_feature(
    index: usize,
    feature: &Feature,
    mapping: &PropertyMapping,
) -> GeoprepResult<Feature> {
    let mut properties = Properties::new();
    for (output, source) in mapping.iter() {
        let value = feature.require(index, source)?;
        properties.insert(output.to_string(), value.clone());
    }

    Ok(Feature {
        properties,
        geometry: feature.geometry.clone(),
        foreign_members: feature.foreign_members.clone(),
    })
}
