//! In-memory representation of a GeoJSON feature collection.
//!
//! Features carry a schema-free property map and an optional geometry. The
//! geometry is never interpreted by the transformation engine; it is only
//! copied, dropped or substituted.

mod value;

pub use value::PropertyValue;

use geojson::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{GeoprepError, GeoprepResult};

/// Property map of a feature.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Members of a JSON object that the model does not interpret.
pub type ForeignMembers = serde_json::Map<String, serde_json::Value>;

/// Top-level `type` tag written for newly built collections.
pub const FEATURE_COLLECTION_TYPE: &str = "FeatureCollection";

/// One geographic entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Descriptive attributes.
    pub properties: Properties,

    /// Spatial shape, `None` when the source has `"geometry": null`.
    pub geometry: Option<Geometry>,

    /// Any other members (`"type": "Feature"`, `id`, ...), kept for round trips.
    #[serde(flatten)]
    pub foreign_members: ForeignMembers,
}

impl Feature {
    /// Create a feature with the `"type": "Feature"` tag set.
    pub fn new(properties: Properties, geometry: Option<Geometry>) -> Self {
        let mut foreign_members = ForeignMembers::new();
        foreign_members.insert(
            "type".to_string(),
            serde_json::Value::String("Feature".to_string()),
        );
        Self {
            properties,
            geometry,
            foreign_members,
        }
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Look up a property that must exist.
    ///
    /// `index` is the feature's position in its collection and is only used
    /// to make the error diagnosable.
    pub fn require(&self, index: usize, name: &str) -> GeoprepResult<&PropertyValue> {
        self.properties
            .get(name)
            .ok_or_else(|| GeoprepError::missing_property(index, name))
    }

    /// Returns true if the feature has a geometry.
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }
}

/// An ordered set of features plus a type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// The top-level `type` member, passed through uninterpreted.
    #[serde(rename = "type")]
    pub kind: String,

    /// Features in source order.
    pub features: Vec<Feature>,

    /// Other top-level members (`name`, `crs`, ...).
    #[serde(flatten)]
    pub foreign_members: ForeignMembers,
}

impl FeatureCollection {
    /// Create a `FeatureCollection`-tagged collection from features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self::with_kind(FEATURE_COLLECTION_TYPE, features)
    }

    /// Create a collection with an explicit type tag and no foreign members.
    pub fn with_kind(kind: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            kind: kind.into(),
            features,
            foreign_members: ForeignMembers::new(),
        }
    }

    /// Build a collection from an already-parsed JSON document.
    ///
    /// Structural problems (no `features` array, a feature without
    /// `properties`, an invalid geometry) are reported as
    /// [`GeoprepError::MalformedInput`].
    pub fn from_json(value: serde_json::Value) -> GeoprepResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| GeoprepError::MalformedInput("top level is not an object".into()))?;

        if !object.contains_key("type") {
            return Err(GeoprepError::MalformedInput(
                "missing top-level \"type\"".into(),
            ));
        }
        let features = object
            .get("features")
            .ok_or_else(|| GeoprepError::MalformedInput("missing \"features\"".into()))?
            .as_array()
            .ok_or_else(|| GeoprepError::MalformedInput("\"features\" is not an array".into()))?;

        for (index, feature) in features.iter().enumerate() {
            match feature.get("properties") {
                Some(serde_json::Value::Object(_)) => {}
                Some(serde_json::Value::Null) | None => {
                    return Err(GeoprepError::MalformedInput(format!(
                        "feature #{} has no properties",
                        index
                    )));
                }
                Some(_) => {
                    return Err(GeoprepError::MalformedInput(format!(
                        "feature #{} properties is not an object",
                        index
                    )));
                }
            }
        }

        serde_json::from_value(value).map_err(|e| GeoprepError::MalformedInput(e.to_string()))
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over features in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
