//! Region filtering.
//!
//! Splits a national dataset down to one administrative region. Features
//! without geometry are dropped even when their region matches.

use tracing::debug;

use crate::error::GeoprepResult;
use crate::model::{Feature, FeatureCollection, PropertyValue};

/// Property holding the canton code in the Swiss postcode datasets.
pub const REGION_ATTRIBUTE: &str = "kanton";

/// Keep the features of `collection` in `region`, using [`REGION_ATTRIBUTE`].
///
/// See [`filter_region_by`].
pub fn filter_region(
    collection: &FeatureCollection,
    region: &str,
) -> GeoprepResult<FeatureCollection> {
    filter_region_by(collection, REGION_ATTRIBUTE, region)
}

/// Keep the features whose `attribute` equals `region` and whose geometry is
/// not null.
///
/// Relative order is preserved and the top-level `type` is copied. The input
/// is not modified.
///
/// # Errors
///
/// Returns [`GeoprepError::MissingProperty`](crate::GeoprepError::MissingProperty)
/// if a feature with geometry lacks `attribute`. Features without geometry
/// are discarded before the attribute is looked at.
pub fn filter_region_by(
    collection: &FeatureCollection,
    attribute: &str,
    region: &str,
) -> GeoprepResult<FeatureCollection> {
    let mut features = Vec::new();

    for (index, feature) in collection.iter().enumerate() {
        if keep(index, feature, attribute, region)? {
            features.push(feature.clone());
        }
    }

    debug!(
        attribute,
        region,
        input = collection.len(),
        kept = features.len(),
        "Filtered collection by region"
    );

    Ok(FeatureCollection::with_kind(collection.kind.clone(), features))
}

fn keep(index: usize, feature: &Feature, attribute: &str, region: &str) -> GeoprepResult<bool> {
    if !feature.has_geometry() {
        return Ok(false);
    }
    Ok(matches!(
        feature.require(index, attribute)?,
        PropertyValue::String(value) if value == region
    ))
}
