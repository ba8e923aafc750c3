//! Geometry join: attach the geometry of one dataset to the features of
//! another.
//!
//! The *data* side supplies attributes and decides which features appear in
//! the output and in what order. The *geometry* side only supplies shapes.
//! Features are correlated by keys derived with a [`KeyStrategy`] per side.
//!
//! # Algorithm
//!
//! 1. Compute the key of every data feature and open an empty slot per key.
//! 2. Scan the geometry source once; for every feature whose key has a slot,
//!    store its geometry there. Later features overwrite earlier ones.
//! 3. Copy the data collection, replacing every feature's geometry with its
//!    slot. An empty slot aborts the whole join with
//!    [`GeoprepError::MissingGeometry`].
//!
//! This is linear in the size of both inputs and never returns a partially
//! joined collection.
//!
//! # Example
//!
//! ```
//! use geoprep::join::{join_geometry, CompositeKey};
//! use geoprep::model::FeatureCollection;
//! use serde_json::json;
//!
//! let data = FeatureCollection::from_json(json!({
//!     "type": "FeatureCollection",
//!     "features": [{"properties": {"plz": "8000", "zz": "01"}, "geometry": null}]
//! })).unwrap();
//! let geom = FeatureCollection::from_json(json!({
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "properties": {"PLZ": 8000, "ZUSZIFF": 1},
//!         "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
//!     }]
//! })).unwrap();
//!
//! let joined = join_geometry(
//!     (&data, &CompositeKey::postcode_data()),
//!     (&geom, &CompositeKey::postcode_geometry()),
//! ).unwrap();
//!
//! assert_eq!(joined.features[0].geometry, geom.features[0].geometry);
//! ```

mod key;

pub use key::{CompositeKey, KeyPart, KeyStrategy};

use geojson::Geometry;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{GeoprepError, GeoprepResult};
use crate::model::{Feature, FeatureCollection};

/// One side of a join: a collection and the strategy deriving its keys.
pub type JoinSide<'a> = (&'a FeatureCollection, &'a dyn KeyStrategy);

/// State of a needed key during the join.
#[derive(Debug, Clone, Copy)]
enum Slot<'g> {
    /// No geometry feature with this key has been seen yet.
    Pending,
    /// Geometry of the last matching geometry feature (may be null).
    Found(Option<&'g Geometry>),
}

/// Replace the geometry of every data feature with the geometry of the
/// geometry feature that has the same key.
///
/// The result has the same length, order, properties and top-level members
/// as the data collection. Neither input is modified.
///
/// # Errors
///
/// - [`GeoprepError::MissingGeometry`] if some data key never appears in the
///   geometry source
/// - any error raised by either key strategy
pub fn join_geometry(
    data: JoinSide<'_>,
    geom: JoinSide<'_>,
) -> GeoprepResult<FeatureCollection> {
    let (data_collection, data_key) = data;
    let (geom_collection, geom_key) = geom;

    // 1. remember which keys are needed
    let data_keys = data_collection
        .iter()
        .enumerate()
        .map(|(index, feature)| data_key.key(index, &feature.properties))
        .collect::<GeoprepResult<Vec<_>>>()?;

    let mut slots: HashMap<&str, Slot<'_>> = data_keys
        .iter()
        .map(|key| (key.as_str(), Slot::Pending))
        .collect();

    // 2. single pass over the geometry source
    let mut matched = 0usize;
    for (index, feature) in geom_collection.iter().enumerate() {
        let key = geom_key.key(index, &feature.properties)?;
        if let Some(slot) = slots.get_mut(key.as_str()) {
            if matches!(slot, Slot::Pending) {
                matched += 1;
            }
            *slot = Slot::Found(feature.geometry.as_ref());
        }
    }

    debug!(
        data_strategy = data_key.name(),
        geometry_strategy = geom_key.name(),
        data_features = data_collection.len(),
        needed_keys = slots.len(),
        matched_keys = matched,
        geometry_features = geom_collection.len(),
        "Collected geometry for join"
    );

    // 3. substitute
    let features = data_collection
        .iter()
        .zip(&data_keys)
        .map(|(feature, key)| match slots.get(key.as_str()) {
            Some(&Slot::Found(geometry)) => Ok(Feature {
                properties: feature.properties.clone(),
                geometry: geometry.cloned(),
                foreign_members: feature.foreign_members.clone(),
            }),
            _ => Err(GeoprepError::MissingGeometry { key: key.clone() }),
        })
        .collect::<GeoprepResult<Vec<_>>>()?;

    Ok(FeatureCollection {
        kind: data_collection.kind.clone(),
        features,
        foreign_members: data_collection.foreign_members.clone(),
    })
}
