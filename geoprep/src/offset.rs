//! Constant coordinate offset.
//!
//! The Swiss postcode polygons are published in a grid that, once shown on a
//! web map, sits slightly off around Zurich. Instead of a full reprojection
//! the pipeline shifts every position by a constant eyeballed offset.

use geojson::{Geometry, Position, Value};

use crate::model::{Feature, FeatureCollection};

/// Shift applied to longitude (`dx`) and latitude (`dy`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    /// Added to the first ordinate of every position
    pub dx: f64,
    /// Added to the second ordinate of every position
    pub dy: f64,
}

/// Offset that lines the Swiss grid data up with web maps around Zurich.
pub const SWISS_GRID_OFFSET: Offset = Offset {
    dx: -0.00117,
    dy: -0.00133,
};

impl Offset {
    /// Create an offset.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Returns true if applying the offset changes nothing.
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl Default for Offset {
    fn default() -> Self {
        SWISS_GRID_OFFSET
    }
}

/// Return a copy of `collection` with every position of every geometry
/// shifted by `offset`.
///
/// Features without geometry are copied unchanged. Elevation and other extra
/// ordinates are left alone.
pub fn offset_coordinates(collection: &FeatureCollection, offset: Offset) -> FeatureCollection {
    let features = collection
        .iter()
        .map(|feature| Feature {
            properties: feature.properties.clone(),
            geometry: feature.geometry.as_ref().map(|g| offset_geometry(g, offset)),
            foreign_members: feature.foreign_members.clone(),
        })
        .collect();

    FeatureCollection {
        kind: collection.kind.clone(),
        features,
        foreign_members: collection.foreign_members.clone(),
    }
}

fn offset_geometry(geometry: &Geometry, offset: Offset) -> Geometry {
    let mut shifted = geometry.clone();
    shift_value(&mut shifted.value, offset);
    // a stored bbox would no longer match
    if let Some(bbox) = shifted.bbox.as_mut() {
        if bbox.len() >= 4 {
            let half = bbox.len() / 2;
            bbox[0] += offset.dx;
            bbox[1] += offset.dy;
            bbox[half] += offset.dx;
            bbox[half + 1] += offset.dy;
        }
    }
    shifted
}

fn shift_value(value: &mut Value, offset: Offset) {
    match value {
        Value::Point(position) => shift_position(position, offset),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            shift_positions(positions, offset)
        }
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            for line in lines {
                shift_positions(line, offset);
            }
        }
        Value::MultiPolygon(polygons) => {
            for ring in polygons.iter_mut().flatten() {
                shift_positions(ring, offset);
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                shift_value(&mut geometry.value, offset);
            }
        }
    }
}

fn shift_positions(positions: &mut [Position], offset: Offset) {
    for position in positions {
        shift_position(position, offset);
    }
}

fn shift_position(position: &mut Position, offset: Offset) {
    if let [x, y, ..] = position.as_mut_slice() {
        *x += offset.dx;
        *y += offset.dy;
    }
}
