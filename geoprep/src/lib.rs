//! geoprep - GeoJSON preparation for client-side postcode maps
//!
//! Turns open Swiss postcode datasets into small per-canton GeoJSON files:
//! split the national polygons by canton, shift them onto the web-map grid,
//! reduce their properties, and attach polygons to attribute tables by
//! postcode.
//!
//! The transformation functions ([`filter`], [`project`], [`validate`],
//! [`join`], [`offset`]) are pure: they take a [`model::FeatureCollection`]
//! by reference and return a new one. Only [`store`] touches the filesystem.
//!
//! ```
//! use geoprep::filter::filter_region;
//! use geoprep::store;
//!
//! let collection = store::parse(r#"{
//!     "type": "FeatureCollection",
//!     "features": [
//!         {"properties": {"kanton": "ZH"}, "geometry": {"type": "Point", "coordinates": [8.5, 47.4]}},
//!         {"properties": {"kanton": "BE"}, "geometry": {"type": "Point", "coordinates": [7.4, 46.9]}}
//!     ]
//! }"#)?;
//!
//! let zurich = filter_region(&collection, "ZH")?;
//! assert_eq!(zurich.len(), 1);
//! # Ok::<(), geoprep::GeoprepError>(())
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod join;
pub mod logging;
pub mod model;
pub mod offset;
pub mod pipeline;
pub mod project;
pub mod store;
pub mod validate;

pub use error::{GeoprepError, GeoprepResult};

/// Version of the geoprep library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
