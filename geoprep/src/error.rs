//! Error types for the transformation engine and its storage boundary.
//!
//! Every core operation fails fast: the first violated invariant aborts the
//! whole operation and no partial collection is returned.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by filtering, projection, validation, joining and the
/// load/save boundary.
#[derive(Debug, Error)]
pub enum GeoprepError {
    /// A referenced property is absent from a feature's property map.
    #[error("Feature #{index}: required property \"{property}\" missing")]
    MissingProperty {
        /// Position of the feature within its collection
        index: usize,
        /// Name of the missing property
        property: String,
    },

    /// A registered predicate returned false for a property value.
    #[error("Feature #{index}: property \"{property}\" check '{check}' failed for value {value}")]
    Validation {
        /// Position of the feature within its collection
        index: usize,
        /// Name of the property that was checked
        property: String,
        /// Name of the failed check
        check: String,
        /// Rendered offending value
        value: String,
    },

    /// A data feature's key never appeared in the geometry source.
    #[error("Missing geometry for key {key}")]
    MissingGeometry {
        /// The derived key without a match
        key: String,
    },

    /// A collection lacks required top-level or per-feature structure.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Reading or writing a collection file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A collection file is not valid JSON.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

impl GeoprepError {
    /// Shorthand for a [`GeoprepError::MissingProperty`].
    pub fn missing_property(index: usize, property: impl Into<String>) -> Self {
        GeoprepError::MissingProperty {
            index,
            property: property.into(),
        }
    }

    /// Returns true if this error reports absent or incomplete source data
    /// rather than a broken file.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            GeoprepError::MissingProperty { .. }
                | GeoprepError::Validation { .. }
                | GeoprepError::MissingGeometry { .. }
        )
    }
}

/// Result type for geoprep operations.
pub type GeoprepResult<T> = Result<T, GeoprepError>;
