//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::offset::Offset;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Where the build reads and writes its files
    pub pipeline: PipelineSettings,
    /// Coordinate offset applied during cleanup
    pub offset: OffsetSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Build configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Directory holding the raw file and all outputs
    pub data_dir: PathBuf,
    /// Region codes built by `geoprep build`, in order
    pub regions: Vec<String>,
    /// Property holding the region code
    pub region_attribute: String,
    /// Raw national file name inside `data_dir`
    pub raw_file: String,
}

/// Coordinate offset configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetSettings {
    pub enabled: bool,
    pub dx: f64,
    pub dy: f64,
}

impl OffsetSettings {
    /// The configured offset, or `None` when disabled.
    pub fn offset(&self) -> Option<Offset> {
        self.enabled.then(|| Offset::new(self.dx, self.dy))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
