//! Default values and the `ConfigFile::default()` implementation.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::filter::REGION_ATTRIBUTE;
use crate::offset::SWISS_GRID_OFFSET;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default region list.
pub const DEFAULT_REGIONS: &[&str] = &["ZH"];

/// Default raw national postcode file.
pub const DEFAULT_RAW_FILE: &str = "plz.geojson";

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "geoprep.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            pipeline: PipelineSettings {
                data_dir: PathBuf::from(DEFAULT_DATA_DIR),
                regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
                region_attribute: REGION_ATTRIBUTE.to_string(),
                raw_file: DEFAULT_RAW_FILE.to_string(),
            },
            offset: OffsetSettings {
                enabled: true,
                dx: SWISS_GRID_OFFSET.dx,
                dy: SWISS_GRID_OFFSET.dy,
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
