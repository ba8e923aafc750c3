//! Configuration for geoprep runs.
//!
//! Settings are read from `~/.geoprep/config.ini` (or a file given on the
//! command line) and fall back to built-in defaults when the file or a key
//! is missing.
//!
//! # Example
//!
//! ```
//! use geoprep::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.pipeline.regions, vec!["ZH".to_string()]);
//! assert!(config.offset.enabled);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, OffsetSettings, PipelineSettings};
