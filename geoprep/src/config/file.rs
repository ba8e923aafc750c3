//! Configuration file handling for ~/.geoprep/config.ini.
//!
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;
use crate::pipeline::BuildPlan;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Render the configuration as it would be written to disk.
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Build plan for `geoprep build` from the pipeline and offset sections.
    pub fn build_plan(&self) -> BuildPlan {
        BuildPlan {
            data_dir: self.pipeline.data_dir.clone(),
            raw_file: self.pipeline.raw_file.clone(),
            region_attribute: self.pipeline.region_attribute.clone(),
            regions: self.pipeline.regions.clone(),
            offset: self.offset.offset(),
        }
    }
}

/// Get the path to the config directory (~/.geoprep).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geoprep")
}

/// Get the path to the config file (~/.geoprep/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::offset::SWISS_GRID_OFFSET;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.pipeline.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.pipeline.regions, vec!["ZH".to_string()]);
        assert_eq!(config.pipeline.region_attribute, "kanton");
        assert_eq!(config.pipeline.raw_file, DEFAULT_RAW_FILE);
        assert_eq!(config.offset.offset(), Some(SWISS_GRID_OFFSET));
        assert!(config.logging.file.ends_with(DEFAULT_LOG_FILE_NAME));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_build_plan_uses_settings() {
        let mut config = ConfigFile::default();
        config.pipeline.regions = vec!["BE".to_string(), "ZH".to_string()];
        config.offset.enabled = false;

        let plan = config.build_plan();

        assert_eq!(plan.regions, vec!["BE".to_string(), "ZH".to_string()]);
        assert_eq!(plan.raw_path(), PathBuf::from(DEFAULT_DATA_DIR).join("plz.geojson"));
        assert!(plan.offset.is_none());
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with(".geoprep/config.ini"));
    }
}
