//! CLI runner for common setup.
//!
//! Encapsulates config loading and logging initialization so command
//! handlers only deal with their own stage.

use std::path::PathBuf;

use geoprep::config::{config_file_path, ConfigFile};
use geoprep::logging::{init_logging, LogOptions, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit config file from `--config`
    pub config: Option<PathBuf>,
    /// `--debug`
    pub debug: bool,
}

impl GlobalOptions {
    /// Config file in effect for this invocation.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }

    /// Load the configuration without touching logging.
    pub fn load_config(&self) -> Result<ConfigFile, CliError> {
        Ok(ConfigFile::load_from(&self.config_path())?)
    }
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    pub fn new(options: &GlobalOptions) -> Result<Self, CliError> {
        let config = options.load_config()?;

        let log_options = LogOptions {
            console: options.debug,
            debug: options.debug,
        };
        let logging_guard = init_logging(&config.logging.file, log_options)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("geoprep v{}", geoprep::VERSION);
        info!(command, "geoprep CLI: {} command", command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_prefers_override() {
        let options = GlobalOptions {
            config: Some(PathBuf::from("/tmp/custom.ini")),
            debug: false,
        };
        assert_eq!(options.config_path(), PathBuf::from("/tmp/custom.ini"));
    }

    #[test]
    fn test_config_path_defaults_to_home() {
        assert_eq!(GlobalOptions::default().config_path(), config_file_path());
    }

    #[test]
    fn test_load_config_missing_file_gives_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let options = GlobalOptions {
            config: Some(temp_dir.path().join("none.ini")),
            debug: false,
        };
        assert_eq!(options.load_config().unwrap(), ConfigFile::default());
    }
}
