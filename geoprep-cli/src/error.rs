//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geoprep::config::ConfigFileError;
use geoprep::GeoprepError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// A pipeline stage failed
    Pipeline(GeoprepError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Pipeline(GeoprepError::MissingGeometry { .. }) => {
                eprintln!();
                eprintln!("The geometry file has no polygon for this postcode. Common causes:");
                eprintln!("  1. The attribute table and the polygon layer are from different releases");
                eprintln!("  2. The files were passed to --data and --geometry the wrong way round");
            }
            CliError::Pipeline(e) if e.is_data_error() => {
                eprintln!();
                eprintln!("The input data was rejected; the failing stage wrote no output.");
            }
            CliError::Pipeline(GeoprepError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                eprintln!();
                eprintln!("Check data_dir and raw_file in the [pipeline] section of config.ini,");
                eprintln!("or run 'geoprep config show' to see the effective values.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Pipeline(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeoprepError> for CliError {
    fn from(e: GeoprepError) -> Self {
        CliError::Pipeline(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
