//! Validate command - check required properties without writing anything.

use std::path::PathBuf;

use geoprep::store;
use geoprep::validate::{validate_properties, PropertyChecks};
use tracing::info;

use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the validate command.
pub struct ValidateArgs {
    pub input: PathBuf,
    /// Properties that must be non-empty strings
    pub require: Vec<String>,
}

/// Run the validate command.
pub fn run(options: &GlobalOptions, args: ValidateArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("validate");

    let collection = store::load(&args.input)?;
    let checks = PropertyChecks::require_all(&args.require);
    validate_properties(&collection, &checks)?;

    info!(features = collection.len(), checks = checks.len(), "Validation passed");
    println!(
        "✓ {} features valid ({})",
        collection.len(),
        args.require.join(", ")
    );
    Ok(())
}
