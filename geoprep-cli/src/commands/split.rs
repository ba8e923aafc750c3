//! Split command - keep one region of the raw national file.

use std::path::PathBuf;

use geoprep::pipeline::split_by_region;
use geoprep::store::LoadCache;

use super::common::print_report;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the split command.
pub struct SplitArgs {
    pub input: PathBuf,
    pub region: String,
    pub output: PathBuf,
    /// Overrides `pipeline.region_attribute`
    pub attribute: Option<String>,
}

/// Run the split command.
pub fn run(options: &GlobalOptions, args: SplitArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("split");

    let attribute = args
        .attribute
        .as_deref()
        .unwrap_or(&runner.config().pipeline.region_attribute);

    let report = split_by_region(
        &mut LoadCache::new(),
        &args.input,
        attribute,
        &args.region,
        &args.output,
    )?;
    print_report(&report);
    Ok(())
}
