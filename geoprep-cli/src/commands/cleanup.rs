//! Cleanup command - offset coordinates and reduce properties.

use std::path::PathBuf;

use geoprep::pipeline::cleanup;
use geoprep::store::LoadCache;

use super::common::print_report;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the cleanup command.
pub struct CleanupArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub no_offset: bool,
}

/// Run the cleanup command.
///
/// The offset comes from the `[offset]` section unless `--no-offset` is set.
pub fn run(options: &GlobalOptions, args: CleanupArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("cleanup");

    let offset = if args.no_offset {
        None
    } else {
        runner.config().offset.offset()
    };

    let report = cleanup(&mut LoadCache::new(), &args.input, &args.output, offset)?;
    print_report(&report);
    Ok(())
}
