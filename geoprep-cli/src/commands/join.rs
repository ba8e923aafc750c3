//! Join command - attach postcode polygons to a postcode attribute table.

use std::path::PathBuf;

use geoprep::pipeline::join_files;
use geoprep::store::LoadCache;

use super::common::print_report;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the join command.
pub struct JoinArgs {
    pub data: PathBuf,
    pub geometry: PathBuf,
    pub output: PathBuf,
}

/// Run the join command.
pub fn run(options: &GlobalOptions, args: JoinArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("join");

    let report = join_files(
        &mut LoadCache::new(),
        &args.data,
        &args.geometry,
        &args.output,
    )?;
    print_report(&report);
    Ok(())
}
