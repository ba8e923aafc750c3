//! Build command - split and clean up every configured region.

use std::path::PathBuf;

use geoprep::pipeline::build_regions;
use geoprep::store::LoadCache;
use tracing::info;

use super::common::print_report;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the build command.
///
/// Every field overrides the corresponding config value when set.
pub struct BuildArgs {
    pub data_dir: Option<PathBuf>,
    pub regions: Vec<String>,
    pub no_offset: bool,
}

/// Run the build command.
pub fn run(options: &GlobalOptions, args: BuildArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("build");

    let mut plan = runner.config().build_plan();
    if let Some(data_dir) = args.data_dir {
        plan.data_dir = data_dir;
    }
    if !args.regions.is_empty() {
        plan.regions = args.regions;
    }
    if args.no_offset {
        plan.offset = None;
    }

    info!(
        data_dir = %plan.data_dir.display(),
        regions = ?plan.regions,
        "Starting build"
    );

    // one cache for the whole run: the raw file is parsed once
    let mut cache = LoadCache::new();
    let reports = build_regions(&mut cache, &plan)?;
    for report in &reports {
        print_report(report);
    }

    println!(
        "Built {} region(s) in {}",
        plan.regions.len(),
        plan.data_dir.display()
    );
    Ok(())
}
