//! Output helpers shared across CLI commands.

use geoprep::pipeline::StageReport;
use tracing::info;

/// Print a finished stage and record it in the log.
pub fn print_report(report: &StageReport) {
    info!(
        stage = report.stage.name(),
        input = report.input_features,
        output = report.output_features,
        path = %report.output.display(),
        "Stage finished"
    );
    println!("✓ {}", report);
}
