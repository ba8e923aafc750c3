//! geoprep CLI - Command-line interface
//!
//! Runs single pipeline stages on explicit files, or the whole per-region
//! build driven by `~/.geoprep/config.ini`.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::build::BuildArgs;
use commands::cleanup::CleanupArgs;
use commands::config::ConfigCommands;
use commands::join::JoinArgs;
use commands::split::SplitArgs;
use commands::validate::ValidateArgs;
use runner::GlobalOptions;

#[derive(Parser)]
#[command(name = "geoprep")]
#[command(version = geoprep::VERSION)]
#[command(about = "Prepare Swiss postcode GeoJSON for web maps", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of ~/.geoprep/config.ini
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging and mirror log events to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep the features of one region that have geometry
    Split {
        /// Raw national GeoJSON file
        #[arg(long)]
        input: PathBuf,

        /// Region code to keep (e.g. ZH)
        #[arg(long)]
        region: String,

        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Property holding the region code (default: from config)
        #[arg(long)]
        attribute: Option<String>,
    },

    /// Shift coordinates and reduce properties to the published set
    Cleanup {
        /// Region file produced by `split`
        #[arg(long)]
        input: PathBuf,

        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Do not apply the coordinate offset
        #[arg(long)]
        no_offset: bool,
    },

    /// Attach postcode polygons to a postcode attribute table
    Join {
        /// Attribute table keyed by plz + zz
        #[arg(long)]
        data: PathBuf,

        /// Polygon layer keyed by PLZ + ZUSZIFF
        #[arg(long)]
        geometry: PathBuf,

        /// Output file
        #[arg(long)]
        output: PathBuf,
    },

    /// Check that every feature has non-empty string properties
    Validate {
        /// File to check
        #[arg(long)]
        input: PathBuf,

        /// Property that must be present and a non-empty string
        #[arg(long = "require", value_name = "PROPERTY", required = true)]
        require: Vec<String>,
    },

    /// Run split and cleanup for every configured region
    Build {
        /// Data directory (default: from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Region to build, repeatable (default: from config)
        #[arg(long = "region", value_name = "REGION")]
        regions: Vec<String>,

        /// Do not apply the coordinate offset
        #[arg(long)]
        no_offset: bool,
    },

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();
    let options = GlobalOptions {
        config: cli.config,
        debug: cli.debug,
    };

    let result = match cli.command {
        Commands::Split {
            input,
            region,
            output,
            attribute,
        } => commands::split::run(
            &options,
            SplitArgs {
                input,
                region,
                output,
                attribute,
            },
        ),
        Commands::Cleanup {
            input,
            output,
            no_offset,
        } => commands::cleanup::run(
            &options,
            CleanupArgs {
                input,
                output,
                no_offset,
            },
        ),
        Commands::Join {
            data,
            geometry,
            output,
        } => commands::join::run(
            &options,
            JoinArgs {
                data,
                geometry,
                output,
            },
        ),
        Commands::Validate { input, require } => {
            commands::validate::run(&options, ValidateArgs { input, require })
        }
        Commands::Build {
            data_dir,
            regions,
            no_offset,
        } => commands::build::run(
            &options,
            BuildArgs {
                data_dir,
                regions,
                no_offset,
            },
        ),
        Commands::Config(command) => commands::config::run(&options, command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
