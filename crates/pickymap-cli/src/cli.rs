//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PickyMap: normalize dictionary keys without losing data
#[derive(Parser)]
#[command(name = "pickymap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the canonical form of one or more keys
    Harmonize {
        /// Keys to harmonize
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,

        /// Rule set file (default: lower-case only)
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Rewrite the keys of a JSON object, failing on conflicting keys
    Normalize {
        /// Path to a JSON file holding a single object
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Rule set file (default: lower-case only)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Save the resulting map, rules included, instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report every key of a JSON object that would conflict
    Check {
        /// Path to a JSON file holding a single object
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Rule set file (default: lower-case only)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply new rules to a saved map and re-key its entries
    Rekey {
        /// Path to a map saved by `normalize --output`
        #[arg(value_name = "MAP_FILE")]
        file: PathBuf,

        /// New rule set file
        #[arg(short, long)]
        rules: PathBuf,

        /// Where to save the re-keyed map (default: overwrite MAP_FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the reconciliation report as JSON
        #[arg(long)]
        json: bool,
    },
}
