//! PickyMap CLI - normalize the keys of JSON objects.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Harmonize { keys, rules } => commands::harmonize::run(keys, rules, cli.verbose),

        Commands::Normalize {
            file,
            rules,
            output,
        } => commands::normalize::run(file, rules, output, cli.verbose),

        Commands::Check { file, rules, json } => commands::check::run(file, rules, json, cli.verbose),

        Commands::Rekey {
            file,
            rules,
            output,
            json,
        } => commands::rekey::run(file, rules, output, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Send library logs to stderr. `PICKYMAP_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PICKYMAP_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
