//! Harmonize command - show canonical keys.

use std::path::PathBuf;

use colored::Colorize;

use super::load_rules;

pub fn run(
    keys: Vec<String>,
    rules: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = load_rules(rules.as_deref())?;

    if verbose {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        println!();
    }

    for key in &keys {
        let canonical = rules.harmonize(key);
        if &canonical == key {
            println!("{} {}", key.white(), "(canonical)".dimmed());
        } else {
            println!("{} → {}", key.white(), canonical.green());
        }
    }

    Ok(())
}
