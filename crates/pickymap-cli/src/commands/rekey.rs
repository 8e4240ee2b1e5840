//! Rekey command - apply new rules to a saved map.

use std::path::PathBuf;

use colored::Colorize;
use pickymap::{PickyMap, RuleSet};
use serde_json::Value;

pub fn run(
    file: PathBuf,
    rules: PathBuf,
    output: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Map file not found: {}", file.display()).into());
    }

    let mut map: PickyMap<Value> = PickyMap::load(&file)?;
    let rules = RuleSet::load(&rules)?;

    let report = map.set_pickyness(rules);

    let target = output.unwrap_or_else(|| file.clone());
    map.save(&target)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Re-keyed".cyan().bold(),
        target.display().to_string().white()
    );
    println!();
    println!("  Moved:   {}", report.moved.len().to_string().green());
    println!("  Merged:  {}", report.merged.len().to_string().blue());
    println!("  Dropped: {}", report.dropped.len().to_string().red());

    if verbose {
        for change in &report.moved {
            println!("    {} → {}", change.from, change.to.green());
        }
    }

    if !report.is_lossless() {
        println!();
        println!("{}", "Dropped values (existing entry kept):".red().bold());
        for change in &report.dropped {
            println!("  {} → {}", change.from, change.to.red());
        }
    }

    Ok(())
}
