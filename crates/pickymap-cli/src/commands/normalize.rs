//! Normalize command - rewrite the keys of a JSON object.

use std::path::PathBuf;

use colored::Colorize;
use pickymap::PickyMap;

use super::{load_rules, read_object};

pub fn run(
    file: PathBuf,
    rules: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = load_rules(rules.as_deref())?;
    let object = read_object(&file)?;
    let input_len = object.len();

    let map = PickyMap::from_entries(object, rules)?;

    if verbose {
        eprintln!(
            "{} {} keys into {} canonical keys",
            "Normalized".cyan().bold(),
            input_len,
            map.len()
        );
    }

    match output {
        Some(path) => {
            map.save(&path)?;
            println!(
                "{} {}",
                "Saved map to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => println!("{}", map.to_json()?),
    }

    Ok(())
}
