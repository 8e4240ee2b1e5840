//! Check command - report conflicting keys without stopping at the first one.

use std::path::PathBuf;

use colored::Colorize;
use indexmap::IndexMap;
use pickymap::{PickyError, PickyMap};

use super::{load_rules, read_object};

pub fn run(
    file: PathBuf,
    rules: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = load_rules(rules.as_deref())?;
    let object = read_object(&file)?;

    let mut map = PickyMap::with_rules(rules);
    let mut conflicts = Vec::new();
    let mut renamed = Vec::new();
    // Canonical key -> input key that claimed it first
    let mut owners: IndexMap<String, String> = IndexMap::new();

    for (key, value) in object {
        let canonical = map.harmonize_key(&key);
        match map.insert(&key, value) {
            Ok(_) => {
                owners.entry(canonical.clone()).or_insert_with(|| key.clone());
                if canonical != key {
                    renamed.push((key, canonical));
                }
            }
            Err(PickyError::KeyConflict { key, canonical }) => conflicts.push((key, canonical)),
            Err(e) => return Err(e.into()),
        }
    }

    if json_output {
        let status = serde_json::json!({
            "file": file.display().to_string(),
            "keys": map.len() + conflicts.len(),
            "renamed": renamed
                .iter()
                .map(|(from, to)| serde_json::json!({"from": from, "to": to}))
                .collect::<Vec<_>>(),
            "conflicts": conflicts
                .iter()
                .map(|(from, to)| {
                    let mut entry = serde_json::json!({"from": from, "to": to});
                    if verbose {
                        entry["taken_by"] = serde_json::json!(owners.get(to));
                    }
                    entry
                })
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!(
            "{} {}",
            "Key check for".cyan().bold(),
            file.display().to_string().white()
        );
        println!();

        if !renamed.is_empty() {
            println!("{}", "Renamed:".yellow().bold());
            for (from, to) in &renamed {
                println!("  {} → {}", from, to.green());
            }
            println!();
        }

        if verbose {
            println!("{}", "Canonical keys:".cyan().bold());
            for (canonical, source) in &owners {
                if canonical == source {
                    println!("  {}", canonical);
                } else {
                    println!("  {} {}", canonical, format!("(from '{}')", source).dimmed());
                }
            }
            println!();
        }

        if conflicts.is_empty() {
            println!("{}", "No conflicting keys".green());
        } else {
            println!("{}", "Conflicts:".red().bold());
            for (from, to) in &conflicts {
                let note = match owners.get(to) {
                    Some(owner) if verbose => format!("(already taken by '{}')", owner),
                    _ => "(already taken)".to_string(),
                };
                println!("  {} → {} {}", from, to.red(), note.dimmed());
            }
        }
    }

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(format!("{} conflicting key(s)", conflicts.len()).into())
    }
}
