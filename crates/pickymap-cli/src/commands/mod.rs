//! CLI command implementations.

pub mod check;
pub mod harmonize;
pub mod normalize;
pub mod rekey;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use pickymap::RuleSet;
use serde_json::Value;

/// Load a rule set, or the default rules when no file is given.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(RuleSet::load(path)?),
        None => Ok(RuleSet::default()),
    }
}

/// Read a JSON object, keeping its key order.
pub fn read_object(path: &Path) -> Result<IndexMap<String, Value>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let reader = BufReader::new(File::open(path)?);
    let object: IndexMap<String, Value> = serde_json::from_reader(reader)
        .map_err(|e| format!("Expected a JSON object in '{}': {}", path.display(), e))?;
    Ok(object)
}
