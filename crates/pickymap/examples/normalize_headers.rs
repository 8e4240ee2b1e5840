//! Example: Load a JSON object and normalize its keys with PickyMap.
//!
//! Usage:
//!   cargo run --example normalize_headers -- <file_path>
//!
//! Example:
//!   cargo run --example normalize_headers -- record.json

use std::env;
use std::fs;

use indexmap::IndexMap;
use pickymap::{PickyMap, RuleSet};
use serde_json::Value;

fn main() -> pickymap::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example normalize_headers -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let text = fs::read_to_string(file_path).map_err(|source| pickymap::PickyError::Io {
        path: file_path.into(),
        source,
    })?;
    let object: IndexMap<String, Value> = serde_json::from_str(&text)?;

    let rules = RuleSet::new()
        .with_regex_replacements([(r"^\s+|\s+$", ""), (r"\s+", "_"), (r"[!?,.]", "")])?
        .with_literal_replacements([("dob", "date_of_birth"), ("last_name", "surname")]);

    let map = PickyMap::from_entries(object, rules)?;
    println!("{}", map.to_json()?);

    Ok(())
}
