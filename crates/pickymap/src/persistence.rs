//! Persistence for maps and rule sets - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PickyError, Result};
use crate::map::PickyMap;
use crate::rules::RuleSet;
use crate::serialize::OwnedPickyMapState;

impl<V: Serialize> PickyMap<V> {
    /// Save the map, rules included, to a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use pickymap::{PickyMap, RuleSet};
    /// # fn example(map: &PickyMap<serde_json::Value>) -> pickymap::Result<()> {
    /// map.save("metadata.picky.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), &self.state(), "map")
    }
}

impl<V: DeserializeOwned> PickyMap<V> {
    /// Load a map saved with [`PickyMap::save`].
    ///
    /// Entries are re-inserted under the stored rules, so a hand-edited file
    /// with colliding keys fails to load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let state: OwnedPickyMapState<V> = read_json(path, "map")?;
        state.into_map().map_err(|e| {
            PickyError::Persistence(format!("Failed to load map '{}': {}", path.display(), e))
        })
    }
}

impl RuleSet {
    /// Save the rule set to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self, "rule set")
    }

    /// Load a rule set from a JSON file. Missing fields take their defaults.
    ///
    /// ```text
    /// {
    ///   "fold_case": true,
    ///   "literal_replacements": {"last_name": "surname"},
    ///   "regex_replacements": [["\\s", "_"], ["[!?,.]", ""]]
    /// }
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref(), "rule set")
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                PickyError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|source| PickyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value).map_err(|e| {
        PickyError::Persistence(format!("Failed to serialize {}: {}", what, e))
    })?;

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path).map_err(|source| PickyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        PickyError::Persistence(format!(
            "Failed to parse {} '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}
