//! Serde support and the sorted JSON view.
//!
//! A `PickyMap` serializes as a plain object of its entries, so a map nested
//! inside other values renders the same way a plain map would. The rule set
//! is not part of that form.
//!
//! To keep the rules across a round trip, serialize [`PickyMap::state`]
//! (`{"rules": .., "entries": ..}`) and read it back through
//! [`OwnedPickyMapState`]. Restoring re-inserts every entry under the stored
//! rules, which rejects documents whose keys would collide.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::map::PickyMap;
use crate::rules::RuleSet;

/// Borrowed persisted form of a map: its rules and its entries.
#[derive(Debug, Serialize)]
pub struct PickyMapState<'a, V> {
    pub rules: &'a RuleSet,
    pub entries: &'a IndexMap<String, V>,
}

/// Owned persisted form, as read back from a document.
///
/// Missing `rules` take the defaults, missing `entries` mean an empty map.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnedPickyMapState<V> {
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default = "IndexMap::new")]
    pub entries: IndexMap<String, V>,
}

impl<V> OwnedPickyMapState<V> {
    /// Rebuild the map, harmonizing every entry under the stored rules.
    pub fn into_map(self) -> Result<PickyMap<V>> {
        PickyMap::from_entries(self.entries, self.rules)
    }
}

impl<V> PickyMap<V> {
    /// The persisted form of this map, rules included.
    pub fn state(&self) -> PickyMapState<'_, V> {
        PickyMapState {
            rules: self.rules(),
            entries: self.as_map(),
        }
    }
}

impl<V: Serialize> Serialize for PickyMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.as_map().serialize(serializer)
    }
}

/// Reads a plain object under the default rules.
impl<'de, V: Deserialize<'de>> Deserialize<'de> for PickyMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = IndexMap::<String, V>::deserialize(deserializer)?;
        PickyMap::from_entries(entries, RuleSet::default()).map_err(D::Error::custom)
    }
}

impl<V: Serialize> PickyMap<V> {
    /// Render the entries as indented JSON with keys sorted.
    ///
    /// Values are serialized as they are; nested maps are not harmonized.
    ///
    /// # Example
    ///
    /// ```
    /// use pickymap::{PickyMap, RuleSet};
    ///
    /// let map = PickyMap::from_entries([("B", 2), ("A", 1)], RuleSet::default()).unwrap();
    /// assert_eq!(map.to_json().unwrap(), "{\n  \"a\": 1,\n  \"b\": 2\n}");
    /// ```
    pub fn to_json(&self) -> Result<String> {
        let sorted: BTreeMap<&str, &V> = self.iter().map(|(k, v)| (k.as_str(), v)).collect();
        Ok(serde_json::to_string_pretty(&sorted)?)
    }
}
