//! Re-harmonization of stored keys after a rule change.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::harmonize::harmonize;
use crate::map::PickyMap;

/// A stored key that was rewritten during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChange {
    /// Key before the rule change.
    pub from: String,
    /// Canonical key under the new rules.
    pub to: String,
}

/// What a reconciliation pass did to the stored keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Values moved to a new, previously free canonical key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moved: Vec<KeyChange>,

    /// Keys collapsed into an existing entry holding an equal value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged: Vec<KeyChange>,

    /// Keys whose value was dropped because the canonical key already held
    /// a different value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<KeyChange>,
}

impl ReconcileReport {
    /// True if no value was lost.
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty()
    }

    /// True if no stored key changed.
    pub fn is_unchanged(&self) -> bool {
        self.moved.is_empty() && self.merged.is_empty() && self.dropped.is_empty()
    }

    /// Number of stored keys that were rewritten.
    pub fn total_changes(&self) -> usize {
        self.moved.len() + self.merged.len() + self.dropped.len()
    }
}

impl<V: PartialEq> PickyMap<V> {
    /// Bring every stored key back to canonical form under the current rules.
    ///
    /// Keys are visited in storage order. A key whose canonical form is free
    /// is moved there (to the end of the ordering). If the canonical key is
    /// taken by an equal value the duplicate is removed; if it holds a
    /// different value, the existing entry wins, the rewritten key's value
    /// is dropped and a warning is logged. This never fails: aborting
    /// halfway would leave keys that do not match the rules.
    ///
    /// The storage is rebuilt once: keys that are already canonical keep
    /// their order, followed by moved keys in the order they moved.
    pub(crate) fn reconcile(&mut self) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let old = std::mem::take(self.data_mut());
        let rules = self.rules();

        let (keys, values): (Vec<String>, Vec<V>) = old.into_iter().unzip();
        let mut values: Vec<Option<V>> = values.into_iter().map(Some).collect();
        // An original key counts as present until it is itself rewritten
        let position: HashMap<&str, usize> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.as_str(), i))
            .collect();
        let mut moved: IndexMap<String, V> = IndexMap::new();

        for (i, key) in keys.iter().enumerate() {
            let proper = harmonize(key, rules);
            if proper == *key {
                continue;
            }
            let Some(value) = values[i].take() else {
                continue;
            };

            let existing = match position.get(proper.as_str()) {
                Some(&j) => values[j].as_ref(),
                None => None,
            }
            .or_else(|| moved.get(&proper));
            let same_value = existing.map(|existing| *existing == value);

            let change = KeyChange {
                from: key.clone(),
                to: proper,
            };
            match same_value {
                None => {
                    debug!(from = %change.from, to = %change.to, "Moved key to canonical form");
                    moved.insert(change.to.clone(), value);
                    report.moved.push(change);
                }
                Some(true) => {
                    debug!(from = %change.from, to = %change.to, "Merged duplicate key");
                    report.merged.push(change);
                }
                Some(false) => {
                    warn!(
                        from = %change.from,
                        to = %change.to,
                        "Conflicting entries found. Key will now be interpreted as the canonical key, \
                         but the map already holds a different value for it. Keeping the existing value"
                    );
                    report.dropped.push(change);
                }
            }
        }

        let mut rebuilt = IndexMap::with_capacity(keys.len());
        rebuilt.extend(
            keys.into_iter()
                .zip(values)
                .filter_map(|(key, value)| value.map(|value| (key, value))),
        );
        rebuilt.extend(moved);
        *self.data_mut() = rebuilt;

        report
    }
}
