//! The picky map: an ordered dictionary that only stores canonical keys.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::ops::Index;

use indexmap::IndexMap;
use tracing::warn;

use crate::error::{PickyError, Result};
use crate::harmonize::harmonize;
use crate::reconcile::ReconcileReport;
use crate::rules::{RegexReplacement, RuleSet};

/// An ordered dictionary that harmonizes every key before storing or
/// looking it up.
///
/// Writes with a key that is already canonical overwrite like a normal
/// map. Writes with a key that had to be rewritten fail with
/// [`PickyError::KeyConflict`] if the canonical key is taken, so two
/// different spellings never silently clobber each other.
///
/// # Example
///
/// ```
/// use pickymap::{PickyMap, RuleSet};
///
/// let rules = RuleSet::new().with_literal_replacements([("a", "abc"), ("b", "bcd"), ("c", "cde")]);
/// let mut map = PickyMap::from_entries([("A", 1), ("B", 2)], rules).unwrap();
/// map.insert("c", 100).unwrap();
///
/// assert_eq!(map.get("abc"), Some(&1));
/// assert_eq!(map.get("C"), Some(&100));
/// assert!(map.insert("b", 5).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PickyMap<V> {
    rules: RuleSet,
    data: IndexMap<String, V>,
}

impl<V> Default for PickyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PickyMap<V> {
    /// Create an empty map with the default rules.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::default(),
            data: IndexMap::new(),
        }
    }

    /// Create an empty map with the given rules.
    pub fn with_rules(rules: RuleSet) -> Self {
        warn_non_idempotent(&rules);
        Self {
            rules,
            data: IndexMap::new(),
        }
    }

    /// Build a map by inserting every entry in order.
    ///
    /// Fails on the first conflict; no partially filled map is returned.
    pub fn from_entries<I, K>(entries: I, rules: RuleSet) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let mut map = Self::with_rules(rules);
        for (key, value) in entries {
            map.insert(key.as_ref(), value)?;
        }
        Ok(map)
    }

    /// The active rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether keys are lower-cased.
    pub fn fold_case(&self) -> bool {
        self.rules.fold_case
    }

    /// A copy of the literal replacement table.
    pub fn literal_replacements(&self) -> Option<IndexMap<String, String>> {
        self.rules.literal_replacements.clone()
    }

    /// A copy of the regex substitutions.
    pub fn regex_replacements(&self) -> Option<Vec<RegexReplacement>> {
        self.rules.regex_replacements.clone()
    }

    /// Harmonize a key under the active rules.
    pub fn harmonize_key(&self, key: &str) -> String {
        harmonize(key, &self.rules)
    }

    /// Insert a value, returning the previous value on a direct overwrite.
    ///
    /// # Errors
    ///
    /// [`PickyError::KeyConflict`] when `key` is not canonical and its
    /// canonical form already holds a value. The map is left unchanged.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        let canonical = self.harmonize_key(key);

        if canonical == key {
            return Ok(self.data.insert(canonical, value));
        }

        if self.data.contains_key(&canonical) {
            return Err(PickyError::KeyConflict {
                key: key.to_string(),
                canonical,
            });
        }

        self.data.insert(canonical, value);
        Ok(None)
    }

    /// Look up a value by any spelling of its key.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.data.get(&self.harmonize_key(key))
    }

    /// Look up a value, failing with [`PickyError::KeyNotFound`] on a miss.
    pub fn try_get(&self, key: &str) -> Result<&V> {
        let canonical = self.harmonize_key(key);
        self.data
            .get(&canonical)
            .ok_or_else(|| PickyError::KeyNotFound {
                key: key.to_string(),
                canonical,
            })
    }

    /// Mutable access to a value. Keys cannot be changed this way.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let canonical = self.harmonize_key(key);
        self.data.get_mut(&canonical)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(&self.harmonize_key(key))
    }

    /// Remove an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let canonical = self.harmonize_key(key);
        self.data.shift_remove(&canonical)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over `(canonical key, value)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.data.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.data.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.data.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, V> {
        self.data.values_mut()
    }

    /// The entries as a plain ordered map.
    ///
    /// Any serde encoder can serialize this view directly.
    pub fn as_map(&self) -> &IndexMap<String, V> {
        &self.data
    }

    /// Consume the map, keeping only the entries.
    pub fn into_map(self) -> IndexMap<String, V> {
        self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut IndexMap<String, V> {
        &mut self.data
    }
}

impl<V: PartialEq> PickyMap<V> {
    /// Replace the whole rule set and re-harmonize every stored key.
    pub fn set_pickyness(&mut self, rules: RuleSet) -> ReconcileReport {
        warn_non_idempotent(&rules);
        self.rules = rules;
        self.reconcile()
    }

    /// Turn case folding on or off and re-harmonize every stored key.
    pub fn set_fold_case(&mut self, fold_case: bool) -> ReconcileReport {
        self.rules.fold_case = fold_case;
        self.reconcile()
    }

    /// Replace the literal replacement table and re-harmonize every stored key.
    pub fn set_literal_replacements(
        &mut self,
        replacements: Option<IndexMap<String, String>>,
    ) -> ReconcileReport {
        self.rules.literal_replacements = replacements;
        warn_non_idempotent(&self.rules);
        self.reconcile()
    }

    /// Replace the regex substitutions and re-harmonize every stored key.
    pub fn set_regex_replacements(
        &mut self,
        replacements: Option<Vec<RegexReplacement>>,
    ) -> ReconcileReport {
        self.rules.regex_replacements = replacements;
        warn_non_idempotent(&self.rules);
        self.reconcile()
    }
}

fn warn_non_idempotent(rules: &RuleSet) {
    for target in rules.non_idempotent_targets() {
        warn!(
            target_key = target,
            canonical = %rules.harmonize(target),
            "Literal replacement target is not canonical under its own rules"
        );
    }
}

impl<V: PartialEq> PartialEq for PickyMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<V: Eq> Eq for PickyMap<V> {}

impl<V: PartialEq, S: BuildHasher> PartialEq<IndexMap<String, V, S>> for PickyMap<V> {
    fn eq(&self, other: &IndexMap<String, V, S>) -> bool {
        self.data.len() == other.len()
            && self
                .data
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: PartialEq, S: BuildHasher> PartialEq<HashMap<String, V, S>> for PickyMap<V> {
    fn eq(&self, other: &HashMap<String, V, S>) -> bool {
        self.data.len() == other.len()
            && self
                .data
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V> Index<&str> for PickyMap<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if no entry exists for the harmonized key.
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key '{key}' not found in PickyMap"),
        }
    }
}

impl<'a, V> IntoIterator for &'a PickyMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<V> IntoIterator for PickyMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn abc_rules() -> RuleSet {
        RuleSet::new().with_literal_replacements([("a", "abc"), ("b", "abc")])
    }

    #[test]
    fn test_default_rules_fold_keys() {
        let map = PickyMap::from_entries([("A", 1), ("B", 2)], RuleSet::default()).unwrap();
        let expected: HashMap<String, i32> =
            [("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
        assert_eq!(map, expected);
    }

    #[test]
    fn test_no_fold_case_keeps_keys() {
        let rules = RuleSet::new().with_fold_case(false);
        let map = PickyMap::from_entries([("A", 1), ("B", 2)], rules).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(map.literal_replacements().is_none());
    }

    #[test]
    fn test_conflict_on_direct_collision() {
        let mut map = PickyMap::with_rules(abc_rules());
        map.insert("A", 1).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["abc"]);

        let err = map.insert("B", 2).unwrap_err();
        match err {
            PickyError::KeyConflict { key, canonical } => {
                assert_eq!(key, "B");
                assert_eq!(canonical, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(map["abc"], 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_direct_overwrite_allowed() {
        let mut map = PickyMap::with_rules(abc_rules());
        map.insert("A", 1).unwrap();

        let previous = map.insert("abc", 99).unwrap();
        assert_eq!(previous, Some(1));
        assert_eq!(map["abc"], 99);
    }

    #[test]
    fn test_non_canonical_write_to_fresh_key() {
        let mut map = PickyMap::new();
        assert_eq!(map.insert("Name", "x").unwrap(), None);
        assert_eq!(map.get("NAME"), Some(&"x"));
    }

    #[test]
    fn test_rewritten_key_conflicts_even_when_same_spelling_after_fold() {
        let mut map = PickyMap::new();
        map.insert("name", 1).unwrap();
        assert!(matches!(
            map.insert("Name", 2),
            Err(PickyError::KeyConflict { .. })
        ));
        assert_eq!(map["name"], 1);
    }

    #[test]
    fn test_bulk_construction_fails_on_conflict() {
        let result = PickyMap::from_entries([("A", 1), ("B", 2)], abc_rules());
        assert!(matches!(result, Err(PickyError::KeyConflict { .. })));
    }

    #[test]
    fn test_try_get_not_found() {
        let map: PickyMap<i32> = PickyMap::new();
        match map.try_get("Missing") {
            Err(PickyError::KeyNotFound { key, canonical }) => {
                assert_eq!(key, "Missing");
                assert_eq!(canonical, "missing");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn test_index_panics_on_miss() {
        let map: PickyMap<i32> = PickyMap::new();
        let _ = map["nope"];
    }

    #[test]
    fn test_remove_harmonizes_and_keeps_order() {
        let mut map = PickyMap::from_entries([("A", 1), ("B", 2), ("C", 3)], RuleSet::default())
            .unwrap();
        assert_eq!(map.remove("B"), Some(2));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(map.remove("B"), None);
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut map = PickyMap::from_entries([("Count", 1)], RuleSet::default()).unwrap();
        *map.get_mut("COUNT").unwrap() += 1;
        assert_eq!(map["count"], 2);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = PickyMap::from_entries([("abc", json!(3.7)), ("def", json!(4.2))], RuleSet::default())
            .unwrap();
        let b = PickyMap::from_entries([("def", json!(4.2)), ("abc", json!(3.7))], RuleSet::default())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_nested_sequence_order() {
        let a = PickyMap::from_entries([("abc", json!(["a", 5, 7.01]))], RuleSet::default()).unwrap();
        let b = PickyMap::from_entries([("abc", json!(["a", 7.01, 5]))], RuleSet::default()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_against_index_map() {
        let map = PickyMap::from_entries([("X", json!(1))], RuleSet::default()).unwrap();
        let mut plain: IndexMap<String, Value> = IndexMap::new();
        plain.insert("x".to_string(), json!(1));
        assert_eq!(map, plain);

        plain.insert("y".to_string(), json!(2));
        assert_ne!(map, plain);
    }

    #[test]
    fn test_getters_return_copies() {
        let rules = abc_rules().with_regex_replacements([(r"\s", "_")]).unwrap();
        let map: PickyMap<i32> = PickyMap::with_rules(rules);

        let mut literal = map.literal_replacements().unwrap();
        literal.insert("z".to_string(), "zzz".to_string());
        assert!(!map.rules().literal_replacements.as_ref().unwrap().contains_key("z"));

        let mut regex = map.regex_replacements().unwrap();
        regex.clear();
        assert_eq!(map.rules().regex_replacements.as_ref().unwrap().len(), 1);
        assert!(map.fold_case());
    }
}
