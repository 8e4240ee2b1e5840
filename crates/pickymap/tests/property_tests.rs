//! Property-based tests for key harmonization and reconciliation.
//!
//! These tests use proptest to generate random keys and rule sets and verify
//! that the map keeps its invariants under all of them.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p pickymap --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p pickymap --test property_tests
//! ```

use proptest::prelude::*;

use pickymap::{OwnedPickyMapState, PickyMap, RuleSet, harmonize};

// =============================================================================
// Test Strategies
// =============================================================================

/// Keys that look like messy column headers.
fn raw_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z]{1,10}( [A-Za-z]{1,10}){0,2}[!?.]?",
        "[a-zA-Z0-9_\\-\\.\\s]{0,30}",
        "\\PC{0,20}",
    ]
}

/// Rule sets whose outputs are fixpoints: regex rules only remove or
/// collapse characters they can never produce again, and literal targets
/// are plain lower-case identifiers.
fn idempotent_rules() -> impl Strategy<Value = RuleSet> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec(("[a-z_]{1,8}", "[a-z_]{1,8}"), 0..4),
    )
        .prop_map(|(fold_case, use_regex, literal)| {
            let mut rules = RuleSet::new()
                .with_fold_case(fold_case)
                .with_literal_replacements(literal);
            if use_regex {
                rules = rules
                    .with_regex_replacements([(r"\s+", "_"), (r"[!?,.]", "")])
                    .expect("static patterns compile");
            }
            rules
        })
        .prop_filter("literal targets must be canonical", |rules| {
            rules.non_idempotent_targets().is_empty()
        })
}

// =============================================================================
// Harmonizer Properties
// =============================================================================

proptest! {
    /// Harmonizing twice equals harmonizing once.
    #[test]
    fn harmonize_is_idempotent(key in raw_key(), rules in idempotent_rules()) {
        let once = harmonize(&key, &rules);
        prop_assert_eq!(harmonize(&once, &rules), once);
    }

    /// Same input, same output.
    #[test]
    fn harmonize_is_deterministic(key in raw_key(), rules in idempotent_rules()) {
        prop_assert_eq!(harmonize(&key, &rules), harmonize(&key, &rules));
    }

    /// With only case folding, output is the lower-cased input.
    #[test]
    fn fold_case_only_lowercases(key in raw_key()) {
        prop_assert_eq!(harmonize(&key, &RuleSet::default()), key.to_lowercase());
    }
}

// =============================================================================
// Map Properties
// =============================================================================

proptest! {
    /// Every stored key is a fixpoint after inserts and a rule change.
    #[test]
    fn stored_keys_stay_canonical(
        keys in prop::collection::vec(raw_key(), 0..20),
        before in idempotent_rules(),
        after in idempotent_rules(),
    ) {
        let mut map = PickyMap::with_rules(before);
        for (i, key) in keys.iter().enumerate() {
            let _ = map.insert(key, i);
        }
        for key in map.keys() {
            prop_assert_eq!(&harmonize(key, map.rules()), key);
        }

        map.set_pickyness(after);
        for key in map.keys() {
            prop_assert_eq!(&harmonize(key, map.rules()), key);
        }
    }

    /// A failed insert leaves the map untouched.
    #[test]
    fn failed_insert_changes_nothing(
        keys in prop::collection::vec(raw_key(), 1..20),
        rules in idempotent_rules(),
    ) {
        let mut map = PickyMap::with_rules(rules);
        for (i, key) in keys.iter().enumerate() {
            let snapshot = map.clone();
            if map.insert(key, i).is_err() {
                prop_assert_eq!(&map, &snapshot);
                prop_assert_eq!(
                    map.keys().collect::<Vec<_>>(),
                    snapshot.keys().collect::<Vec<_>>()
                );
            }
        }
    }

    /// Reconciliation never adds entries and accounts for every removed one.
    #[test]
    fn reconcile_report_accounts_for_every_key(
        keys in prop::collection::vec(raw_key(), 0..20),
        after in idempotent_rules(),
    ) {
        let mut map = PickyMap::with_rules(RuleSet::new().with_fold_case(false));
        for (i, key) in keys.iter().enumerate() {
            let _ = map.insert(key, i);
        }
        let before_len = map.len();

        let report = map.set_pickyness(after);

        prop_assert!(map.len() <= before_len);
        prop_assert_eq!(
            before_len - map.len(),
            report.merged.len() + report.dropped.len()
        );
    }

    /// Round-tripping the persisted state reproduces the map and its rules.
    #[test]
    fn serde_round_trip(
        keys in prop::collection::vec(raw_key(), 0..10),
        rules in idempotent_rules(),
    ) {
        let mut map = PickyMap::with_rules(rules);
        for (i, key) in keys.iter().enumerate() {
            let _ = map.insert(key, vec![i, i * 2]);
        }

        let text = serde_json::to_string(&map.state()).unwrap();
        let state: OwnedPickyMapState<Vec<usize>> = serde_json::from_str(&text).unwrap();
        let restored = state.into_map().unwrap();

        prop_assert_eq!(&restored, &map);
        prop_assert_eq!(restored.rules(), map.rules());
    }
}
