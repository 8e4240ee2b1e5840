//! Fuzz target for reconciliation.
//!
//! Inserts arbitrary keys, swaps in arbitrary rules and checks that
//! reconciliation never panics and never grows the map.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pickymap::{PickyMap, RuleSet};

#[derive(Debug, Arbitrary)]
struct Input {
    keys: Vec<String>,
    literal: Vec<(String, String)>,
    fold_case: bool,
}

fuzz_target!(|input: Input| {
    let mut map = PickyMap::with_rules(RuleSet::new().with_fold_case(false));
    for (i, key) in input.keys.iter().enumerate() {
        let _ = map.insert(key, i);
    }
    let before = map.len();

    let report = map.set_pickyness(
        RuleSet::new()
            .with_fold_case(input.fold_case)
            .with_literal_replacements(input.literal),
    );

    assert!(map.len() <= before);
    assert_eq!(before - map.len(), report.merged.len() + report.dropped.len());
});
