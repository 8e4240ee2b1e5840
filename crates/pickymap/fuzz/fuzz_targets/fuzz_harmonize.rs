//! Fuzz target for the harmonization pipeline.
//!
//! This fuzzer tests that harmonization:
//! 1. Never panics on any UTF-8 key
//! 2. Never panics on arbitrary literal tables
//! 3. Produces fixpoints whenever the rules report no non-canonical targets

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pickymap::{RuleSet, harmonize};

#[derive(Debug, Arbitrary)]
struct Input {
    key: String,
    fold_case: bool,
    literal: Vec<(String, String)>,
    collapse_whitespace: bool,
}

fuzz_target!(|input: Input| {
    let mut rules = RuleSet::new()
        .with_fold_case(input.fold_case)
        .with_literal_replacements(input.literal);
    if input.collapse_whitespace {
        rules = rules
            .with_regex_replacements([(r"\s+", "_"), (r"[!?,.]", "")])
            .expect("static patterns compile");
    }

    let once = harmonize(&input.key, &rules);
    if rules.non_idempotent_targets().is_empty() {
        assert_eq!(harmonize(&once, &rules), once);
    }
});
