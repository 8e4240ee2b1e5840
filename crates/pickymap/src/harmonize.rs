//! The key harmonization pipeline.
//!
//! Harmonization runs three steps in a fixed order:
//!
//! 1. case folding (when `fold_case` is set),
//! 2. every regex substitution in sequence, each replacing all matches,
//! 3. a single exact-match lookup in the literal replacement table.

use crate::rules::RuleSet;

/// Map a raw key to its canonical form under `rules`.
///
/// Pure and deterministic. For rule sets whose literal targets are
/// themselves canonical (see [`RuleSet::non_idempotent_targets`]), applying
/// it to its own output returns that output unchanged.
///
/// # Example
///
/// ```
/// use pickymap::{harmonize, RuleSet};
///
/// let rules = RuleSet::new().with_literal_replacements([("a", "abc")]);
/// assert_eq!(harmonize("A", &rules), "abc");
/// assert_eq!(harmonize("abc", &rules), "abc");
/// ```
pub fn harmonize(raw_key: &str, rules: &RuleSet) -> String {
    let mut key = if rules.fold_case {
        raw_key.to_lowercase()
    } else {
        raw_key.to_string()
    };

    if let Some(regex_replacements) = &rules.regex_replacements {
        for rule in regex_replacements {
            key = rule.apply(&key);
        }
    }

    if let Some(target) = rules
        .literal_replacements
        .as_ref()
        .and_then(|literal| literal.get(&key))
    {
        key = target.clone();
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn punctuation_rules() -> RuleSet {
        RuleSet::new()
            .with_regex_replacements([(r"\s", "_"), (r"[!?,.]", "")])
            .unwrap()
    }

    #[test]
    fn test_fold_case_default() {
        assert_eq!(harmonize("First Name", &RuleSet::default()), "first name");
    }

    #[test]
    fn test_no_fold_case() {
        let rules = RuleSet::new().with_fold_case(false);
        assert_eq!(harmonize("First Name", &rules), "First Name");
    }

    #[test]
    fn test_fold_case_is_unicode_aware() {
        assert_eq!(harmonize("ÄRGER", &RuleSet::default()), "ärger");
    }

    #[test]
    fn test_regex_applied_in_order() {
        assert_eq!(harmonize("First Name!", &punctuation_rules()), "first_name");
    }

    #[test]
    fn test_regex_order_matters() {
        // Collapse whitespace to "-" first, then turn every "-" into "_"
        let forward = RuleSet::new()
            .with_regex_replacements([(r"\s+", "-"), ("-", "_")])
            .unwrap();
        let reversed = RuleSet::new()
            .with_regex_replacements([("-", "_"), (r"\s+", "-")])
            .unwrap();

        assert_eq!(harmonize("a b-c", &forward), "a_b_c");
        assert_eq!(harmonize("a b-c", &reversed), "a-b_c");
    }

    #[test]
    fn test_regex_replaces_every_match() {
        assert_eq!(harmonize("a b c d", &punctuation_rules()), "a_b_c_d");
    }

    #[test]
    fn test_literal_after_fold() {
        let rules = RuleSet::new().with_literal_replacements([("a", "abc"), ("b", "bcd")]);
        assert_eq!(harmonize("A", &rules), "abc");
        assert_eq!(harmonize("B", &rules), "bcd");
        assert_eq!(harmonize("C", &rules), "c");
    }

    #[test]
    fn test_literal_after_regex() {
        let rules = punctuation_rules().with_literal_replacements([("last_name", "surname")]);
        assert_eq!(harmonize("Last Name", &rules), "surname");
        assert_eq!(harmonize("Last Name?", &rules), "surname");
    }

    #[test]
    fn test_literal_is_single_lookup() {
        // "a" -> "b" must not chain on to "c"
        let rules = RuleSet::new().with_literal_replacements([("a", "b"), ("b", "c")]);
        assert_eq!(harmonize("a", &rules), "b");
    }

    #[test]
    fn test_literal_requires_exact_match() {
        let rules = RuleSet::new().with_literal_replacements([("name", "full_name")]);
        assert_eq!(harmonize("first name", &rules), "first name");
    }

    #[test]
    fn test_idempotent_on_canonical_keys() {
        let rules = punctuation_rules().with_literal_replacements([("last_name", "surname")]);
        for raw in ["First Name!", "Last Name", "  spaced  out ", "plain"] {
            let once = harmonize(raw, &rules);
            assert_eq!(harmonize(&once, &rules), once, "not a fixpoint for {raw:?}");
        }
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(harmonize("", &punctuation_rules()), "");
    }
}
