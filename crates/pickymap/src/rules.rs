//! Rule sets that define how raw keys are turned into canonical keys.

use indexmap::IndexMap;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::harmonize::harmonize;

/// A single regex substitution applied to every match in a key.
///
/// The replacement string uses the `regex` crate's expansion syntax, so
/// `$1` or `${name}` refer to capture groups and `$$` is a literal `$`.
#[derive(Debug, Clone)]
pub struct RegexReplacement {
    regex: Regex,
    replacement: String,
}

impl RegexReplacement {
    /// Compile a pattern into a replacement rule.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The replacement string.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replace all non-overlapping matches in `key`.
    pub fn apply(&self, key: &str) -> String {
        self.regex
            .replace_all(key, self.replacement.as_str())
            .into_owned()
    }
}

impl PartialEq for RegexReplacement {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern() && self.replacement == other.replacement
    }
}

impl Eq for RegexReplacement {}

// Stored as a `[pattern, replacement]` pair.
impl Serialize for RegexReplacement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.pattern(), self.replacement()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RegexReplacement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (pattern, replacement) = <(String, String)>::deserialize(deserializer)?;
        RegexReplacement::new(&pattern, replacement).map_err(D::Error::custom)
    }
}

/// The combination of case folding, regex substitutions and literal key
/// replacements that defines harmonization.
///
/// # Example
///
/// ```
/// use pickymap::RuleSet;
///
/// let rules = RuleSet::new()
///     .with_regex_replacements([(r"\s", "_"), (r"[!?,.]", "")])
///     .unwrap()
///     .with_literal_replacements([("last_name", "surname")]);
///
/// assert_eq!(rules.harmonize("First Name!"), "first_name");
/// assert_eq!(rules.harmonize("Last Name"), "surname");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Lower-case the whole key before any other rule.
    pub fold_case: bool,

    /// Exact-match substitutions applied after the regex rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal_replacements: Option<IndexMap<String, String>>,

    /// Regex substitutions, applied in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_replacements: Option<Vec<RegexReplacement>>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            fold_case: true,
            literal_replacements: None,
            regex_replacements: None,
        }
    }
}

impl RuleSet {
    /// Create the default rule set (case folding only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether keys are lower-cased.
    pub fn with_fold_case(mut self, fold_case: bool) -> Self {
        self.fold_case = fold_case;
        self
    }

    /// Set the literal replacement table.
    pub fn with_literal_replacements<I, K, V>(mut self, replacements: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.literal_replacements = Some(
            replacements
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        );
        self
    }

    /// Set the ordered regex substitutions, compiling each pattern.
    pub fn with_regex_replacements<I, P, R>(mut self, replacements: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: Into<String>,
    {
        let compiled = replacements
            .into_iter()
            .map(|(pattern, replacement)| RegexReplacement::new(pattern.as_ref(), replacement))
            .collect::<Result<Vec<_>>>()?;
        self.regex_replacements = Some(compiled);
        Ok(self)
    }

    /// Append one regex substitution after the existing ones.
    pub fn with_regex_replacement(
        mut self,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        let rule = RegexReplacement::new(pattern, replacement)?;
        self.regex_replacements.get_or_insert_with(Vec::new).push(rule);
        Ok(self)
    }

    /// Harmonize a raw key under these rules.
    pub fn harmonize(&self, raw_key: &str) -> String {
        harmonize(raw_key, self)
    }

    /// Check whether `key` is already in canonical form.
    pub fn is_canonical(&self, key: &str) -> bool {
        self.harmonize(key) == key
    }

    /// Literal replacement targets that these rules would rewrite again.
    ///
    /// Keys stored under such targets are not fixpoints, so a map using
    /// these rules can drift on the next reconciliation.
    pub fn non_idempotent_targets(&self) -> Vec<&str> {
        let Some(literal) = &self.literal_replacements else {
            return Vec::new();
        };

        let mut targets: Vec<&str> = literal
            .values()
            .map(String::as_str)
            .filter(|target| !self.is_canonical(target))
            .collect();
        targets.sort_unstable();
        targets.dedup();
        targets
    }
}
