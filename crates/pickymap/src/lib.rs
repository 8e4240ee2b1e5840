//! PickyMap: a dictionary that insists on canonical keys.
//!
//! Data gathered from many sources rarely agrees on key spelling: `"Name"`,
//! `"name"`, `"NAME "` and `"full_name"` may all mean the same field.
//! A [`PickyMap`] runs every key through a [`RuleSet`] before storing or
//! looking it up, so all spellings land on one canonical key.
//!
//! # Core Principles
//!
//! - **Canonical storage**: every stored key is already in canonical form
//! - **No silent overwrites**: a rewritten key that lands on existing data fails
//! - **Eager reconciliation**: changing the rules immediately re-keys the map
//!
//! # Example
//!
//! ```
//! use pickymap::{PickyMap, RuleSet};
//! use serde_json::json;
//!
//! let mut map = PickyMap::from_entries(
//!     [("First Name", json!("Peter")), ("Last Name", json!("Petersson"))],
//!     RuleSet::default(),
//! )
//! .unwrap();
//! assert_eq!(map["first name"], json!("Peter"));
//!
//! let rules = RuleSet::new()
//!     .with_regex_replacements([(r"\s", "_")])
//!     .unwrap()
//!     .with_literal_replacements([("last_name", "surname")]);
//! let report = map.set_pickyness(rules);
//!
//! assert!(report.is_lossless());
//! assert_eq!(map["Surname"], json!("Petersson"));
//! assert_eq!(map["First Name"], json!("Peter"));
//! ```

pub mod error;
pub mod harmonize;
pub mod reconcile;
pub mod rules;

mod map;
mod persistence;
mod serialize;

pub use error::{PickyError, Result};
pub use harmonize::harmonize;
pub use map::PickyMap;
pub use reconcile::{KeyChange, ReconcileReport};
pub use rules::{RegexReplacement, RuleSet};
pub use serialize::{OwnedPickyMapState, PickyMapState};
