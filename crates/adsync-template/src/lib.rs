//! # adsync-template
//!
//! The variable template language used inside ad field values.
//!
//! ## Grammar
//!
//! A placeholder is `\{[^{}]+\}`: an opening brace, one or more non-brace
//! characters, a closing brace. Nested braces are not supported. The inner
//! text is a `|`-separated list of names:
//!
//! - `{title}`: substitute the `title` column
//! - `{short_title|title}`: fallback chain, first non-empty value wins
//! - `{brand|uppercase}`: trailing names known to the [`FilterRegistry`]
//!   are filters, everything else is a fallback column
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::collections::BTreeMap;
//! use adsync_template::{extract_variables, interpolate};
//!
//! let mut row = BTreeMap::new();
//! row.insert("title".to_string(), "Trail Runner".to_string());
//! assert_eq!(interpolate("Buy {title}", &row), "Buy Trail Runner");
//! assert_eq!(extract_variables("{a|b}"), vec!["a", "b"]);
//! ```

pub mod filters;
pub mod interpolate;
pub mod placeholder;

pub use filters::{Filter, FilterRegistry};
pub use interpolate::{
    character_count, classify, data_variables, interpolate, resolve, Reference, Row,
};
pub use placeholder::{extract_variables, is_templated, scan, Placeholder};

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Text without braces is never templated and interpolates to itself.
        #[test]
        fn brace_free_text_is_inert(text in "[^{}]{0,64}") {
            let row: BTreeMap<String, String> = BTreeMap::new();
            prop_assert!(!is_templated(&text));
            prop_assert_eq!(interpolate(&text, &row), text.clone());
            prop_assert!(extract_variables(&text).is_empty());
        }

        /// Extraction never reports the same name twice.
        #[test]
        fn extracted_names_are_unique(names in proptest::collection::vec("[a-z]{1,4}", 1..8)) {
            let template = names
                .iter()
                .map(|n| format!("{{{n}}}"))
                .collect::<Vec<_>>()
                .join(" ");
            let vars = extract_variables(&template);
            let mut sorted = vars.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), vars.len());
            prop_assert_eq!(vars.first(), names.first());
        }

        /// With every referenced column present, character_count equals the
        /// length of the fully substituted text.
        #[test]
        fn character_count_matches_substitution(value in "[a-zA-Z ]{0,40}") {
            let mut row = BTreeMap::new();
            row.insert("v".to_string(), value.clone());
            prop_assert_eq!(
                character_count("[{v}]", &row),
                value.chars().count() + 2
            );
        }
    }
}
