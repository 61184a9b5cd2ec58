//! Named filters applied inside placeholders (`{name|uppercase}`).
//!
//! The registry decides which trailing placeholder names are filters and
//! which are data fallbacks: a name is a filter iff the registry knows it.
//! Names can be recognized without being executable; such filters leave the
//! value unchanged.

use std::collections::BTreeSet;

/// The filters the engine knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Uppercase,
    Lowercase,
    Capitalize,
    Titlecase,
    Trim,
}

impl Filter {
    pub const BUILTIN: [(&'static str, Filter); 5] = [
        ("uppercase", Filter::Uppercase),
        ("lowercase", Filter::Lowercase),
        ("capitalize", Filter::Capitalize),
        ("titlecase", Filter::Titlecase),
        ("trim", Filter::Trim),
    ];

    pub fn from_name(name: &str) -> Option<Filter> {
        Self::BUILTIN
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| *f)
    }

    pub fn apply(&self, value: &str) -> String {
        match self {
            Filter::Uppercase => value.to_uppercase(),
            Filter::Lowercase => value.to_lowercase(),
            Filter::Capitalize => capitalize(value),
            Filter::Titlecase => value
                .split(' ')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            Filter::Trim => value.trim().to_string(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The set of names treated as filters.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    names: BTreeSet<String>,
}

impl FilterRegistry {
    /// Only the executable built-in filters.
    pub fn builtin() -> Self {
        Self {
            names: Filter::BUILTIN.iter().map(|(n, _)| n.to_string()).collect(),
        }
    }

    /// Built-ins plus `extra` recognized names.
    pub fn with_names<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::builtin();
        registry.names.extend(extra.into_iter().map(Into::into));
        registry
    }

    pub fn is_filter(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Apply `name` to `value`. Recognized-but-unimplemented filters pass
    /// the value through.
    pub fn apply(&self, name: &str, value: &str) -> String {
        match Filter::from_name(name) {
            Some(filter) => filter.apply(value),
            None => value.to_string(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_filters_transform_text() {
        assert_eq!(Filter::Uppercase.apply("trail runner"), "TRAIL RUNNER");
        assert_eq!(Filter::Lowercase.apply("Trail"), "trail");
        assert_eq!(Filter::Capitalize.apply("trail runner"), "Trail runner");
        assert_eq!(Filter::Titlecase.apply("trail runner"), "Trail Runner");
        assert_eq!(Filter::Trim.apply("  x  "), "x");
    }

    #[test]
    fn extra_names_are_recognized_but_pass_through() {
        let registry = FilterRegistry::with_names(["currency"]);
        assert!(registry.is_filter("currency"));
        assert!(registry.is_filter("uppercase"));
        assert!(!registry.is_filter("brand"));
        assert_eq!(registry.apply("currency", "19.99"), "19.99");
    }
}
