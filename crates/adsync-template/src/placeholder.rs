//! Placeholder grammar and scanning.
//!
//! A placeholder is `{`, one or more non-brace characters, `}`, matched by
//! `\{[^{}]+\}`. Nested braces never match as a whole: in `{a{b}c}` only
//! `{b}` is a placeholder. The inner text is split on `|` into an ordered
//! list of names: `{primary|alt1|alt2}` or `{name|uppercase}`.

use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder grammar must compile"));

/// One `{…}` occurrence inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte offset of the opening brace.
    pub start: usize,
    /// Byte offset one past the closing brace.
    pub end: usize,
    /// Trimmed, non-empty `|`-separated names, in written order.
    pub names: Vec<String>,
}

impl Placeholder {
    /// The first name: always a data variable.
    pub fn primary(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Names after the primary: fallback variables or filters.
    pub fn trailing(&self) -> &[String] {
        self.names.get(1..).unwrap_or(&[])
    }
}

/// Scan `template` for placeholders, left to right.
pub fn scan(template: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            let names = inner
                .as_str()
                .split('|')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
            Some(Placeholder {
                start: whole.start(),
                end: whole.end(),
                names,
            })
        })
        .collect()
}

/// Every name referenced by any placeholder, de-duplicated, in order of
/// first occurrence. Fallbacks and filters are both included.
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for placeholder in scan(template) {
        for name in placeholder.names {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
    }
    seen
}

/// A value counts as templated when it contains both `{` and `}` anywhere.
///
/// Raw length and range checks are skipped for templated values; the
/// interpolated value is checked instead.
pub fn is_templated(value: &str) -> bool {
    value.contains('{') && value.contains('}')
}

/// Rebuild `template`, replacing each placeholder with `render(placeholder)`.
pub(crate) fn substitute<F>(template: &str, mut render: F) -> String
where
    F: FnMut(&Placeholder) -> String,
{
    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for placeholder in scan(template) {
        out.push_str(&template[cursor..placeholder.start]);
        out.push_str(&render(&placeholder));
        cursor = placeholder.end;
    }
    out.push_str(&template[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_reads_names_and_offsets() {
        let found = scan("Buy {product|item} now");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 4);
        assert_eq!(found[0].end, 18);
        assert_eq!(found[0].names, vec!["product", "item"]);
        assert_eq!(found[0].primary(), Some("product"));
        assert_eq!(found[0].trailing(), ["item".to_string()]);
    }

    #[test]
    fn empty_braces_are_not_placeholders() {
        assert!(scan("{}").is_empty());
        assert!(scan("plain text").is_empty());
    }

    #[test]
    fn nested_braces_match_only_the_innermost_run() {
        let found = scan("{a{b}c}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].names, vec!["b"]);
    }

    #[test]
    fn whitespace_around_names_is_trimmed() {
        let found = scan("{ brand | fallback_brand }");
        assert_eq!(found[0].names, vec!["brand", "fallback_brand"]);
    }

    #[test]
    fn extract_variables_dedupes_in_first_occurrence_order() {
        let vars = extract_variables("{b} {a|b} {c|uppercase} {a}");
        assert_eq!(vars, vec!["b", "a", "c", "uppercase"]);
    }

    #[test]
    fn templated_requires_both_braces() {
        assert!(is_templated("Shop {brand}"));
        assert!(is_templated("} odd but {"));
        assert!(!is_templated("Shop {brand"));
        assert!(!is_templated("plain"));
    }
}
