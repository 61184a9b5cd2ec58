//! Fallback policies: degrading an over-long value to fit its limit.
//!
//! Limits count characters, not bytes. Trailing whitespace left by a cut is
//! dropped.

use adsync_contracts::field::FallbackPolicy;

/// Shorten `text` to at most `limit` characters under `policy`.
///
/// Returns `None` for `FallbackPolicy::Error`, which never degrades.
/// Text already within the limit is returned unchanged.
pub fn truncate(text: &str, limit: usize, policy: FallbackPolicy) -> Option<String> {
    if text.chars().count() <= limit {
        return Some(text.to_string());
    }
    match policy {
        FallbackPolicy::Error => None,
        FallbackPolicy::Truncate => Some(hard_cut(text, limit)),
        FallbackPolicy::TruncateWord => Some(word_cut(text, limit)),
    }
}

fn hard_cut(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect::<String>().trim_end().to_string()
}

/// Cut at the last whitespace boundary at or before `limit`. When the text
/// has no boundary in range, fall back to a hard cut.
fn word_cut(text: &str, limit: usize) -> String {
    let prefix: String = text.chars().take(limit).collect();

    // The character right after the prefix being whitespace means the prefix
    // already ends on a word boundary.
    let next_is_space = text
        .chars()
        .nth(limit)
        .is_some_and(char::is_whitespace);
    if next_is_space {
        return prefix.trim_end().to_string();
    }

    match prefix.rfind(char::is_whitespace) {
        Some(idx) => {
            let cut = prefix[..idx].trim_end();
            if cut.is_empty() {
                hard_cut(text, limit)
            } else {
                cut.to_string()
            }
        }
        None => hard_cut(text, limit),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // 46 characters.
    const HEADLINE: &str = "Lightweight trail running shoes for every pace";

    #[test]
    fn headline_fixture_is_46_chars() {
        assert_eq!(HEADLINE.chars().count(), 46);
    }

    #[test]
    fn within_limit_is_unchanged() {
        assert_eq!(truncate("short", 30, FallbackPolicy::Error).as_deref(), Some("short"));
    }

    #[test]
    fn error_policy_never_degrades() {
        assert_eq!(truncate(HEADLINE, 30, FallbackPolicy::Error), None);
    }

    #[test]
    fn hard_truncate_cuts_at_limit() {
        let cut = truncate(HEADLINE, 30, FallbackPolicy::Truncate).unwrap();
        assert_eq!(cut, "Lightweight trail running shoe");
        assert_eq!(cut.chars().count(), 30);
    }

    #[test]
    fn word_truncate_ends_on_word_boundary() {
        let cut = truncate(HEADLINE, 30, FallbackPolicy::TruncateWord).unwrap();
        assert_eq!(cut, "Lightweight trail running");
        assert!(cut.chars().count() <= 30);
        assert!(HEADLINE[cut.len()..].starts_with(' '));
    }

    #[test]
    fn word_truncate_keeps_prefix_ending_exactly_at_boundary() {
        // "Lightweight trail" is 17 chars and followed by a space.
        let cut = truncate(HEADLINE, 17, FallbackPolicy::TruncateWord).unwrap();
        assert_eq!(cut, "Lightweight trail");
    }

    #[test]
    fn word_truncate_without_boundary_hard_cuts() {
        let cut = truncate("Supercalifragilistic", 5, FallbackPolicy::TruncateWord).unwrap();
        assert_eq!(cut, "Super");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let cut = truncate("Ünïcödé wörds everywhere", 7, FallbackPolicy::Truncate).unwrap();
        assert_eq!(cut, "Ünïcödé");
    }

    proptest! {
        #[test]
        fn truncation_never_exceeds_limit(text in "[a-z ]{0,80}", limit in 1usize..60) {
            for policy in [FallbackPolicy::Truncate, FallbackPolicy::TruncateWord] {
                let cut = truncate(&text, limit, policy).unwrap();
                prop_assert!(cut.chars().count() <= limit);
                prop_assert!(text.starts_with(&cut));
            }
        }
    }
}
