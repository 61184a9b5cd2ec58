//! Single-field validation.
//!
//! Order of checks:
//!
//! 1. Required and empty → one `Required` violation, nothing else runs.
//! 2. Optional and empty → no violations.
//! 3. Dispatch on the field type. In `check_field`, templated values
//!    (anything containing both `{` and `}`) are exempt from raw length, URL,
//!    and numeric checks, since their final form is only known after
//!    interpolation. `check_resolved` runs on interpolated values and has no
//!    exemption: braces left in them are literal text. Patterns on text
//!    fields always run.
//!
//! Every other finding accumulates, so a caller sees all problems at once.

use regex::Regex;
use tracing::warn;

use adsync_contracts::{
    ad::{format_number, FieldValue},
    field::{FieldDefinition, FieldType},
    validation::{FieldViolation, ViolationKind},
};
use adsync_template::is_templated;

/// Whether placeholders in the value are still waiting for substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Template,
    Resolved,
}

impl Stage {
    /// Checks that need the final text are deferred for templated values.
    fn defers(self, text: &str) -> bool {
        self == Stage::Template && is_templated(text)
    }
}

/// Check `value` against `definition`. `None` means the field is absent.
pub fn check_field(definition: &FieldDefinition, value: Option<&FieldValue>) -> Vec<FieldViolation> {
    check_value(definition, value, Stage::Template)
}

/// Check an interpolated value. Every check runs, whatever the text holds.
pub fn check_resolved(
    definition: &FieldDefinition,
    value: Option<&FieldValue>,
) -> Vec<FieldViolation> {
    check_value(definition, value, Stage::Resolved)
}

fn check_value(
    definition: &FieldDefinition,
    value: Option<&FieldValue>,
    stage: Stage,
) -> Vec<FieldViolation> {
    let name = definition.name.as_str();

    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return if definition.required {
            vec![FieldViolation::new(
                &definition.id,
                ViolationKind::Required,
                format!("{name} is required"),
            )]
        } else {
            Vec::new()
        };
    };

    let mut out = Vec::new();
    match definition.field_type {
        FieldType::Text | FieldType::Textarea => check_text(definition, value, stage, &mut out),
        FieldType::Url => check_url(definition, value, stage, &mut out),
        FieldType::Number => check_number(definition, value, stage, &mut out),
        FieldType::Array => check_array(definition, value, stage, &mut out),
        FieldType::Select => check_select(definition, value, &mut out),
        FieldType::Multiselect => check_multiselect(definition, value, &mut out),
    }
    out
}

/// Message projection of `check_field`.
pub fn validate_field(definition: &FieldDefinition, value: Option<&FieldValue>) -> Vec<String> {
    check_field(definition, value)
        .into_iter()
        .map(|v| v.message)
        .collect()
}

fn violation(definition: &FieldDefinition, kind: ViolationKind, message: String) -> FieldViolation {
    FieldViolation::new(&definition.id, kind, message)
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn check_text(
    definition: &FieldDefinition,
    value: &FieldValue,
    stage: Stage,
    out: &mut Vec<FieldViolation>,
) {
    let name = &definition.name;
    let text = value.to_string();

    if !stage.defers(&text) {
        let length = text.chars().count();
        if let Some(min) = definition.min_length {
            if length < min {
                out.push(
                    violation(
                        definition,
                        ViolationKind::TooShort,
                        format!("{name} must be at least {min} characters"),
                    )
                    .expecting(format!("at least {min} characters")),
                );
            }
        }
        if let Some(max) = definition.max_length {
            if length > max {
                out.push(
                    violation(
                        definition,
                        ViolationKind::TooLong,
                        format!("{name} must be at most {max} characters (currently {length})"),
                    )
                    .expecting(format!("at most {max} characters")),
                );
            }
        }
    }

    if let Some(finding) = check_pattern(definition, &text) {
        out.push(finding);
    }
}

fn check_pattern(definition: &FieldDefinition, text: &str) -> Option<FieldViolation> {
    let pattern = definition.pattern.as_deref()?;
    match Regex::new(pattern) {
        Ok(re) if re.is_match(text) => None,
        Ok(_) => Some(
            violation(
                definition,
                ViolationKind::PatternMismatch,
                format!("{} does not match the required format", definition.name),
            )
            .expecting(format!("a value matching {pattern}")),
        ),
        Err(e) => {
            warn!(field = %definition.id, %pattern, error = %e, "field pattern does not compile");
            Some(violation(
                definition,
                ViolationKind::PatternMismatch,
                format!("{} has an invalid pattern: {e}", definition.name),
            ))
        }
    }
}

// ── URL ───────────────────────────────────────────────────────────────────────

fn check_url(
    definition: &FieldDefinition,
    value: &FieldValue,
    stage: Stage,
    out: &mut Vec<FieldViolation>,
) {
    let text = value.to_string();
    if stage.defers(&text) {
        return;
    }
    let parsed = url::Url::parse(&text).ok().filter(|u| u.has_host());
    if parsed.is_none() {
        out.push(
            violation(
                definition,
                ViolationKind::InvalidUrl,
                format!("{} must be a valid URL", definition.name),
            )
            .expecting("an absolute URL with scheme and host"),
        );
    }
}

// ── Number ────────────────────────────────────────────────────────────────────

fn check_number(
    definition: &FieldDefinition,
    value: &FieldValue,
    stage: Stage,
    out: &mut Vec<FieldViolation>,
) {
    let name = &definition.name;
    let number = match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) if stage.defers(s) => return,
        FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let Some(n) = number.filter(|n| n.is_finite()) else {
        out.push(violation(
            definition,
            ViolationKind::NotANumber,
            format!("{name} must be a number"),
        ));
        return;
    };

    if let Some(min) = definition.min_value {
        if n < min {
            out.push(
                violation(
                    definition,
                    ViolationKind::BelowMinimum,
                    format!("{name} must be at least {}", format_number(min)),
                )
                .expecting(format!(">= {}", format_number(min))),
            );
        }
    }
    if let Some(max) = definition.max_value {
        if n > max {
            out.push(
                violation(
                    definition,
                    ViolationKind::AboveMaximum,
                    format!("{name} must be at most {}", format_number(max)),
                )
                .expecting(format!("<= {}", format_number(max))),
            );
        }
    }
}

// ── Array ─────────────────────────────────────────────────────────────────────

/// A scalar in a list-typed field counts as a one-item list.
fn items(value: &FieldValue) -> &[FieldValue] {
    match value {
        FieldValue::List(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    }
}

fn check_array(
    definition: &FieldDefinition,
    value: &FieldValue,
    stage: Stage,
    out: &mut Vec<FieldViolation>,
) {
    let name = &definition.name;
    let items = items(value);
    let count = items.len();

    if let Some(min) = definition.min_count {
        if count < min {
            out.push(
                violation(
                    definition,
                    ViolationKind::TooFewItems,
                    format!("{name} must have at least {min} items"),
                )
                .expecting(format!("at least {min} items")),
            );
        }
    }
    if let Some(max) = definition.max_count {
        if count > max {
            out.push(
                violation(
                    definition,
                    ViolationKind::TooManyItems,
                    format!("{name} must have at most {max} items"),
                )
                .expecting(format!("at most {max} items")),
            );
        }
    }

    for (i, item) in items.iter().enumerate() {
        let Some(text) = item.as_text().filter(|t| !stage.defers(t)) else {
            continue;
        };
        let position = i + 1;
        if let Some(max) = definition.max_length {
            if text.chars().count() > max {
                out.push(
                    violation(
                        definition,
                        ViolationKind::ItemTooLong,
                        format!("{name} item {position} must be at most {max} characters"),
                    )
                    .expecting(format!("at most {max} characters")),
                );
            }
        }
        if let Some(mut finding) = check_pattern(definition, text) {
            finding.message = format!("{name} item {position}: {}", finding.message);
            out.push(finding);
        }
    }
}

// ── Select ────────────────────────────────────────────────────────────────────

fn option_list(definition: &FieldDefinition) -> String {
    let values: Vec<&str> = definition.options.iter().map(|o| o.value.as_str()).collect();
    format!("one of: {}", values.join(", "))
}

fn check_select(definition: &FieldDefinition, value: &FieldValue, out: &mut Vec<FieldViolation>) {
    if !definition.has_option(&value.to_string()) {
        out.push(
            violation(
                definition,
                ViolationKind::InvalidOption,
                format!("{} has invalid value", definition.name),
            )
            .expecting(option_list(definition)),
        );
    }
}

fn check_multiselect(
    definition: &FieldDefinition,
    value: &FieldValue,
    out: &mut Vec<FieldViolation>,
) {
    for item in items(value) {
        let selected = item.to_string();
        if !definition.has_option(&selected) {
            out.push(
                violation(
                    definition,
                    ViolationKind::InvalidOption,
                    format!("{} has invalid value: {selected}", definition.name),
                )
                .expecting(option_list(definition)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    fn kinds(findings: &[FieldViolation]) -> Vec<ViolationKind> {
        findings.iter().map(|f| f.kind).collect()
    }

    // ── Required / empty ──────────────────────────────────────────────────────

    #[test]
    fn required_and_absent_is_single_error() {
        let def = FieldDefinition::text("headline", "Headline").required().min_length(5);
        assert_eq!(validate_field(&def, None), vec!["Headline is required"]);
        assert_eq!(validate_field(&def, Some(&text(""))), vec!["Headline is required"]);
        assert_eq!(
            validate_field(&def, Some(&FieldValue::List(Vec::new()))),
            vec!["Headline is required"]
        );
    }

    #[test]
    fn optional_and_empty_passes() {
        let def = FieldDefinition::url("link", "Link");
        assert!(validate_field(&def, None).is_empty());
        assert!(validate_field(&def, Some(&text(""))).is_empty());
    }

    // ── Text ──────────────────────────────────────────────────────────────────

    #[test]
    fn text_length_uses_exact_character_count() {
        let def = FieldDefinition::text("headline", "Headline").max_length(5);
        assert!(check_field(&def, Some(&text("Ünïcö"))).is_empty());
        let findings = check_field(&def, Some(&text("Ünïcöd")));
        assert_eq!(kinds(&findings), vec![ViolationKind::TooLong]);
        assert_eq!(findings[0].expected.as_deref(), Some("at most 5 characters"));
    }

    #[test]
    fn text_min_length() {
        let def = FieldDefinition::textarea("body", "Body").min_length(3);
        assert_eq!(kinds(&check_field(&def, Some(&text("ab")))), vec![ViolationKind::TooShort]);
    }

    #[test]
    fn templated_text_skips_length_but_not_pattern() {
        let def = FieldDefinition::text("headline", "Headline")
            .max_length(3)
            .pattern("^[A-Z]");
        let findings = check_field(&def, Some(&text("{product_title}")));
        assert_eq!(kinds(&findings), vec![ViolationKind::PatternMismatch]);
    }

    #[test]
    fn invalid_pattern_is_reported_not_panicked() {
        let def = FieldDefinition::text("sku", "SKU").pattern("([A-Z");
        let findings = check_field(&def, Some(&text("ABC")));
        assert!(findings[0].message.starts_with("SKU has an invalid pattern"));
    }

    // ── URL ───────────────────────────────────────────────────────────────────

    #[test]
    fn url_must_parse_with_host() {
        let def = FieldDefinition::url("final_url", "Final URL");
        assert!(check_field(&def, Some(&text("https://acme.test/p?id=1"))).is_empty());
        for bad in ["acme.test/p", "not a url", "mailto:sales@acme.test"] {
            assert_eq!(
                validate_field(&def, Some(&text(bad))),
                vec!["Final URL must be a valid URL"],
                "{bad}"
            );
        }
    }

    #[test]
    fn templated_url_is_skipped() {
        let def = FieldDefinition::url("final_url", "Final URL");
        assert!(check_field(&def, Some(&text("{landing_page}"))).is_empty());
    }

    #[test]
    fn resolved_braces_are_literal_text() {
        let headline = FieldDefinition::text("headline", "Headline").max_length(30);
        let title = text("Insulated Trail Bottle Set {2 pack} in Forest");
        assert!(check_field(&headline, Some(&title)).is_empty());
        let findings = check_resolved(&headline, Some(&title));
        assert_eq!(kinds(&findings), vec![ViolationKind::TooLong]);
        assert_eq!(findings[0].message, "Headline must be at most 30 characters (currently 45)");

        let url = FieldDefinition::url("final_url", "Final URL");
        assert_eq!(
            kinds(&check_resolved(&url, Some(&text("not a url {at all}")))),
            vec![ViolationKind::InvalidUrl]
        );

        let budget = FieldDefinition::number("budget", "Budget");
        assert_eq!(
            kinds(&check_resolved(&budget, Some(&text("{price}")))),
            vec![ViolationKind::NotANumber]
        );

        let headlines = FieldDefinition::array("headlines", "Headlines").max_length(5);
        assert_eq!(
            kinds(&check_resolved(&headlines, Some(&FieldValue::from(vec!["{templated}"])))),
            vec![ViolationKind::ItemTooLong]
        );
    }

    #[test]
    fn resolved_checks_agree_on_plain_values() {
        let def = FieldDefinition::text("headline", "Headline").required().max_length(5);
        for value in [None, Some(text("short")), Some(text("too long"))] {
            assert_eq!(
                check_resolved(&def, value.as_ref()),
                check_field(&def, value.as_ref())
            );
        }
    }

    // ── Number ────────────────────────────────────────────────────────────────

    #[test]
    fn numeric_strings_are_coerced() {
        let def = FieldDefinition::number("budget", "Budget").min_value(1.0).max_value(100.0);
        assert!(check_field(&def, Some(&text(" 42.5 "))).is_empty());
        assert_eq!(
            validate_field(&def, Some(&FieldValue::from(0.5))),
            vec!["Budget must be at least 1"]
        );
        assert_eq!(
            validate_field(&def, Some(&text("250"))),
            vec!["Budget must be at most 100"]
        );
    }

    #[test]
    fn non_numeric_stops_numeric_checks() {
        let def = FieldDefinition::number("budget", "Budget").min_value(1.0);
        assert_eq!(validate_field(&def, Some(&text("lots"))), vec!["Budget must be a number"]);
        assert!(check_field(&def, Some(&text("{price}"))).is_empty());
    }

    // ── Array ─────────────────────────────────────────────────────────────────

    #[test]
    fn array_counts_apply_even_to_templated_items() {
        let def = FieldDefinition::array("headlines", "Headlines").count(Some(3), Some(4));
        let value = FieldValue::from(vec!["{a}", "{b}"]);
        assert_eq!(
            validate_field(&def, Some(&value)),
            vec!["Headlines must have at least 3 items"]
        );
    }

    #[test]
    fn each_overlong_item_is_reported_by_position() {
        let def = FieldDefinition::array("headlines", "Headlines").max_length(5);
        let value = FieldValue::from(vec!["short", "far too long", "{templated_value}", "again too long"]);
        assert_eq!(
            validate_field(&def, Some(&value)),
            vec![
                "Headlines item 2 must be at most 5 characters",
                "Headlines item 4 must be at most 5 characters",
            ]
        );
    }

    // ── Select ────────────────────────────────────────────────────────────────

    #[test]
    fn select_requires_known_option() {
        let def = FieldDefinition::select("cta", "Call to Action", &[("shop_now", "Shop Now")]);
        assert!(check_field(&def, Some(&text("shop_now"))).is_empty());
        let findings = check_field(&def, Some(&text("Shop Now")));
        assert_eq!(findings[0].message, "Call to Action has invalid value");
        assert_eq!(findings[0].expected.as_deref(), Some("one of: shop_now"));
    }

    #[test]
    fn multiselect_reports_each_invalid_value() {
        let def = FieldDefinition::multiselect(
            "placements",
            "Placements",
            &[("feed", "Feed"), ("stories", "Stories")],
        );
        let value = FieldValue::from(vec!["feed", "reels", "search"]);
        assert_eq!(
            validate_field(&def, Some(&value)),
            vec![
                "Placements has invalid value: reels",
                "Placements has invalid value: search",
            ]
        );
    }
}
