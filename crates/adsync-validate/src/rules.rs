//! Cross-field rules: the per-ad-type checks a single field can't express.

use std::collections::BTreeSet;

use adsync_contracts::{
    ad::{AdInstance, FieldValue},
    ad_type::{AdTypeDefinition, CrossFieldRule},
    validation::{AdReport, FieldViolation, ViolationKind},
};

/// Display name of `field` in `definition`, falling back to the id.
fn label<'d>(definition: &'d AdTypeDefinition, field: &'d str) -> &'d str {
    definition
        .field(field)
        .map(|f| f.name.as_str())
        .unwrap_or(field)
}

fn present(ad: &AdInstance, field: &str) -> bool {
    ad.get(field).is_some_and(|v| !v.is_empty())
}

fn non_empty_items(ad: &AdInstance, field: &str) -> Vec<String> {
    match ad.get(field) {
        Some(FieldValue::List(items)) => items
            .iter()
            .filter(|i| !i.is_empty())
            .map(ToString::to_string)
            .collect(),
        Some(v) if !v.is_empty() => vec![v.to_string()],
        _ => Vec::new(),
    }
}

/// Evaluate every rule of `definition` against `ad`, appending to `report`.
pub fn apply_rules(definition: &AdTypeDefinition, ad: &AdInstance, report: &mut AdReport) {
    for rule in &definition.rules {
        match rule {
            CrossFieldRule::MinItems { field, min } => {
                let count = non_empty_items(ad, field).len();
                if count < *min {
                    report.violations.push(
                        FieldViolation::new(
                            field,
                            ViolationKind::CrossField,
                            format!(
                                "{} needs at least {min} items (found {count})",
                                label(definition, field)
                            ),
                        )
                        .expecting(format!("at least {min} items")),
                    );
                }
            }

            CrossFieldRule::MaxItems { field, max } => {
                let count = non_empty_items(ad, field).len();
                if count > *max {
                    report.violations.push(
                        FieldViolation::new(
                            field,
                            ViolationKind::CrossField,
                            format!(
                                "{} allows at most {max} items (found {count})",
                                label(definition, field)
                            ),
                        )
                        .expecting(format!("at most {max} items")),
                    );
                }
            }

            CrossFieldRule::DistinctItems { field } => {
                let mut seen = BTreeSet::new();
                let duplicate = non_empty_items(ad, field)
                    .into_iter()
                    .find(|item| !seen.insert(item.to_lowercase()));
                if let Some(duplicate) = duplicate {
                    report.violations.push(
                        FieldViolation::new(
                            field,
                            ViolationKind::CrossField,
                            format!(
                                "{} must not repeat values ('{duplicate}' appears twice)",
                                label(definition, field)
                            ),
                        )
                        .expecting("distinct values"),
                    );
                }
            }

            CrossFieldRule::RequireAnyOf { fields } => {
                if !fields.iter().any(|f| present(ad, f)) {
                    let names: Vec<&str> = fields.iter().map(|f| label(definition, f)).collect();
                    let first = fields.first().map(String::as_str).unwrap_or_default();
                    report.violations.push(FieldViolation::new(
                        first,
                        ViolationKind::Required,
                        format!("At least one of {} is required", names.join(", ")),
                    ));
                }
            }

            CrossFieldRule::RequireWhen { field, when } => {
                if present(ad, when) && !present(ad, field) {
                    report.violations.push(FieldViolation::new(
                        field,
                        ViolationKind::Required,
                        format!(
                            "{} is required when {} is set",
                            label(definition, field),
                            label(definition, when)
                        ),
                    ));
                }
            }

            CrossFieldRule::RecommendItems { field, count } => {
                let found = non_empty_items(ad, field).len();
                if found < *count {
                    report.warnings.push(format!(
                        "{}: {count} or more items are recommended (found {found})",
                        label(definition, field)
                    ));
                }
            }

            CrossFieldRule::RecommendMaxLength { field, length } => {
                if let Some(value) = ad.get(field) {
                    let chars = value.to_string().chars().count();
                    if chars > *length {
                        report.warnings.push(format!(
                            "{} is longer than the recommended {length} characters ({chars})",
                            label(definition, field)
                        ));
                    }
                }
            }
        }
    }
}
