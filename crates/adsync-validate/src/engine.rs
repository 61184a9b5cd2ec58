//! `FieldValidator`: the `FieldChecker` implementation used by the builder.
//!
//! Whole-ad validation runs in two phases:
//!
//! 1. **Fields**: every field of the ad type, in declaration order.
//! 2. **Rules**: the ad type's cross-field rules, in declaration order.
//!
//! All findings from both phases are collected before returning. The
//! resolved variants run the same phases without the template exemption.

use tracing::debug;

use adsync_contracts::{
    ad::{AdInstance, FieldValue},
    ad_type::AdTypeDefinition,
    field::FieldDefinition,
    validation::{AdReport, FieldViolation},
};
use adsync_core::traits::FieldChecker;

use crate::{
    field::{check_field, check_resolved},
    rules::apply_rules,
};

type FieldCheck = fn(&FieldDefinition, Option<&FieldValue>) -> Vec<FieldViolation>;

/// Stateless type-aware validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator;

impl FieldValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_ad_with(definition: &AdTypeDefinition, ad: &AdInstance, check: FieldCheck) -> AdReport {
        let mut report = AdReport::default();

        // ── Phase 1: field checks ─────────────────────────────────────────────
        for field in &definition.fields {
            let findings = check(field, ad.get(&field.id));
            if !findings.is_empty() {
                debug!(
                    ad_type = %definition.key(),
                    field = %field.id,
                    findings = findings.len(),
                    "field check failed"
                );
            }
            report.violations.extend(findings);
        }

        // ── Phase 2: cross-field rules ────────────────────────────────────────
        apply_rules(definition, ad, &mut report);

        report
    }
}

impl FieldChecker for FieldValidator {
    fn check_field(
        &self,
        definition: &FieldDefinition,
        value: Option<&FieldValue>,
    ) -> Vec<FieldViolation> {
        check_field(definition, value)
    }

    fn check_resolved(
        &self,
        definition: &FieldDefinition,
        value: Option<&FieldValue>,
    ) -> Vec<FieldViolation> {
        check_resolved(definition, value)
    }

    fn check_ad(&self, definition: &AdTypeDefinition, ad: &AdInstance) -> AdReport {
        Self::check_ad_with(definition, ad, check_field)
    }

    fn check_resolved_ad(&self, definition: &AdTypeDefinition, ad: &AdInstance) -> AdReport {
        Self::check_ad_with(definition, ad, check_resolved)
    }
}
