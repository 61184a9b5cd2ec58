//! # adsync-validate
//!
//! Type-aware validation of ad field values against their definitions.
//!
//! - [`validate_field`] / [`check_field`]: one value, one definition
//! - [`check_resolved`]: the same, for a value already interpolated
//! - [`validate_ad_data`]: a whole ad against its ad type, fields then rules
//! - [`validate_ad_type`]: registry lookup, then `validate_ad_data`
//! - [`FieldValidator`]: the `FieldChecker` handed to the sync-preview builder
//!
//! Every entry point returns findings as data. Nothing here fails with an
//! `Err`.

pub mod engine;
pub mod field;
pub mod rules;

pub use engine::FieldValidator;
pub use field::{check_field, check_resolved, validate_field};

use adsync_contracts::{
    ad::AdInstance,
    ad_type::AdTypeDefinition,
    error::AdsyncError,
    platform::Platform,
    validation::ValidationResult,
};
use adsync_core::traits::{AdTypeSource, FieldChecker};

/// Validate every field of `ad`, then the ad type's cross-field rules.
pub fn validate_ad_data(definition: &AdTypeDefinition, ad: &AdInstance) -> ValidationResult {
    FieldValidator.check_ad(definition, ad).into_result()
}

/// Look up `(platform, id)` and validate `ad` against it.
///
/// A missing ad type is the only outcome that short-circuits: the result
/// carries a single error naming the type and platform.
pub fn validate_ad_type(
    source: &dyn AdTypeSource,
    platform: Platform,
    id: &str,
    ad: &AdInstance,
) -> ValidationResult {
    match source.get(platform, id) {
        Some(definition) => validate_ad_data(definition, ad),
        None => ValidationResult::error(
            AdsyncError::UnknownAdType {
                platform: platform.to_string(),
                ad_type: id.to_string(),
            }
            .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use adsync_contracts::ad::FieldValue;
    use adsync_registry::AdTypeRegistry;

    use super::*;

    fn ad(pairs: Vec<(&str, FieldValue)>) -> AdInstance {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn rsa(headlines: Vec<&str>) -> AdInstance {
        ad(vec![
            ("headlines", FieldValue::from(headlines)),
            (
                "descriptions",
                FieldValue::from(vec!["Free shipping on every order", "Returns within 60 days"]),
            ),
            ("final_url", FieldValue::from("https://acme.test/trail")),
        ])
    }

    // ── validate_ad_type ──────────────────────────────────────────────────────

    #[test]
    fn unknown_ad_type_is_single_error() {
        let registry = AdTypeRegistry::with_builtins();
        let result = validate_ad_type(&registry, Platform::Meta, "hologram", &AdInstance::new());
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec!["ad type 'hologram' is not registered for platform 'meta'"]
        );
    }

    #[test]
    fn complete_responsive_search_ad_is_valid() {
        let registry = AdTypeRegistry::with_builtins();
        let result = validate_ad_type(
            &registry,
            Platform::Google,
            "responsive_search",
            &rsa(vec!["Trail Runner 2", "Built for Mud", "Ships Free Today"]),
        );
        assert!(result.valid, "{:?}", result.errors);
        // Fewer than the recommended eight headlines.
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn field_errors_precede_rule_errors() {
        let registry = AdTypeRegistry::with_builtins();
        let instance = rsa(vec!["Trail Runner", "Trail Runner"]);
        let result = validate_ad_type(&registry, Platform::Google, "responsive_search", &instance);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Headlines must have at least 3 items",
                "Headlines must not repeat values ('Trail Runner' appears twice)",
            ]
        );
    }

    #[test]
    fn missing_required_fields_accumulate() {
        let registry = AdTypeRegistry::with_builtins();
        let result = validate_ad_type(&registry, Platform::Tiktok, "in_feed", &AdInstance::new());
        assert_eq!(
            result.errors,
            vec![
                "Ad Text is required",
                "Display Name is required",
                "Landing Page URL is required",
                "Call to Action is required",
            ]
        );
    }

    #[test]
    fn promoted_post_checks_numeric_ranges() {
        let registry = AdTypeRegistry::with_builtins();
        let instance = ad(vec![
            ("post_id", FieldValue::from("1234567890")),
            ("objective", FieldValue::from("reach")),
            ("budget", FieldValue::from("0")),
            ("duration_days", FieldValue::from(45.0)),
        ]);
        let result = validate_ad_type(&registry, Platform::Meta, "boosted_post", &instance);
        assert_eq!(
            result.errors,
            vec!["Daily Budget must be at least 1", "Duration (days) must be at most 30"]
        );
    }

    #[test]
    fn recommendations_do_not_block() {
        let registry = AdTypeRegistry::with_builtins();
        let long_text = "Our lightest trail shoe yet. ".repeat(6);
        let instance = ad(vec![
            ("primary_text", FieldValue::from(long_text)),
            ("final_url", FieldValue::from("https://acme.test")),
        ]);
        let result = validate_ad_type(&registry, Platform::Meta, "single_image", &instance);
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
    }

    // ── FieldValidator ────────────────────────────────────────────────────────

    #[test]
    fn field_validator_delegates_to_check_field() {
        let def = adsync_contracts::field::FieldDefinition::url("final_url", "Final URL").required();
        let findings = FieldValidator::new().check_field(&def, Some(&FieldValue::from("nope")));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings, check_field(&def, Some(&FieldValue::from("nope"))));
    }

    #[test]
    fn resolved_ad_check_has_no_template_exemption() {
        let registry = AdTypeRegistry::with_builtins();
        let definition = registry.require(Platform::Linkedin, "text_ad").unwrap();
        let instance = ad(vec![
            ("headline", FieldValue::from("Trekking Poles {2 pack} this week")),
            ("description", FieldValue::from("Carbon poles from Northpeak")),
            ("final_url", FieldValue::from("not a url {at all}")),
        ]);

        assert!(FieldValidator.check_ad(definition, &instance).is_valid());
        let report = FieldValidator.check_resolved_ad(definition, &instance);
        let fields: Vec<&str> = report.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["headline", "final_url"]);
    }

    #[test]
    fn every_builtin_type_reports_empty_ads_without_panicking() {
        let registry = AdTypeRegistry::with_builtins();
        for definition in registry.all() {
            let result = validate_ad_data(definition, &AdInstance::new());
            let required = definition.fields.iter().filter(|f| f.required).count();
            assert!(result.errors.len() >= required, "{}", definition.key());
        }
    }
}
