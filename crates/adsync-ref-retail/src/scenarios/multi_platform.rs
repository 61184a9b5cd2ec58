//! Scenario 2: One Catalogue, Three Platforms
//!
//! The same ads are previewed for Google, Meta, and TikTok at once, so every
//! length limit is the tightest of the three. Engine configuration comes from
//! `config/retail.toml`, which adds a promo code field and lowers the TikTok
//! headline limit to 80. Google's 30 still governs the shared headline.
//!
//! Sub-cases, one ad each:
//!
//!   A  short title                          → valid everywhere
//!   B  32-character title, no policy        → FIELD_TOO_LONG (Google)
//!   C  same title, truncate_word            → fallback
//!   D  Meta single image ad, complete       → valid
//!   E  TikTok in-feed ad, no display name   → REQUIRED_FIELD (ad type check)
//!   F  lowercase promo code                 → CONSTRAINT_VIOLATION
//!
//! Three of six ads are skipped, which trips the configured 30% alarm.

use adsync_contracts::{
    ad_type::AdTypeKey,
    error::AdsyncResult,
    field::FallbackPolicy,
    platform::Platform,
    preview::SyncPreview,
    request::{AdConfig, AdGroupConfig, CampaignConfig, HierarchyConfig, PreviewRequest},
};
use adsync_core::{EngineConfig, PlatformConstraintResolver};

use crate::mock_data::{catalogue_columns, catalogue_rows, PARKA_ROW};
use crate::scenarios::{print_preview, retail_builder};

// ── Engine config ─────────────────────────────────────────────────────────────

const RETAIL_CONFIG: &str = include_str!("../../config/retail.toml");

/// The retail engine configuration.
pub fn retail_config() -> AdsyncResult<EngineConfig> {
    EngineConfig::from_toml_str(RETAIL_CONFIG)
}

// ── Request ───────────────────────────────────────────────────────────────────

fn base_ad(id: &str, headline: &str, row: usize) -> AdConfig {
    AdConfig::new(id)
        .field("headline", headline)
        .field("final_url", "{url}")
        .field("call_to_action", "shop_now")
        .row(row)
}

/// The six sub-case ads, previewed for `platforms`.
pub fn multi_platform_request(platforms: Vec<Platform>) -> PreviewRequest {
    let mut single_image = base_ad("mp-d", "{short_title}", 2)
        .field("primary_text", "{brand}: {title}. Built for wet trails.");
    single_image.ad_type = Some(AdTypeKey::new(Platform::Meta, "single_image"));

    let mut in_feed = base_ad("mp-e", "{short_title}", 3).field("ad_text", "{title} from {price}");
    in_feed.ad_type = Some(AdTypeKey::new(Platform::Tiktok, "in_feed"));

    let ads = vec![
        base_ad("mp-a", "{short_title}", 0)
            .field("description", "{brand} {category|lowercase}, shipped free"),
        base_ad("mp-b", "{title}", PARKA_ROW),
        base_ad("mp-c", "{title}", PARKA_ROW).fallback("headline", FallbackPolicy::TruncateWord),
        single_image,
        in_feed,
        base_ad("mp-f", "{short_title}", 1).field("promo_code", "spring-sale"),
    ];

    PreviewRequest {
        campaign_set_id: "all-channels".to_string(),
        hierarchy: HierarchyConfig {
            campaigns: vec![CampaignConfig {
                id: "always-on".to_string(),
                name_template: "Always On".to_string(),
                sample_row: None,
                ad_groups: vec![AdGroupConfig {
                    id: "catalogue".to_string(),
                    name_template: "{brand} catalogue".to_string(),
                    budget: Some("75".into()),
                    schedule: None,
                    ads,
                }],
            }],
        },
        columns: catalogue_columns(),
        sample_rows: catalogue_rows(),
        platforms,
    }
}

/// Build the Google + Meta + TikTok preview under the retail config.
pub fn build_preview() -> AdsyncResult<SyncPreview> {
    let builder = retail_builder(retail_config()?);
    Ok(builder.build(&multi_platform_request(vec![
        Platform::Google,
        Platform::Meta,
        Platform::Tiktok,
    ])))
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 2: One Catalogue, Three Platforms.
pub fn run_scenario() -> AdsyncResult<()> {
    println!("=== Scenario 2: One Catalogue, Three Platforms ===");
    println!();

    let config = retail_config()?;
    let resolver = PlatformConstraintResolver::new(config.limits.clone());
    let platforms = [Platform::Google, Platform::Meta, Platform::Tiktok];

    println!("  Effective headline limit per selection:");
    for selection in [&platforms[2..], &platforms[1..], &platforms[..]] {
        let names: Vec<&str> = selection.iter().map(Platform::as_str).collect();
        let limit = resolver.resolve(selection, "headline");
        println!(
            "    {:<22} {}",
            names.join(" + "),
            limit.max_length.map_or("unbounded".to_string(), |n| n.to_string())
        );
    }
    println!();

    let preview = retail_builder(config).build(&multi_platform_request(platforms.to_vec()));
    print_preview(&preview);
    println!();

    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use adsync_contracts::preview::{Breakdown, ErrorCode};

    use super::*;

    fn skipped<'p>(preview: &'p SyncPreview, ad_id: &str) -> &'p adsync_contracts::preview::SkippedAd {
        preview
            .skipped_ads
            .iter()
            .find(|a| a.ad_id == ad_id)
            .unwrap_or_else(|| panic!("expected {ad_id} to be skipped, got {:?}", preview.skipped_ads))
    }

    #[test]
    fn retail_config_loads_and_overlays_limits() {
        let config = retail_config().unwrap();
        assert_eq!(config.skip_rate_warning_pct, 30.0);
        assert_eq!(config.fields.len(), 5);
        assert!(config.field("promo_code").is_some());
        assert_eq!(
            config.limits.get(Platform::Tiktok, "headline").unwrap().max_length,
            Some(80)
        );
        // Untouched entries keep their built-in values.
        assert_eq!(
            config.limits.get(Platform::Meta, "headline").unwrap().max_length,
            Some(40)
        );
    }

    #[test]
    fn three_platform_breakdown() {
        let preview = build_preview().unwrap();
        assert_eq!(
            preview.breakdown,
            Breakdown {
                valid: 2,
                fallback: 1,
                skipped: 3
            }
        );
        let valid: Vec<&str> = preview.valid_ads.iter().map(|a| a.ad_id.as_str()).collect();
        assert_eq!(valid, vec!["mp-a", "mp-d"]);
    }

    #[test]
    fn google_limit_governs_the_shared_headline() {
        let preview = build_preview().unwrap();
        let ad = skipped(&preview, "mp-b");
        assert_eq!(ad.error_code, ErrorCode::FieldTooLong);
        assert_eq!(ad.field, "headline");
        assert_eq!(ad.reason, "Headline must be at most 30 characters (currently 32)");
        assert_eq!(ad.value.as_deref(), Some("Insulated winter parka with hood"));
    }

    #[test]
    fn same_title_fits_without_google() {
        let builder = retail_builder(retail_config().unwrap());
        let preview =
            builder.build(&multi_platform_request(vec![Platform::Meta, Platform::Tiktok]));
        assert!(!preview.skipped_ads.iter().any(|a| a.ad_id == "mp-b"));
        assert!(preview.fallback_ads.is_empty());
    }

    #[test]
    fn truncate_word_rescues_the_long_title() {
        let preview = build_preview().unwrap();
        let fallback = &preview.fallback_ads[0];
        assert_eq!(fallback.ad_id, "mp-c");
        assert_eq!(fallback.substitutions[0].value, "Insulated winter parka with");
    }

    #[test]
    fn ad_type_check_runs_on_resolved_values() {
        let preview = build_preview().unwrap();
        let ad = skipped(&preview, "mp-e");
        assert_eq!(ad.error_code, ErrorCode::RequiredField);
        assert_eq!(ad.field, "display_name");
        assert_eq!(ad.reason, "Display Name is required");
    }

    #[test]
    fn promo_code_pattern_is_a_constraint_violation() {
        let preview = build_preview().unwrap();
        let ad = skipped(&preview, "mp-f");
        assert_eq!(ad.error_code, ErrorCode::ConstraintViolation);
        assert_eq!(ad.field, "promo_code");
        assert_eq!(ad.value.as_deref(), Some("spring-sale"));
    }

    #[test]
    fn half_skipped_trips_the_configured_alarm() {
        let preview = build_preview().unwrap();
        assert!(!preview.can_proceed);
        assert_eq!(
            preview.warnings,
            vec![
                "1 ad will sync with fallback values",
                "High skip rate (50%): 3 of 6 ads will be skipped.",
            ]
        );
    }

    #[test]
    fn run_scenario_succeeds() {
        assert!(run_scenario().is_ok());
    }
}
