//! Scenario 1: Spring Product Launch
//!
//! Ten Google Search ads, one per product in the spring range, all built from
//! the same templates:
//!
//!   headline        {short_title|title}     (truncate_word on overrun)
//!   description     {brand} {category|lowercase} from {price}. Free returns.
//!   final_url       {url}
//!
//! Expected classification:
//!
//!   8 valid     short titles fit Google's 30-character headline limit
//!   1 fallback  LT-600 has no short title; its 46-character title is cut
//!               back to the last whole word
//!   1 skipped   GT-010 was exported without a landing page (REQUIRED_FIELD)
//!
//! The preview is then requested a second time with identical input to show
//! the memo serving it without a rebuild.

use adsync_contracts::{
    error::AdsyncResult,
    field::FallbackPolicy,
    platform::Platform,
    preview::SyncPreview,
    request::{AdConfig, AdGroupConfig, CampaignConfig, HierarchyConfig, PreviewRequest},
};
use adsync_core::{fingerprint, EngineConfig, PreviewMemo};

use crate::mock_data::{catalogue_columns, launch_rows};
use crate::scenarios::{print_preview, retail_builder};

// ── Request ───────────────────────────────────────────────────────────────────

fn launch_ad(row: usize) -> AdConfig {
    let mut ad = AdConfig::new(format!("launch-{:02}", row + 1))
        .field("headline", "{short_title|title}")
        .field("description", "{brand} {category|lowercase} from {price}. Free returns.")
        .field("final_url", "{url}")
        .field("call_to_action", "shop_now")
        .fallback("headline", FallbackPolicy::TruncateWord)
        .row(row);
    ad.product_name = Some("{title}".to_string());
    ad
}

/// The spring launch campaign set: two ad groups of five ads each.
pub fn launch_request() -> PreviewRequest {
    let group = |id: &str, rows: std::ops::Range<usize>| AdGroupConfig {
        id: id.to_string(),
        name_template: "Spring launch: {category}".to_string(),
        budget: Some(50.0.into()),
        schedule: None,
        ads: rows.map(launch_ad).collect(),
    };

    PreviewRequest {
        campaign_set_id: "spring-launch".to_string(),
        hierarchy: HierarchyConfig {
            campaigns: vec![CampaignConfig {
                id: "spring-search".to_string(),
                name_template: "Spring Search".to_string(),
                sample_row: None,
                ad_groups: vec![group("footwear", 0..5), group("gear", 5..10)],
            }],
        },
        columns: catalogue_columns(),
        sample_rows: launch_rows(),
        platforms: vec![Platform::Google],
    }
}

/// Build the preview with the default engine configuration.
pub fn build_preview() -> SyncPreview {
    retail_builder(EngineConfig::default()).build(&launch_request())
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 1: Spring Product Launch.
pub fn run_scenario() -> AdsyncResult<()> {
    println!("=== Scenario 1: Spring Product Launch ===");
    println!();

    let request = launch_request();
    let builder = retail_builder(EngineConfig::default());

    println!("  Campaign set:           {}", request.campaign_set_id);
    println!("  Platforms:              google");
    println!("  Ads:                    {}", request.hierarchy.ad_count());
    println!("  Input fingerprint:      {}", &fingerprint(&request)[..16]);
    println!();

    let mut memo = PreviewMemo::new();
    let preview = memo.get_or_build(&builder, &request).clone();
    print_preview(&preview);
    println!();

    let again = memo.get_or_build(&builder, &request).breakdown;
    println!(
        "  Second request:         {} (memo hits: {})",
        if again == preview.breakdown { "served from memo" } else { "rebuilt" },
        memo.hits()
    );
    println!();

    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
