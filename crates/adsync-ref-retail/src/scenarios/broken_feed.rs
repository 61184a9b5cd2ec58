//! Scenario 3: Broken Feed
//!
//! A LinkedIn campaign set built on a catalogue export with every kind of
//! problem a merchant's feed tends to have. Each ad trips exactly one check,
//! so the skip list doubles as a tour of the reason codes:
//!
//!   bad-url        landing page lost its scheme         INVALID_URL
//!   unknown-var    template names a column that is gone MISSING_DEPENDENCY
//!   missing-row    points at sample row 42              MISSING_DEPENDENCY
//!   bad-cta        call to action not in the option set INVALID_ENUM_VALUE
//!   bad-ad-type    LinkedIn has no "carousel" ad type   MISSING_DEPENDENCY
//!   bad-budget     budget templated from "$24.00"       INVALID_BUDGET
//!   bad-schedule   flight ends before it starts         INVALID_DATETIME
//!
//! Two healthy ads ride along. Seven of nine skipped trips the default 20%
//! alarm.
//!
//! Sub-case B replays the set against an empty export. Sub-case C checks a
//! hand-written LinkedIn text ad straight against the registry, without a
//! preview.

use adsync_contracts::{
    ad::{AdInstance, FieldValue},
    ad_type::AdTypeKey,
    error::AdsyncResult,
    platform::Platform,
    preview::SyncPreview,
    request::{
        AdConfig, AdGroupConfig, CampaignConfig, HierarchyConfig, PreviewRequest, Schedule,
    },
};
use adsync_core::EngineConfig;
use adsync_registry::AdTypeRegistry;
use adsync_validate::validate_ad_type;

use crate::mock_data::{catalogue_columns, catalogue_rows, SCHEMELESS_URL_ROW};
use crate::scenarios::{print_preview, retail_builder};

// ── Request ───────────────────────────────────────────────────────────────────

fn feed_ad(id: &str, row: usize) -> AdConfig {
    let mut ad = AdConfig::new(id)
        .field("headline", "{short_title}")
        .field("description", "{brand} {category|lowercase} from {price}")
        .field("final_url", "{url}")
        .field("call_to_action", "learn_more")
        .row(row);
    ad.product_name = Some("{title}".to_string());
    ad
}

fn group(
    id: &str,
    budget: Option<&str>,
    schedule: Option<Schedule>,
    ads: Vec<AdConfig>,
) -> AdGroupConfig {
    AdGroupConfig {
        id: id.to_string(),
        name_template: format!("Feed / {id}"),
        budget: budget.map(FieldValue::from),
        schedule,
        ads,
    }
}

/// The broken-feed campaign set.
pub fn broken_feed_request() -> PreviewRequest {
    let mut bad_ad_type = feed_ad("bad-ad-type", 6);
    bad_ad_type.ad_type = Some(AdTypeKey::new(Platform::Linkedin, "carousel"));

    let main = vec![
        feed_ad("bad-url", SCHEMELESS_URL_ROW),
        feed_ad("unknown-var", 1).field("headline", "{colour} {short_title}"),
        feed_ad("missing-row", 42),
        feed_ad("bad-cta", 2).field("call_to_action", "buy_it_now"),
        feed_ad("healthy-1", 0),
        bad_ad_type,
        feed_ad("healthy-2", 7),
    ];

    let flight = Schedule {
        start: "2026-05-02T00:00:00Z".to_string(),
        end: Some("2026-05-01T00:00:00Z".to_string()),
    };

    PreviewRequest {
        campaign_set_id: "broken-feed".to_string(),
        hierarchy: HierarchyConfig {
            campaigns: vec![CampaignConfig {
                id: "linkedin-feed".to_string(),
                name_template: "LinkedIn Feed".to_string(),
                sample_row: None,
                ad_groups: vec![
                    group("main", Some("40"), None, main),
                    group("clearance", Some("{price}"), None, vec![feed_ad("bad-budget", 4)]),
                    group("weekend", None, Some(flight), vec![feed_ad("bad-schedule", 0)]),
                ],
            }],
        },
        columns: catalogue_columns(),
        sample_rows: catalogue_rows(),
        platforms: vec![Platform::Linkedin],
    }
}

/// The same campaign set after the export arrived empty: no columns, no
/// rows, and every ad falls back to the (missing) first row.
pub fn empty_export_request() -> PreviewRequest {
    let mut request = broken_feed_request();
    request.columns.clear();
    request.sample_rows.clear();
    for group in request
        .hierarchy
        .campaigns
        .iter_mut()
        .flat_map(|c| c.ad_groups.iter_mut())
    {
        for ad in &mut group.ads {
            ad.sample_row = None;
        }
    }
    request
}

/// Build the preview with the default engine configuration.
pub fn build_preview(request: &PreviewRequest) -> SyncPreview {
    retail_builder(EngineConfig::default()).build(request)
}

/// A LinkedIn text ad typed in by hand: headline too long, no description,
/// and a landing page without a scheme.
pub fn hand_written_text_ad() -> AdInstance {
    [
        ("headline", "Trekking Poles, now 20% off this week"),
        ("final_url", "shop.acme.test/p/tb-120"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), FieldValue::from(v)))
    .collect()
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 3: Broken Feed.
pub fn run_scenario() -> AdsyncResult<()> {
    println!("=== Scenario 3: Broken Feed ===");
    println!();

    // ── Sub-case A: full export, one problem per ad ──────────────────────────

    {
        println!("  Sub-case A: LinkedIn preview over the catalogue export");
        let preview = build_preview(&broken_feed_request());
        print_preview(&preview);
        println!();
    }

    // ── Sub-case B: empty export ──────────────────────────────────────────────

    {
        println!("  Sub-case B: Same campaign set, export arrived empty");
        let preview = build_preview(&empty_export_request());
        println!(
            "  Breakdown:              {} skipped of {}",
            preview.breakdown.skipped, preview.total_ads
        );
        for warning in &preview.warnings {
            println!("  WARNING: {}", warning);
        }
        println!();
    }

    // ── Sub-case C: direct ad type validation ─────────────────────────────────

    {
        println!("  Sub-case C: Hand-written LinkedIn text ad against the registry");
        let registry = AdTypeRegistry::with_builtins();
        let result = validate_ad_type(
            &registry,
            Platform::Linkedin,
            "text_ad",
            &hand_written_text_ad(),
        );
        println!("  Valid:                  {}", if result.valid { "YES" } else { "NO" });
        for error in &result.errors {
            println!("  ERROR: {}", error);
        }
        println!();
    }

    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
