//! The three retail reference scenarios.
//!
//! Each scenario assembles a preview request over the mock catalogue, runs it
//! through a `SyncPreviewBuilder` backed by the built-in ad type registry and
//! the type-aware validator, and prints the classification.

pub mod broken_feed;
pub mod multi_platform;
pub mod product_launch;

use tracing::debug;

use adsync_contracts::preview::SyncPreview;
use adsync_core::{EngineConfig, SyncPreviewBuilder};
use adsync_registry::AdTypeRegistry;
use adsync_validate::FieldValidator;

/// A builder over the built-in catalogue and the standard validator.
pub fn retail_builder(config: EngineConfig) -> SyncPreviewBuilder {
    let registry = AdTypeRegistry::with_builtins();
    debug!(
        ad_types = registry.len(),
        sync_fields = config.fields.len(),
        "retail builder ready"
    );
    SyncPreviewBuilder::new(Box::new(registry), Box::new(FieldValidator::new()), config)
}

/// Print the breakdown, every non-valid ad, and the warnings.
pub(crate) fn print_preview(preview: &SyncPreview) {
    println!(
        "  Breakdown:              {} valid, {} fallback, {} skipped (of {})",
        preview.breakdown.valid,
        preview.breakdown.fallback,
        preview.breakdown.skipped,
        preview.total_ads
    );

    for ad in &preview.fallback_ads {
        println!("  FALLBACK {:<14} {}", ad.ad_id, ad.reason);
        for sub in &ad.substitutions {
            println!("           {:<14} '{}' -> '{}'", sub.field, sub.original, sub.value);
        }
    }
    for ad in &preview.skipped_ads {
        println!(
            "  SKIPPED  {:<14} [{}] {}: {}",
            ad.ad_id, ad.error_code, ad.field, ad.reason
        );
        if let Some(product) = &ad.product_name {
            println!("           product:       {}", product);
        }
    }
    for warning in &preview.warnings {
        println!("  WARNING: {}", warning);
    }

    println!(
        "  Can proceed:            {}",
        if preview.can_proceed { "YES" } else { "NO (skipped ads need attention)" }
    );
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use adsync_contracts::{
        ad_type::AdTypeKey,
        platform::Platform,
        preview::ErrorCode,
        request::{AdConfig, PreviewRequest, SampleRow},
    };

    use super::*;
    use crate::mock_data::{catalogue_rows, LONG_TITLE_ROW};

    /// The launch request cut down to one Google ad over one row.
    fn single_ad(ad: AdConfig, row: SampleRow) -> PreviewRequest {
        let mut request = product_launch::launch_request();
        request.sample_rows = vec![row];
        let groups = &mut request.hierarchy.campaigns[0].ad_groups;
        groups.truncate(1);
        groups[0].ads = vec![ad.row(0)];
        request
    }

    fn with_cell(index: usize, column: &str, value: &str) -> SampleRow {
        let mut row = catalogue_rows()[index].clone();
        row.insert(column.to_string(), json!(value));
        row
    }

    fn preview_of(ad: AdConfig, row: SampleRow) -> SyncPreview {
        retail_builder(EngineConfig::default()).build(&single_ad(ad, row))
    }

    #[test]
    fn braces_in_row_data_count_toward_length() {
        let title = "Insulated Trail Bottle Set {2 pack} in Forest";
        let ad = AdConfig::new("bottle")
            .field("headline", "{title}")
            .field("final_url", "{url}");
        let preview = preview_of(ad, with_cell(0, "title", title));

        assert_eq!(preview.breakdown.skipped, 1);
        let skipped = &preview.skipped_ads[0];
        assert_eq!(skipped.error_code, ErrorCode::FieldTooLong);
        assert_eq!(skipped.reason, "Headline must be at most 30 characters (currently 45)");
        assert_eq!(skipped.value.as_deref(), Some(title));
    }

    #[test]
    fn doubled_braces_leave_literal_braces_that_are_measured() {
        let ad = AdConfig::new("shoes")
            .field("headline", "{{title}}")
            .field("final_url", "{url}");
        let preview = preview_of(ad, catalogue_rows()[LONG_TITLE_ROW].clone());

        let skipped = &preview.skipped_ads[0];
        assert_eq!(skipped.error_code, ErrorCode::FieldTooLong);
        assert_eq!(
            skipped.value.as_deref(),
            Some("{Lightweight trail running shoes for every pace}")
        );
    }

    #[test]
    fn braces_in_a_feed_url_do_not_excuse_it() {
        let ad = AdConfig::new("runner")
            .field("headline", "{short_title}")
            .field("final_url", "{url}");
        let preview = preview_of(ad, with_cell(0, "url", "not a url {at all}"));

        let skipped = &preview.skipped_ads[0];
        assert_eq!(skipped.error_code, ErrorCode::InvalidUrl);
        assert_eq!(skipped.field, "final_url");
        assert_eq!(skipped.value.as_deref(), Some("not a url {at all}"));
    }

    #[test]
    fn ad_type_recommendations_reach_the_preview() {
        let mut ad = AdConfig::new("rsa")
            .field("headline", "{short_title}")
            .field("final_url", "{url}")
            .field("headlines", vec!["{short_title}", "{brand} running", "Ships free"])
            .field("descriptions", vec!["{title} from {price}", "Free returns"]);
        ad.ad_type = Some(AdTypeKey::new(Platform::Google, "responsive_search"));
        let preview = preview_of(ad, catalogue_rows()[0].clone());

        assert_eq!(preview.breakdown.valid, 1);
        assert_eq!(
            preview.warnings,
            vec!["rsa: Headlines: 8 or more items are recommended (found 3)"]
        );
    }
}
