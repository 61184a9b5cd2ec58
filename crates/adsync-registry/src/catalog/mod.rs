//! The built-in ad type catalogue, one module per platform.
//!
//! Limits follow each platform's published ad specs. Where a platform
//! publishes a soft recommendation below its hard limit, the hard limit is
//! the field's `max_length` and the recommendation is a
//! `RecommendMaxLength` rule.

mod google;
mod linkedin;
mod meta;
mod tiktok;

use adsync_contracts::{ad_type::AdTypeDefinition, platform::Platform};

/// Every built-in definition, grouped by platform in `Platform::ALL` order.
pub fn builtin() -> Vec<AdTypeDefinition> {
    Platform::ALL.iter().flat_map(|p| for_platform(*p)).collect()
}

/// The built-in definitions of one platform.
pub fn for_platform(platform: Platform) -> Vec<AdTypeDefinition> {
    match platform {
        Platform::Google => google::definitions(),
        Platform::Meta => meta::definitions(),
        Platform::Linkedin => linkedin::definitions(),
        Platform::Tiktok => tiktok::definitions(),
    }
}

/// Call-to-action options shared by most paid formats.
pub(crate) const STANDARD_CTA: &[(&str, &str)] = &[
    ("shop_now", "Shop Now"),
    ("learn_more", "Learn More"),
    ("sign_up", "Sign Up"),
    ("buy_now", "Buy Now"),
    ("get_offer", "Get Offer"),
    ("contact_us", "Contact Us"),
    ("download", "Download"),
];
