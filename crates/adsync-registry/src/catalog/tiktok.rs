use adsync_contracts::{
    ad_type::{AdTypeDefinition, CreativeRequirement, CrossFieldRule},
    field::FieldDefinition,
    platform::{ContentCategory, Platform},
};

use super::STANDARD_CTA;

pub(super) fn definitions() -> Vec<AdTypeDefinition> {
    vec![in_feed(), spark_ad(), organic_video()]
}

fn in_feed() -> AdTypeDefinition {
    AdTypeDefinition::new(Platform::Tiktok, "in_feed", "In-Feed Ad", ContentCategory::Paid)
        .with_fields(vec![
            FieldDefinition::textarea("ad_text", "Ad Text")
                .required()
                .variables()
                .min_length(1)
                .max_length(100),
            FieldDefinition::text("display_name", "Display Name")
                .required()
                .max_length(40),
            FieldDefinition::url("final_url", "Landing Page URL").required().variables(),
            FieldDefinition::select("call_to_action", "Call to Action", STANDARD_CTA).required(),
        ])
        .with_creative(CreativeRequirement::video((9.0, 16.0), 60))
        .with_features(&["for_you_feed", "video"])
}

fn spark_ad() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Tiktok,
        "spark_ad",
        "Spark Ad",
        ContentCategory::Promoted,
    )
    .with_fields(vec![
        FieldDefinition::text("post_code", "Video Authorization Code")
            .required()
            .pattern(r"^#[A-Za-z0-9+/=]+$"),
        FieldDefinition::url("final_url", "Landing Page URL").variables(),
        FieldDefinition::select("call_to_action", "Call to Action", STANDARD_CTA),
    ])
    .with_features(&["for_you_feed", "organic_boost"])
    .with_rule(CrossFieldRule::RequireWhen {
        field: "final_url".into(),
        when: "call_to_action".into(),
    })
}

fn organic_video() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Tiktok,
        "organic_video",
        "Organic Video Post",
        ContentCategory::Organic,
    )
    .with_fields(vec![
        FieldDefinition::textarea("caption", "Caption")
            .required()
            .variables()
            .max_length(2200),
        FieldDefinition::array("hashtags", "Hashtags")
            .max_length(100)
            .pattern(r"^#?[\p{L}\p{N}_]+$"),
    ])
    .with_creative(CreativeRequirement::video((9.0, 16.0), 600))
    .with_features(&["video"])
    .with_rule(CrossFieldRule::RecommendItems {
        field: "hashtags".into(),
        count: 3,
    })
}
