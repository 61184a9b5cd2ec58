use adsync_contracts::{
    ad_type::{AdTypeDefinition, CreativeRequirement, CrossFieldRule},
    field::FieldDefinition,
    platform::{ContentCategory, Platform},
};

use super::STANDARD_CTA;

pub(super) fn definitions() -> Vec<AdTypeDefinition> {
    vec![single_image(), carousel(), boosted_post(), page_post()]
}

fn single_image() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Meta,
        "single_image",
        "Single Image Ad",
        ContentCategory::Paid,
    )
    .with_fields(vec![
        FieldDefinition::textarea("primary_text", "Primary Text")
            .required()
            .variables()
            .max_length(2200),
        FieldDefinition::text("headline", "Headline").variables().max_length(40),
        FieldDefinition::text("description", "Link Description")
            .variables()
            .max_length(30),
        FieldDefinition::url("final_url", "Website URL").required().variables(),
        FieldDefinition::select("call_to_action", "Call to Action", STANDARD_CTA),
    ])
    .with_creative(CreativeRequirement::image((1.0, 1.0), 1080, 1080))
    .with_features(&["feed", "stories"])
    .with_rule(CrossFieldRule::RecommendMaxLength {
        field: "primary_text".into(),
        length: 125,
    })
}

fn carousel() -> AdTypeDefinition {
    AdTypeDefinition::new(Platform::Meta, "carousel", "Carousel Ad", ContentCategory::Paid)
        .with_fields(vec![
            FieldDefinition::textarea("primary_text", "Primary Text")
                .required()
                .variables()
                .max_length(2200),
            FieldDefinition::array("cards", "Card Headlines")
                .required()
                .variables()
                .max_length(40)
                .count(Some(2), Some(10)),
            FieldDefinition::url("final_url", "Website URL").required().variables(),
            FieldDefinition::select("call_to_action", "Call to Action", STANDARD_CTA),
        ])
        .with_creative(CreativeRequirement::image((1.0, 1.0), 1080, 1080))
        .with_features(&["feed", "multi_card"])
        .with_rule(CrossFieldRule::MinItems {
            field: "cards".into(),
            min: 2,
        })
        .with_rule(CrossFieldRule::DistinctItems { field: "cards".into() })
        .with_rule(CrossFieldRule::RecommendMaxLength {
            field: "primary_text".into(),
            length: 125,
        })
}

fn boosted_post() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Meta,
        "boosted_post",
        "Boosted Post",
        ContentCategory::Promoted,
    )
    .with_fields(vec![
        FieldDefinition::text("post_id", "Post ID").required(),
        FieldDefinition::select(
            "objective",
            "Objective",
            &[
                ("engagement", "Engagement"),
                ("reach", "Reach"),
                ("traffic", "Traffic"),
            ],
        )
        .required(),
        FieldDefinition::number("budget", "Daily Budget").required().min_value(1.0),
        FieldDefinition::number("duration_days", "Duration (days)")
            .min_value(1.0)
            .max_value(30.0),
    ])
    .with_features(&["boost"])
}

fn page_post() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Meta,
        "page_post",
        "Page Post",
        ContentCategory::Organic,
    )
    .with_fields(vec![
        FieldDefinition::textarea("message", "Message").variables().max_length(63206),
        FieldDefinition::url("link", "Link").variables(),
    ])
    .with_creative(CreativeRequirement {
        required: false,
        ..CreativeRequirement::image((1.91, 1.0), 1200, 630)
    })
    .with_rule(CrossFieldRule::RequireAnyOf {
        fields: vec!["message".into(), "link".into()],
    })
}
