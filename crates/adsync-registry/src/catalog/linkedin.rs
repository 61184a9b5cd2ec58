use adsync_contracts::{
    ad_type::{AdTypeDefinition, CreativeRequirement, CrossFieldRule},
    field::FieldDefinition,
    platform::{ContentCategory, Platform},
};

use super::STANDARD_CTA;

pub(super) fn definitions() -> Vec<AdTypeDefinition> {
    vec![sponsored_content(), text_ad(), organic_post()]
}

fn sponsored_content() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Linkedin,
        "sponsored_content",
        "Sponsored Content",
        ContentCategory::Paid,
    )
    .with_fields(vec![
        FieldDefinition::textarea("intro_text", "Introductory Text")
            .required()
            .variables()
            .max_length(600),
        FieldDefinition::text("headline", "Headline").variables().max_length(200),
        FieldDefinition::url("final_url", "Destination URL").required().variables(),
        FieldDefinition::select("call_to_action", "Call to Action", STANDARD_CTA),
    ])
    .with_creative(CreativeRequirement::image((1.91, 1.0), 1200, 627))
    .with_features(&["feed", "lead_gen"])
    .with_rule(CrossFieldRule::RecommendMaxLength {
        field: "intro_text".into(),
        length: 150,
    })
    .with_rule(CrossFieldRule::RecommendMaxLength {
        field: "headline".into(),
        length: 70,
    })
}

fn text_ad() -> AdTypeDefinition {
    AdTypeDefinition::new(Platform::Linkedin, "text_ad", "Text Ad", ContentCategory::Paid)
        .with_fields(vec![
            FieldDefinition::text("headline", "Headline")
                .required()
                .variables()
                .max_length(25),
            FieldDefinition::text("description", "Description")
                .required()
                .variables()
                .max_length(75),
            FieldDefinition::url("final_url", "Destination URL").required().variables(),
        ])
        .with_creative(CreativeRequirement {
            required: false,
            ..CreativeRequirement::image((1.0, 1.0), 100, 100)
        })
        .with_features(&["right_rail"])
}

fn organic_post() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Linkedin,
        "organic_post",
        "Organic Post",
        ContentCategory::Organic,
    )
    .with_fields(vec![
        FieldDefinition::textarea("commentary", "Commentary")
            .required()
            .variables()
            .max_length(3000),
        FieldDefinition::url("link", "Link").variables(),
        FieldDefinition::array("hashtags", "Hashtags")
            .max_length(100)
            .count(None, Some(30))
            .pattern(r"^#?[\p{L}\p{N}_]+$"),
    ])
    .with_rule(CrossFieldRule::DistinctItems { field: "hashtags".into() })
    .with_rule(CrossFieldRule::RecommendItems {
        field: "hashtags".into(),
        count: 3,
    })
}
