use adsync_contracts::{
    ad_type::{AdTypeDefinition, CreativeRequirement, CrossFieldRule},
    field::FieldDefinition,
    platform::{ContentCategory, Platform},
};

use super::STANDARD_CTA;

pub(super) fn definitions() -> Vec<AdTypeDefinition> {
    vec![
        responsive_search(),
        responsive_display(),
        performance_max(),
        business_profile_post(),
    ]
}

fn responsive_search() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Google,
        "responsive_search",
        "Responsive Search Ad",
        ContentCategory::Paid,
    )
    .with_fields(vec![
        FieldDefinition::array("headlines", "Headlines")
            .required()
            .variables()
            .max_length(30)
            .count(Some(3), Some(15)),
        FieldDefinition::array("descriptions", "Descriptions")
            .required()
            .variables()
            .max_length(90)
            .count(Some(2), Some(4)),
        FieldDefinition::text("path1", "Display Path 1").variables().max_length(15),
        FieldDefinition::text("path2", "Display Path 2").variables().max_length(15),
        FieldDefinition::url("final_url", "Final URL").required().variables(),
    ])
    .with_features(&["asset_pinning", "dynamic_keyword_insertion", "responsive"])
    .with_rule(CrossFieldRule::DistinctItems { field: "headlines".into() })
    .with_rule(CrossFieldRule::DistinctItems { field: "descriptions".into() })
    .with_rule(CrossFieldRule::RequireWhen {
        field: "path1".into(),
        when: "path2".into(),
    })
    .with_rule(CrossFieldRule::RecommendItems {
        field: "headlines".into(),
        count: 8,
    })
}

fn responsive_display() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Google,
        "responsive_display",
        "Responsive Display Ad",
        ContentCategory::Paid,
    )
    .with_fields(vec![
        FieldDefinition::array("headlines", "Short Headlines")
            .required()
            .variables()
            .max_length(30)
            .count(Some(1), Some(5)),
        FieldDefinition::text("long_headline", "Long Headline")
            .required()
            .variables()
            .max_length(90),
        FieldDefinition::array("descriptions", "Descriptions")
            .required()
            .variables()
            .max_length(90)
            .count(Some(1), Some(5)),
        FieldDefinition::text("business_name", "Business Name")
            .required()
            .max_length(25),
        FieldDefinition::url("final_url", "Final URL").required().variables(),
        FieldDefinition::select("call_to_action", "Call to Action", STANDARD_CTA),
    ])
    .with_creative(CreativeRequirement::image((1.91, 1.0), 600, 314))
    .with_creative(CreativeRequirement::image((1.0, 1.0), 300, 300))
    .with_features(&["responsive", "image_assets"])
    .with_rule(CrossFieldRule::DistinctItems { field: "headlines".into() })
}

fn performance_max() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Google,
        "performance_max",
        "Performance Max Asset Group (Text)",
        ContentCategory::Paid,
    )
    .with_fields(vec![
        FieldDefinition::array("headlines", "Headlines")
            .required()
            .variables()
            .max_length(30)
            .count(Some(3), Some(15)),
        FieldDefinition::array("long_headlines", "Long Headlines")
            .required()
            .variables()
            .max_length(90)
            .count(Some(1), Some(5)),
        FieldDefinition::array("descriptions", "Descriptions")
            .required()
            .variables()
            .max_length(90)
            .count(Some(2), Some(5)),
        FieldDefinition::text("business_name", "Business Name")
            .required()
            .max_length(25),
        FieldDefinition::url("final_url", "Final URL").required().variables(),
        FieldDefinition::select("call_to_action", "Call to Action", STANDARD_CTA),
    ])
    .with_features(&["asset_group", "responsive", "cross_channel"])
    .with_rule(CrossFieldRule::DistinctItems { field: "headlines".into() })
    .with_rule(CrossFieldRule::RecommendItems {
        field: "headlines".into(),
        count: 5,
    })
}

fn business_profile_post() -> AdTypeDefinition {
    AdTypeDefinition::new(
        Platform::Google,
        "business_profile_post",
        "Business Profile Post",
        ContentCategory::Organic,
    )
    .with_fields(vec![
        FieldDefinition::textarea("summary", "Post Summary")
            .required()
            .variables()
            .max_length(1500),
        FieldDefinition::select(
            "call_to_action",
            "Button",
            &[
                ("book", "Book"),
                ("order", "Order Online"),
                ("shop", "Buy"),
                ("learn_more", "Learn More"),
                ("sign_up", "Sign Up"),
                ("call", "Call Now"),
            ],
        ),
        FieldDefinition::url("link", "Button Link").variables(),
    ])
    .with_features(&["local"])
    .with_rule(CrossFieldRule::RequireWhen {
        field: "link".into(),
        when: "call_to_action".into(),
    })
}
