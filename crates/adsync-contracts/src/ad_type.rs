//! Ad type definitions: the static schema and validator for one ad shape.
//!
//! An `AdTypeDefinition` combines the ordered field list, the creative
//! requirements, and a set of cross-field rules the generic field validator
//! cannot express (e.g. "needs at least 3 headlines"). Rules are plain data
//! so definitions can be registered, serialized, and compared without
//! carrying closures.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    field::FieldDefinition,
    platform::{ContentCategory, Platform},
};

/// Composite registry key: (platform, ad type id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AdTypeKey {
    pub platform: Platform,
    pub id: String,
}

impl AdTypeKey {
    pub fn new(platform: Platform, id: impl Into<String>) -> Self {
        Self {
            platform,
            id: id.into(),
        }
    }
}

impl fmt::Display for AdTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.id)
    }
}

/// The kind of creative asset an ad type needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreativeKind {
    Image,
    Video,
    Logo,
}

/// An asset-shape constraint co-located with the ad type.
///
/// Carried for completeness; the field validator does not inspect assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeRequirement {
    pub kind: CreativeKind,
    /// Width:height, e.g. `(1.91, 1.0)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size_kb: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_secs: Option<u32>,
    #[serde(default)]
    pub required: bool,
}

impl CreativeRequirement {
    pub fn image(aspect_ratio: (f64, f64), min_width: u32, min_height: u32) -> Self {
        Self {
            kind: CreativeKind::Image,
            aspect_ratio: Some(aspect_ratio),
            min_width: Some(min_width),
            min_height: Some(min_height),
            max_file_size_kb: Some(5120),
            max_duration_secs: None,
            required: true,
        }
    }

    pub fn video(aspect_ratio: (f64, f64), max_duration_secs: u32) -> Self {
        Self {
            kind: CreativeKind::Video,
            aspect_ratio: Some(aspect_ratio),
            min_width: None,
            min_height: None,
            max_file_size_kb: None,
            max_duration_secs: Some(max_duration_secs),
            required: true,
        }
    }
}

/// A cross-field rule evaluated after every field has been checked.
///
/// `Recommend*` variants only ever produce warnings.
///
/// Example in TOML:
/// ```toml
/// [[rules]]
/// rule = "min_items"
/// field = "headlines"
/// min = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CrossFieldRule {
    /// The list field must hold at least `min` non-empty items.
    MinItems { field: String, min: usize },
    /// The list field must hold at most `max` items.
    MaxItems { field: String, max: usize },
    /// Items of the list field must be pairwise distinct.
    DistinctItems { field: String },
    /// At least one of `fields` must be non-empty.
    RequireAnyOf { fields: Vec<String> },
    /// `field` is required whenever `when` is non-empty.
    RequireWhen { field: String, when: String },
    /// Warn when the list field holds fewer than `count` items.
    RecommendItems { field: String, count: usize },
    /// Warn when the text field is longer than `length` characters.
    RecommendMaxLength { field: String, length: usize },
}

/// Static schema and validator for one concrete ad shape on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdTypeDefinition {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub category: ContentCategory,
    /// Ordered; validation reports errors in this order.
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub creative_requirements: Vec<CreativeRequirement>,
    /// Field id → character limit, as published by the platform.
    #[serde(default)]
    pub character_limits: BTreeMap<String, usize>,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub rules: Vec<CrossFieldRule>,
}

impl AdTypeDefinition {
    pub fn new(
        platform: Platform,
        id: impl Into<String>,
        name: impl Into<String>,
        category: ContentCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            platform,
            category,
            fields: Vec::new(),
            creative_requirements: Vec::new(),
            character_limits: BTreeMap::new(),
            features: BTreeSet::new(),
            rules: Vec::new(),
        }
    }

    /// Set the field list. Every field with a `max_length` also lands in
    /// `character_limits`.
    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        for field in &fields {
            if let Some(max) = field.max_length {
                self.character_limits.insert(field.id.clone(), max);
            }
        }
        self.fields = fields;
        self
    }

    pub fn with_creative(mut self, requirement: CreativeRequirement) -> Self {
        self.creative_requirements.push(requirement);
        self
    }

    pub fn with_features(mut self, features: &[&str]) -> Self {
        self.features.extend(features.iter().map(|f| f.to_string()));
        self
    }

    pub fn with_rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn key(&self) -> AdTypeKey {
        AdTypeKey::new(self.platform, self.id.clone())
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}
