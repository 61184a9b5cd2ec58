//! Engine configuration loaded from TOML.
//!
//! `EngineConfig` carries everything about a preview run that is policy
//! rather than input: the ordered sync fields every ad is checked against,
//! the platform limit table, the filter names the template language
//! recognizes, and the skip-rate warning threshold.
//!
//! ```toml
//! skip_rate_warning_pct = 25.0
//! filters = ["slugify"]
//!
//! [[fields]]
//! id = "headline"
//! name = "Headline"
//! type = "text"
//! required = true
//! supportsVariables = true
//! limitKey = "headline"
//!
//! [limits.google.headline]
//! max_length = 25
//! ```
//!
//! Limits overlay the built-in table entry by entry. A document that omits
//! `fields` keeps the standard sync fields.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use adsync_contracts::{
    error::{AdsyncError, AdsyncResult},
    field::FieldDefinition,
};

use crate::constraints::LimitTable;

/// Default threshold for the high-skip-rate warning, in percent.
pub const DEFAULT_SKIP_RATE_WARNING_PCT: f64 = 20.0;

/// A field every ad in a preview is checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncFieldSpec {
    #[serde(flatten)]
    pub definition: FieldDefinition,
    /// Key into the platform limit table; `None` means no platform limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_key: Option<String>,
}

impl SyncFieldSpec {
    pub fn new(definition: FieldDefinition) -> Self {
        Self {
            definition,
            limit_key: None,
        }
    }

    pub fn limited_by(mut self, key: impl Into<String>) -> Self {
        self.limit_key = Some(key.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }
}

/// The standard sync fields, in check order.
pub fn standard_fields() -> Vec<SyncFieldSpec> {
    vec![
        SyncFieldSpec::new(FieldDefinition::text("headline", "Headline").required().variables())
            .limited_by("headline"),
        SyncFieldSpec::new(FieldDefinition::textarea("description", "Description").variables())
            .limited_by("description"),
        SyncFieldSpec::new(FieldDefinition::text("display_url", "Display URL").variables())
            .limited_by("display_url"),
        SyncFieldSpec::new(FieldDefinition::url("final_url", "Final URL").required().variables()),
        SyncFieldSpec::new(FieldDefinition::select(
            "call_to_action",
            "Call to Action",
            &[
                ("shop_now", "Shop Now"),
                ("learn_more", "Learn More"),
                ("sign_up", "Sign Up"),
                ("buy_now", "Buy Now"),
                ("get_offer", "Get Offer"),
                ("contact_us", "Contact Us"),
                ("download", "Download"),
            ],
        )),
    ]
}

/// Raw document shape; `limits` here are overrides, not the full table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default = "default_skip_rate")]
    skip_rate_warning_pct: f64,
    #[serde(default)]
    filters: Vec<String>,
    #[serde(default)]
    fields: Option<Vec<SyncFieldSpec>>,
    #[serde(default)]
    limits: LimitTable,
}

fn default_skip_rate() -> f64 {
    DEFAULT_SKIP_RATE_WARNING_PCT
}

/// Policy knobs for a `SyncPreviewBuilder`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Warn when the skip rate is strictly greater than this percentage.
    pub skip_rate_warning_pct: f64,
    /// Extra filter names on top of the built-in filters.
    pub filters: Vec<String>,
    pub fields: Vec<SyncFieldSpec>,
    pub limits: LimitTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skip_rate_warning_pct: DEFAULT_SKIP_RATE_WARNING_PCT,
            filters: Vec::new(),
            fields: standard_fields(),
            limits: LimitTable::builtin(),
        }
    }
}

impl EngineConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `AdsyncError::ConfigError` if the TOML is malformed, names an
    /// unknown platform, or sets a threshold outside 0–100, and
    /// `AdsyncError::InvalidPattern` if a field pattern is not a valid regex.
    pub fn from_toml_str(s: &str) -> AdsyncResult<Self> {
        let doc: ConfigDocument = toml::from_str(s).map_err(|e| AdsyncError::ConfigError {
            reason: format!("failed to parse engine config TOML: {}", e),
        })?;

        let config = Self {
            skip_rate_warning_pct: doc.skip_rate_warning_pct,
            filters: doc.filters,
            fields: doc.fields.unwrap_or_else(standard_fields),
            limits: LimitTable::builtin().overlay(doc.limits),
        };
        config.validate()?;

        debug!(
            fields = config.fields.len(),
            filters = config.filters.len(),
            skip_rate_warning_pct = config.skip_rate_warning_pct,
            "engine config loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as engine configuration.
    pub fn from_file(path: &Path) -> AdsyncResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AdsyncError::ConfigError {
            reason: format!("failed to read engine config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check the invariants `from_toml_str` enforces. Configs assembled in
    /// code can call this directly.
    pub fn validate(&self) -> AdsyncResult<()> {
        if !(0.0..=100.0).contains(&self.skip_rate_warning_pct) {
            return Err(AdsyncError::ConfigError {
                reason: format!(
                    "skip_rate_warning_pct must be between 0 and 100, got {}",
                    self.skip_rate_warning_pct
                ),
            });
        }

        self.limits.platforms()?;

        let mut seen = std::collections::BTreeSet::new();
        for spec in &self.fields {
            if !seen.insert(spec.id()) {
                return Err(AdsyncError::ConfigError {
                    reason: format!("field '{}' is declared more than once", spec.id()),
                });
            }
            if let Some(pattern) = &spec.definition.pattern {
                Regex::new(pattern).map_err(|e| AdsyncError::InvalidPattern {
                    field: spec.id().to_string(),
                    reason: e.to_string(),
                })?;
            }
        }
        Ok(())
    }

    /// The configured spec for `id`, if it is a standard field.
    pub fn field(&self, id: &str) -> Option<&SyncFieldSpec> {
        self.fields.iter().find(|f| f.id() == id)
    }
}
