//! Platform constraint resolution.
//!
//! When a campaign set targets several platforms at once, a value must be
//! acceptable on every one of them. The effective limit for a field is
//! therefore the most restrictive across the selected platforms:
//!
//! - `max_length` / `max_value` → minimum of the participating limits
//! - `min_value` → maximum of the participating floors
//!
//! A platform that defines no limit for the field does not participate
//! (absence means "no constraint from this platform", not zero).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use adsync_contracts::{error::AdsyncResult, field::FieldDefinition, platform::Platform};

/// Per-platform limits for one field key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldLimit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl FieldLimit {
    pub fn max_length(n: usize) -> Self {
        Self {
            max_length: Some(n),
            ..Self::default()
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_length.is_none() && self.min_value.is_none() && self.max_value.is_none()
    }

    /// Fold `other` in, keeping the tighter bound on every axis.
    pub fn tighten(self, other: FieldLimit) -> FieldLimit {
        FieldLimit {
            max_length: min_opt(self.max_length, other.max_length),
            min_value: max_opt_f64(self.min_value, other.min_value),
            max_value: min_opt_f64(self.max_value, other.max_value),
        }
    }
}

fn min_opt(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn min_opt_f64(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn max_opt_f64(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Platform → field key → limit.
///
/// Example in TOML:
/// ```toml
/// [limits.google.headline]
/// max_length = 30
/// ```
///
/// Platform keys are stored by wire name so the table decodes from any
/// string-keyed document; `platforms()` rejects names that are not a
/// `Platform`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitTable(BTreeMap<String, BTreeMap<String, FieldLimit>>);

impl LimitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Published text limits for the standard sync fields.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (platform, headline, description) in [
            (Platform::Google, 30, 90),
            (Platform::Meta, 40, 125),
            (Platform::Linkedin, 70, 150),
            (Platform::Tiktok, 100, 100),
        ] {
            table.set(platform, "headline", FieldLimit::max_length(headline));
            table.set(platform, "description", FieldLimit::max_length(description));
        }
        table.set(Platform::Google, "display_url", FieldLimit::max_length(15));
        table
    }

    pub fn set(&mut self, platform: Platform, field: impl Into<String>, limit: FieldLimit) {
        self.0
            .entry(platform.as_str().to_string())
            .or_default()
            .insert(field.into(), limit);
    }

    pub fn get(&self, platform: Platform, field: &str) -> Option<&FieldLimit> {
        self.0
            .get(platform.as_str())
            .and_then(|fields| fields.get(field))
    }

    /// Parse every platform key, failing on the first unknown name.
    pub fn platforms(&self) -> AdsyncResult<Vec<Platform>> {
        self.0.keys().map(|name| name.parse::<Platform>()).collect()
    }

    /// Replace entries of `self` with every entry present in `overrides`.
    pub fn overlay(mut self, overrides: LimitTable) -> Self {
        for (platform, fields) in overrides.0 {
            self.0.entry(platform).or_default().extend(fields);
        }
        self
    }
}

/// Computes the most restrictive limit across a set of platforms.
#[derive(Debug, Clone)]
pub struct PlatformConstraintResolver {
    table: LimitTable,
}

impl PlatformConstraintResolver {
    pub fn new(table: LimitTable) -> Self {
        Self { table }
    }

    /// The effective limit for `field` under every selected platform.
    ///
    /// Duplicate platforms are ignored. With no participating platform the
    /// result is unbounded.
    pub fn resolve(&self, platforms: &[Platform], field: &str) -> FieldLimit {
        let selected: BTreeSet<Platform> = platforms.iter().copied().collect();
        selected
            .into_iter()
            .filter_map(|p| self.table.get(p, field))
            .fold(FieldLimit::default(), |acc, limit| acc.tighten(*limit))
    }

    /// `base` with the resolved platform limit merged in. Limits only ever
    /// tighten the base definition, never relax it.
    pub fn effective_definition(
        &self,
        base: &FieldDefinition,
        limit_key: Option<&str>,
        platforms: &[Platform],
    ) -> FieldDefinition {
        let Some(key) = limit_key else {
            return base.clone();
        };
        let limit = self.resolve(platforms, key);
        if limit.is_unbounded() {
            return base.clone();
        }

        debug!(
            field = %base.id,
            limit_key = key,
            max_length = ?limit.max_length,
            min_value = ?limit.min_value,
            max_value = ?limit.max_value,
            "resolved platform limit"
        );

        let merged = FieldLimit {
            max_length: base.max_length,
            min_value: base.min_value,
            max_value: base.max_value,
        }
        .tighten(limit);

        FieldDefinition {
            max_length: merged.max_length,
            min_value: merged.min_value,
            max_value: merged.max_value,
            ..base.clone()
        }
    }
}

impl Default for PlatformConstraintResolver {
    fn default() -> Self {
        Self::new(LimitTable::builtin())
    }
}
