//! Sync preview report types.
//!
//! A `SyncPreview` is produced fresh for every preview request. It is a flat,
//! JSON-compatible record: every ad of the campaign set lands in exactly one
//! of `valid_ads`, `fallback_ads`, or `skipped_ads`, and the breakdown
//! counters always sum to `total_ads`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable reason an ad was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RequiredField,
    InvalidDatetime,
    InvalidUrl,
    FieldTooLong,
    InvalidEnumValue,
    InvalidBudget,
    MissingDependency,
    ConstraintViolation,
    ValueOutOfRange,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RequiredField => "REQUIRED_FIELD",
            ErrorCode::InvalidDatetime => "INVALID_DATETIME",
            ErrorCode::InvalidUrl => "INVALID_URL",
            ErrorCode::FieldTooLong => "FIELD_TOO_LONG",
            ErrorCode::InvalidEnumValue => "INVALID_ENUM_VALUE",
            ErrorCode::InvalidBudget => "INVALID_BUDGET",
            ErrorCode::MissingDependency => "MISSING_DEPENDENCY",
            ErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorCode::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field whose value will be replaced by a degraded substitute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSubstitution {
    pub field: String,
    /// The interpolated value before degradation.
    pub original: String,
    /// The value that will actually be synchronized.
    pub value: String,
}

/// The single terminal outcome of classifying one ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdOutcome {
    Valid,
    Fallback {
        reason: String,
        substitutions: Vec<FieldSubstitution>,
    },
    Skipped {
        reason: String,
        error_code: ErrorCode,
        field: String,
        value: Option<String>,
        expected: Option<String>,
    },
}

/// Counters per outcome. Always sums to `SyncPreview::total_ads`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub valid: usize,
    pub fallback: usize,
    pub skipped: usize,
}

impl Breakdown {
    pub fn total(&self) -> usize {
        self.valid + self.fallback + self.skipped
    }
}

/// An ad that synchronizes as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidAd {
    pub ad_id: String,
    pub ad_group_id: String,
    pub campaign_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

/// An ad that synchronizes with degraded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackAd {
    pub ad_id: String,
    pub ad_group_id: String,
    pub campaign_id: String,
    pub name: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_ad_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substitutions: Vec<FieldSubstitution>,
}

/// An ad excluded from synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedAd {
    pub ad_id: String,
    pub ad_group_id: String,
    pub campaign_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub reason: String,
    pub error_code: ErrorCode,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

/// The aggregate classification report for a whole campaign set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPreview {
    pub campaign_set_id: String,
    pub total_ads: usize,
    pub breakdown: Breakdown,
    pub valid_ads: Vec<ValidAd>,
    pub fallback_ads: Vec<FallbackAd>,
    pub skipped_ads: Vec<SkippedAd>,
    /// True only when no ad is skipped. Bypassing is a caller decision.
    pub can_proceed: bool,
    pub warnings: Vec<String>,
    pub validation_time_ms: u64,
}
