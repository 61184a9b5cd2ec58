//! Validation result and structured violation types.
//!
//! `ValidationResult` is the uniform contract every validation routine
//! returns. `FieldViolation` is the structured form behind each error
//! string, carrying enough context for the classification builder to pick a
//! reason code without re-parsing messages.

use serde::{Deserialize, Serialize};

use crate::preview::ErrorCode;

/// `{valid, errors, warnings}`. Errors block; warnings are advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True only if `errors` is empty.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no findings.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Build a result from collected findings; `valid` is derived.
    pub fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A failing result with a single error.
    pub fn error(message: impl Into<String>) -> Self {
        Self::from_parts(vec![message.into()], Vec::new())
    }

    /// Append `other`'s findings, recomputing `valid`.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }
}

/// What kind of constraint a value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Required,
    TooShort,
    TooLong,
    PatternMismatch,
    InvalidUrl,
    NotANumber,
    BelowMinimum,
    AboveMaximum,
    TooFewItems,
    TooManyItems,
    ItemTooLong,
    InvalidOption,
    UnknownVariable,
    /// A placeholder in a field that only takes literal values.
    VariablesNotSupported,
    UnknownAdType,
    MissingSampleRow,
    InvalidBudget,
    InvalidDatetime,
    CrossField,
}

impl ViolationKind {
    /// The reason code reported when this violation skips an ad.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ViolationKind::Required => ErrorCode::RequiredField,
            ViolationKind::TooLong | ViolationKind::ItemTooLong => ErrorCode::FieldTooLong,
            ViolationKind::InvalidUrl => ErrorCode::InvalidUrl,
            ViolationKind::InvalidOption => ErrorCode::InvalidEnumValue,
            ViolationKind::BelowMinimum | ViolationKind::AboveMaximum => {
                ErrorCode::ValueOutOfRange
            }
            ViolationKind::UnknownVariable
            | ViolationKind::UnknownAdType
            | ViolationKind::MissingSampleRow => ErrorCode::MissingDependency,
            ViolationKind::InvalidBudget => ErrorCode::InvalidBudget,
            ViolationKind::InvalidDatetime => ErrorCode::InvalidDatetime,
            ViolationKind::TooShort
            | ViolationKind::PatternMismatch
            | ViolationKind::NotANumber
            | ViolationKind::TooFewItems
            | ViolationKind::TooManyItems
            | ViolationKind::VariablesNotSupported
            | ViolationKind::CrossField => ErrorCode::ConstraintViolation,
        }
    }

    /// Length overruns are the only violations a truncation policy repairs.
    pub fn is_length_overrun(&self) -> bool {
        matches!(self, ViolationKind::TooLong)
    }
}

/// A single constraint violation on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Id of the offending field.
    pub field: String,
    pub kind: ViolationKind,
    /// Human-readable message, e.g. `"Headline must be at most 30 characters"`.
    pub message: String,
    /// The constraint the value was expected to satisfy, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
            expected: None,
        }
    }

    pub fn expecting(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

/// Structured findings for a whole ad instance checked against an ad type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdReport {
    /// Blocking findings, field checks first then cross-field rules.
    pub violations: Vec<FieldViolation>,
    pub warnings: Vec<String>,
}

impl AdReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Project onto the `{valid, errors, warnings}` contract.
    pub fn into_result(self) -> ValidationResult {
        ValidationResult::from_parts(
            self.violations.into_iter().map(|v| v.message).collect(),
            self.warnings,
        )
    }
}
