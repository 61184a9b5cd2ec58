//! Field definitions: the static schema of one input on an ad type.
//!
//! Definitions are immutable once registered. The builder-style helpers on
//! `FieldDefinition` exist so catalogues and tests can declare fields
//! without spelling out every optional constraint.

use serde::{Deserialize, Serialize};

/// The value shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Url,
    Number,
    Array,
    Select,
    Multiselect,
}

/// One permitted value of a `select` / `multiselect` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The schema of a single ad field.
///
/// Constraints that do not apply to the field's type are ignored by the
/// validator (e.g. `min_value` on a text field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Key of the field inside an ad instance (e.g. `"headline"`).
    pub id: String,
    /// Human-readable name used in every error message.
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Whether the value may contain `{variable}` placeholders.
    #[serde(default)]
    pub supports_variables: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Regex the value must match. Checked even for templated values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldDefinition {
    /// A field of `field_type` with no constraints, optional, no variables.
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            required: false,
            supports_variables: false,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            min_count: None,
            max_count: None,
            options: Vec::new(),
            pattern: None,
        }
    }

    pub fn text(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldType::Text)
    }

    pub fn textarea(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldType::Textarea)
    }

    pub fn url(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldType::Url)
    }

    pub fn number(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldType::Number)
    }

    pub fn array(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldType::Array)
    }

    pub fn select(id: impl Into<String>, name: impl Into<String>, options: &[(&str, &str)]) -> Self {
        Self::new(id, name, FieldType::Select).with_options(options)
    }

    pub fn multiselect(
        id: impl Into<String>,
        name: impl Into<String>,
        options: &[(&str, &str)],
    ) -> Self {
        Self::new(id, name, FieldType::Multiselect).with_options(options)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn variables(mut self) -> Self {
        self.supports_variables = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn min_value(mut self, v: f64) -> Self {
        self.min_value = Some(v);
        self
    }

    pub fn max_value(mut self, v: f64) -> Self {
        self.max_value = Some(v);
        self
    }

    pub fn count(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_count = min;
        self.max_count = max;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    fn with_options(mut self, options: &[(&str, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(value, label)| FieldOption::new(*value, *label))
            .collect();
        self
    }

    /// Return true if `value` is one of the declared option values.
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// How to degrade a value that would otherwise overrun a length limit.
///
/// Expressed in TOML/JSON as `"truncate"`, `"truncate_word"`, or `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Hard-cut the text at the limit.
    Truncate,
    /// Cut at the last whitespace boundary at or before the limit.
    TruncateWord,
    /// No degradation; an overrun skips the ad.
    Error,
}
