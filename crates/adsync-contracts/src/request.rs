//! Preview request types: the campaign hierarchy plus its data source.
//!
//! Everything the builder needs arrives in one `PreviewRequest` snapshot,
//! supplied by the hierarchy/data-source collaborator on every run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    ad::FieldValue,
    ad_type::AdTypeKey,
    field::FallbackPolicy,
    platform::Platform,
};

/// One row of sample data: column name → cell.
pub type SampleRow = BTreeMap<String, serde_json::Value>;

/// The inferred type of a data-source column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Url,
    Date,
    Boolean,
}

/// A column the campaign set's data source exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceColumn {
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<serde_json::Value>,
}

impl DataSourceColumn {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            sample_values: Vec::new(),
        }
    }
}

/// Flight dates of an ad group, RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// One ad: per-field templates and optional fallback policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdConfig {
    pub id: String,
    /// Display-name template; defaults to "<ad group name> / <ad id>".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fallbacks: BTreeMap<String, FallbackPolicy>,
    /// When set, the resolved ad is also checked against this ad type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_type: Option<AdTypeKey>,
    /// Index into `PreviewRequest::sample_rows` for this ad.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_row: Option<usize>,
    /// Product-name template, reported on skipped entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Substitute ad synchronized in place of this one on fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_ad_id: Option<String>,
}

impl AdConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            fields: BTreeMap::new(),
            fallbacks: BTreeMap::new(),
            ad_type: None,
            sample_row: None,
            product_name: None,
            fallback_ad_id: None,
        }
    }

    pub fn field(mut self, id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(id.into(), value.into());
        self
    }

    pub fn fallback(mut self, id: impl Into<String>, policy: FallbackPolicy) -> Self {
        self.fallbacks.insert(id.into(), policy);
        self
    }

    pub fn row(mut self, index: usize) -> Self {
        self.sample_row = Some(index);
        self
    }
}

/// An ad group: a name template and an ordered list of ads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupConfig {
    pub id: String,
    pub name_template: String,
    /// Positive number or numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub ads: Vec<AdConfig>,
}

/// A campaign: a name template and its ad groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignConfig {
    pub id: String,
    pub name_template: String,
    /// Sample row shared by every ad of the campaign that names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_row: Option<usize>,
    #[serde(default)]
    pub ad_groups: Vec<AdGroupConfig>,
}

/// The campaign → ad group → ad hierarchy of a campaign set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default)]
    pub campaigns: Vec<CampaignConfig>,
}

impl HierarchyConfig {
    /// Total number of ads in structural order.
    pub fn ad_count(&self) -> usize {
        self.campaigns
            .iter()
            .flat_map(|c| &c.ad_groups)
            .map(|g| g.ads.len())
            .sum()
    }
}

/// Everything a single preview run consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub campaign_set_id: String,
    pub hierarchy: HierarchyConfig,
    #[serde(default)]
    pub columns: Vec<DataSourceColumn>,
    #[serde(default)]
    pub sample_rows: Vec<SampleRow>,
    pub platforms: Vec<Platform>,
}

impl PreviewRequest {
    /// Decode a request from its JSON wire form.
    pub fn from_json_str(s: &str) -> crate::error::AdsyncResult<Self> {
        serde_json::from_str(s).map_err(|e| crate::error::AdsyncError::RequestDecode {
            reason: e.to_string(),
        })
    }
}
