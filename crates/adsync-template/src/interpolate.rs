//! Interpolation of templates against a row of source data.
//!
//! Two entry points with different contracts:
//!
//! - [`interpolate`] substitutes `row[primary]` for every placeholder and
//!   yields the empty string when the primary name is absent. Fallback
//!   names and filters are ignored.
//! - [`resolve`] walks the fallback chain (first present, non-empty value
//!   among the data names) and then applies the placeholder's filters in
//!   written order. The classification builder uses this one.

use std::collections::{BTreeMap, HashMap};

use crate::{
    filters::FilterRegistry,
    placeholder::{scan, substitute, Placeholder},
};

/// A source of cell values keyed by column name.
pub trait Row {
    /// The cell's display string, or `None` when the column is absent/null.
    fn cell(&self, name: &str) -> Option<String>;
}

impl Row for BTreeMap<String, String> {
    fn cell(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Row for HashMap<String, String> {
    fn cell(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Row for BTreeMap<String, serde_json::Value> {
    fn cell(&self, name: &str) -> Option<String> {
        self.get(name).and_then(json_cell)
    }
}

impl Row for serde_json::Map<String, serde_json::Value> {
    fn cell(&self, name: &str) -> Option<String> {
        self.get(name).and_then(json_cell)
    }
}

fn json_cell(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Substitute `row[primary]` for every placeholder; absent → `""`.
pub fn interpolate<R: Row + ?Sized>(template: &str, row: &R) -> String {
    substitute(template, |p| {
        p.primary()
            .and_then(|name| row.cell(name))
            .unwrap_or_default()
    })
}

/// Character length of the interpolated string.
pub fn character_count<R: Row + ?Sized>(template: &str, row: &R) -> usize {
    interpolate(template, row).chars().count()
}

/// A placeholder split into data names and filter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Primary first, then fallbacks, in written order.
    pub variables: Vec<String>,
    /// Filters in application order.
    pub filters: Vec<String>,
}

/// Split a placeholder's names: the first is always data; each trailing
/// name is a filter iff `filters` recognizes it, otherwise a fallback.
pub fn classify(placeholder: &Placeholder, filters: &FilterRegistry) -> Reference {
    let mut reference = Reference {
        variables: Vec::new(),
        filters: Vec::new(),
    };
    if let Some(primary) = placeholder.primary() {
        reference.variables.push(primary.to_string());
    }
    for name in placeholder.trailing() {
        if filters.is_filter(name) {
            reference.filters.push(name.clone());
        } else {
            reference.variables.push(name.clone());
        }
    }
    reference
}

/// Data names referenced by `template` (filters excluded), de-duplicated in
/// order of first occurrence.
pub fn data_variables(template: &str, filters: &FilterRegistry) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for placeholder in scan(template) {
        for name in classify(&placeholder, filters).variables {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
    }
    seen
}

/// Interpolate with fallback chains and filters.
pub fn resolve<R: Row + ?Sized>(template: &str, row: &R, filters: &FilterRegistry) -> String {
    substitute(template, |p| {
        let reference = classify(p, filters);
        let value = reference
            .variables
            .iter()
            .filter_map(|name| row.cell(name))
            .find(|cell| !cell.is_empty())
            .unwrap_or_default();
        reference
            .filters
            .iter()
            .fold(value, |acc, name| filters.apply(name, &acc))
    })
}
