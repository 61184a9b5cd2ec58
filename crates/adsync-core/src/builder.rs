//! The sync preview builder: classifies every ad of a campaign set.
//!
//! Per ad, in order:
//!
//!   Row → Ad group → Fields (Variables → Resolve → Limit → Check → Fallback) → Ad type
//!
//! 1. Select the ad's sample row (`ad.sample_row`, else the campaign's,
//!    else the first row). An index past the end skips the ad.
//! 2. Check the ad group's budget and schedule.
//! 3. For every sync field (configured fields in order, then any extra
//!    field the ad carries): reject unknown variables, resolve the template,
//!    tighten the definition to the selected platforms, and check the value.
//!    Placeholders in a field without variable support skip the ad. The
//!    check runs on the resolved value, so braces coming from row data are
//!    plain text. A failure made only of length overruns on a field with a
//!    truncating fallback policy degrades to a fallback; anything else skips
//!    the ad.
//! 4. When the ad names an ad type, check the resolved ad against it. Its
//!    advisory findings become preview warnings prefixed with the ad id.
//!
//! The first blocking failure decides the skip reason. Skip beats fallback.
//! One ad's failure never affects another's classification.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::time::Instant;

use chrono::DateTime;
use tracing::{debug, info, warn};

use adsync_contracts::{
    ad::{AdInstance, FieldValue},
    error::AdsyncError,
    field::FieldDefinition,
    preview::{AdOutcome, Breakdown, FallbackAd, FieldSubstitution, SkippedAd, SyncPreview, ValidAd},
    request::{AdConfig, AdGroupConfig, CampaignConfig, PreviewRequest, SampleRow, Schedule},
    validation::{FieldViolation, ViolationKind},
};
use adsync_template::{data_variables, is_templated, resolve, scan, FilterRegistry};

use crate::{
    config::EngineConfig,
    constraints::PlatformConstraintResolver,
    fallback::truncate,
    traits::{AdTypeSource, FieldChecker},
};

/// One ad with its ids, display names, and outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedAd {
    pub ad_id: String,
    pub ad_group_id: String,
    pub campaign_id: String,
    pub name: String,
    pub product_name: Option<String>,
    pub fallback_ad_id: Option<String>,
    pub outcome: AdOutcome,
    /// Advisory ad type findings. Never block the ad.
    pub advisories: Vec<String>,
}

/// A blocking failure and the value that caused it.
struct Blocked {
    violation: FieldViolation,
    value: Option<String>,
}

impl Blocked {
    fn new(violation: FieldViolation, value: Option<String>) -> Self {
        Self { violation, value }
    }

    fn into_outcome(self) -> AdOutcome {
        AdOutcome::Skipped {
            reason: self.violation.message,
            error_code: self.violation.kind.error_code(),
            field: self.violation.field,
            value: self.value.filter(|v| !v.is_empty()),
            expected: self.violation.expected,
        }
    }
}

/// Per-request state shared by every ad of one build.
struct Run<'a> {
    request: &'a PreviewRequest,
    known: BTreeSet<String>,
    empty_row: SampleRow,
}

impl<'a> Run<'a> {
    fn new(request: &'a PreviewRequest) -> Self {
        Self {
            request,
            known: known_variables(request),
            empty_row: SampleRow::new(),
        }
    }

    fn select_row(&self, campaign: &CampaignConfig, ad: &AdConfig) -> Result<&SampleRow, Blocked> {
        let rows = &self.request.sample_rows;
        match ad.sample_row.or(campaign.sample_row) {
            Some(index) => rows.get(index).ok_or_else(|| {
                Blocked::new(
                    FieldViolation::new(
                        "sampleRow",
                        ViolationKind::MissingSampleRow,
                        format!(
                            "Sample row {index} does not exist ({} rows available)",
                            rows.len()
                        ),
                    )
                    .expecting(format!("an index below {}", rows.len())),
                    Some(index.to_string()),
                )
            }),
            None => Ok(rows.first().unwrap_or(&self.empty_row)),
        }
    }
}

/// Variables a template may reference: the declared columns, or the union
/// of sample-row keys when no columns are declared.
fn known_variables(request: &PreviewRequest) -> BTreeSet<String> {
    if !request.columns.is_empty() {
        return request.columns.iter().map(|c| c.name.clone()).collect();
    }
    request
        .sample_rows
        .iter()
        .flat_map(|row| row.keys().cloned())
        .collect()
}

/// Builds a `SyncPreview` from a `PreviewRequest`.
///
/// Owns the registry and the field checker behind their trait seams, plus
/// the engine configuration. One builder serves any number of requests.
pub struct SyncPreviewBuilder {
    registry: Box<dyn AdTypeSource>,
    checker: Box<dyn FieldChecker>,
    resolver: PlatformConstraintResolver,
    filters: FilterRegistry,
    config: EngineConfig,
}

impl SyncPreviewBuilder {
    pub fn new(
        registry: Box<dyn AdTypeSource>,
        checker: Box<dyn FieldChecker>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            checker,
            resolver: PlatformConstraintResolver::new(config.limits.clone()),
            filters: FilterRegistry::with_names(config.filters.iter().cloned()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify every ad and aggregate the results.
    ///
    /// Total: every ad in the hierarchy appears in exactly one of the three
    /// lists, in structural order. Never fails; problems with ad data are
    /// reported as skips.
    pub fn build(&self, request: &PreviewRequest) -> SyncPreview {
        let started = Instant::now();
        debug!(
            campaign_set_id = %request.campaign_set_id,
            ads = request.hierarchy.ad_count(),
            platforms = ?request.platforms,
            "building sync preview"
        );

        let mut valid_ads = Vec::new();
        let mut fallback_ads = Vec::new();
        let mut skipped_ads = Vec::new();
        let mut advisories = Vec::new();

        for ad in self.classify(request) {
            advisories.extend(ad.advisories.iter().map(|a| format!("{}: {a}", ad.ad_id)));
            match ad.outcome {
                AdOutcome::Valid => valid_ads.push(ValidAd {
                    ad_id: ad.ad_id,
                    ad_group_id: ad.ad_group_id,
                    campaign_id: ad.campaign_id,
                    name: ad.name,
                    product_name: ad.product_name,
                }),
                AdOutcome::Fallback {
                    reason,
                    substitutions,
                } => fallback_ads.push(FallbackAd {
                    ad_id: ad.ad_id,
                    ad_group_id: ad.ad_group_id,
                    campaign_id: ad.campaign_id,
                    name: ad.name,
                    reason,
                    fallback_ad_id: ad.fallback_ad_id,
                    substitutions,
                }),
                AdOutcome::Skipped {
                    reason,
                    error_code,
                    field,
                    value,
                    expected,
                } => skipped_ads.push(SkippedAd {
                    ad_id: ad.ad_id,
                    ad_group_id: ad.ad_group_id,
                    campaign_id: ad.campaign_id,
                    name: ad.name,
                    product_name: ad.product_name,
                    reason,
                    error_code,
                    field,
                    value,
                    expected,
                }),
            }
        }

        let breakdown = Breakdown {
            valid: valid_ads.len(),
            fallback: fallback_ads.len(),
            skipped: skipped_ads.len(),
        };
        let total_ads = breakdown.total();
        let mut warnings = self.warnings(request, &breakdown);
        warnings.extend(advisories);

        info!(
            campaign_set_id = %request.campaign_set_id,
            total = total_ads,
            valid = breakdown.valid,
            fallback = breakdown.fallback,
            skipped = breakdown.skipped,
            "sync preview built"
        );

        SyncPreview {
            campaign_set_id: request.campaign_set_id.clone(),
            total_ads,
            breakdown,
            valid_ads,
            fallback_ads,
            skipped_ads,
            can_proceed: breakdown.skipped == 0,
            warnings,
            validation_time_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Classify every ad in structural order (campaign → ad group → ad).
    pub fn classify(&self, request: &PreviewRequest) -> Vec<ClassifiedAd> {
        let run = Run::new(request);
        let mut out = Vec::with_capacity(request.hierarchy.ad_count());

        for campaign in &request.hierarchy.campaigns {
            for group in &campaign.ad_groups {
                for ad in &group.ads {
                    let mut advisories = Vec::new();
                    let (row, outcome) = match run.select_row(campaign, ad) {
                        Ok(row) => {
                            let outcome = self.classify_ad(&run, group, ad, row, &mut advisories);
                            (row, outcome)
                        }
                        Err(blocked) => (&run.empty_row, blocked.into_outcome()),
                    };

                    if let AdOutcome::Skipped {
                        error_code, field, ..
                    } = &outcome
                    {
                        warn!(
                            ad_id = %ad.id,
                            ad_group_id = %group.id,
                            field = %field,
                            error_code = %error_code,
                            "ad skipped"
                        );
                    }

                    out.push(ClassifiedAd {
                        ad_id: ad.id.clone(),
                        ad_group_id: group.id.clone(),
                        campaign_id: campaign.id.clone(),
                        name: self.display_name(group, ad, row),
                        product_name: ad
                            .product_name
                            .as_deref()
                            .map(|t| resolve(t, row, &self.filters))
                            .filter(|name| !name.is_empty()),
                        fallback_ad_id: ad.fallback_ad_id.clone(),
                        outcome,
                        advisories,
                    });
                }
            }
        }
        out
    }

    // ── Per-ad classification ─────────────────────────────────────────────────

    fn classify_ad(
        &self,
        run: &Run<'_>,
        group: &AdGroupConfig,
        ad: &AdConfig,
        row: &SampleRow,
        advisories: &mut Vec<String>,
    ) -> AdOutcome {
        if let Some(blocked) = self.check_group(group, row) {
            return blocked.into_outcome();
        }

        let mut substitutions: Vec<FieldSubstitution> = Vec::new();
        let mut reasons: Vec<String> = Vec::new();
        let mut resolved = AdInstance::new();

        for (definition, limit_key) in self.field_plan(ad) {
            let id = definition.id.as_str();
            let raw = ad.fields.get(id);

            let value = match raw {
                Some(raw) if definition.supports_variables => {
                    if let Some(blocked) = self.unknown_variable(id, raw, &run.known) {
                        return blocked.into_outcome();
                    }
                    Some(self.resolve_value(raw, row))
                }
                Some(raw) => {
                    if let Some(blocked) = literal_only(&definition, raw) {
                        return blocked.into_outcome();
                    }
                    Some(raw.clone())
                }
                None => None,
            };

            let effective =
                self.resolver
                    .effective_definition(&definition, limit_key, &run.request.platforms);
            let violations = self.checker.check_resolved(&effective, value.as_ref());

            if violations.is_empty() {
                debug!(ad_id = %ad.id, field = id, "field valid");
                if let Some(value) = value {
                    resolved.insert(id.to_string(), value);
                }
                continue;
            }

            match self.try_fallback(ad, &effective, value.as_ref(), &violations) {
                Some((substitution, repaired)) => {
                    reasons.push(format!(
                        "Text will be truncated: {} shortened from {} to {} characters",
                        effective.name,
                        substitution.original.chars().count(),
                        substitution.value.chars().count()
                    ));
                    debug!(ad_id = %ad.id, field = id, "field degraded to fallback");
                    substitutions.push(substitution);
                    resolved.insert(id.to_string(), repaired);
                }
                None => {
                    let display = value.as_ref().map(ToString::to_string);
                    if let Some(first) = violations.into_iter().next() {
                        return Blocked::new(first, display).into_outcome();
                    }
                }
            }
        }

        if let Some(blocked) = self.check_ad_type(ad, &resolved, advisories) {
            return blocked.into_outcome();
        }

        if substitutions.is_empty() {
            AdOutcome::Valid
        } else {
            AdOutcome::Fallback {
                reason: reasons.join("; "),
                substitutions,
            }
        }
    }

    /// Configured sync fields in order, then fields only the ad carries.
    fn field_plan<'s>(&'s self, ad: &AdConfig) -> Vec<(Cow<'s, FieldDefinition>, Option<&'s str>)> {
        let mut plan: Vec<(Cow<'s, FieldDefinition>, Option<&'s str>)> = self
            .config
            .fields
            .iter()
            .map(|spec| (Cow::Borrowed(&spec.definition), spec.limit_key.as_deref()))
            .collect();

        for id in ad.fields.keys() {
            if self.config.field(id).is_none() {
                plan.push((
                    Cow::Owned(FieldDefinition::text(id.clone(), id.clone()).variables()),
                    None,
                ));
            }
        }
        plan
    }

    fn resolve_value(&self, raw: &FieldValue, row: &SampleRow) -> FieldValue {
        match raw {
            FieldValue::Text(s) if is_templated(s) => FieldValue::Text(resolve(s, row, &self.filters)),
            FieldValue::List(items) => {
                FieldValue::List(items.iter().map(|i| self.resolve_value(i, row)).collect())
            }
            other => other.clone(),
        }
    }

    fn unknown_variable(
        &self,
        field: &str,
        raw: &FieldValue,
        known: &BTreeSet<String>,
    ) -> Option<Blocked> {
        let templates: Vec<&str> = match raw {
            FieldValue::Text(s) => vec![s.as_str()],
            FieldValue::List(items) => items.iter().filter_map(FieldValue::as_text).collect(),
            _ => Vec::new(),
        };

        for template in templates {
            for name in data_variables(template, &self.filters) {
                if !known.contains(&name) {
                    return Some(Blocked::new(
                        FieldViolation::new(
                            field,
                            ViolationKind::UnknownVariable,
                            format!("unknown variable: `{name}`"),
                        )
                        .expecting("a data source column"),
                        Some(template.to_string()),
                    ));
                }
            }
        }
        None
    }

    /// Repair a failure made only of length overruns, when the ad opted in.
    fn try_fallback(
        &self,
        ad: &AdConfig,
        definition: &FieldDefinition,
        value: Option<&FieldValue>,
        violations: &[FieldViolation],
    ) -> Option<(FieldSubstitution, FieldValue)> {
        if !violations.iter().all(|v| v.kind.is_length_overrun()) {
            return None;
        }
        let policy = *ad.fallbacks.get(&definition.id)?;
        let limit = definition.max_length?;
        let original = value?.as_text()?;
        let cut = truncate(original, limit, policy)?;

        let repaired = FieldValue::Text(cut.clone());
        if !self.checker.check_resolved(definition, Some(&repaired)).is_empty() {
            return None;
        }

        Some((
            FieldSubstitution {
                field: definition.id.clone(),
                original: original.to_string(),
                value: cut,
            },
            repaired,
        ))
    }

    // ── Ad group checks ───────────────────────────────────────────────────────

    fn check_group(&self, group: &AdGroupConfig, row: &SampleRow) -> Option<Blocked> {
        if let Some(budget) = &group.budget {
            if let Some(blocked) = self.check_budget(budget, row) {
                return Some(blocked);
            }
        }
        group.schedule.as_ref().and_then(check_schedule)
    }

    fn check_budget(&self, budget: &FieldValue, row: &SampleRow) -> Option<Blocked> {
        let amount = match budget {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => resolve(s, row, &self.filters).trim().parse::<f64>().ok(),
            _ => None,
        };
        match amount {
            Some(n) if n.is_finite() && n > 0.0 => None,
            _ => Some(Blocked::new(
                FieldViolation::new(
                    "budget",
                    ViolationKind::InvalidBudget,
                    format!("Budget must be a positive number, got '{budget}'"),
                )
                .expecting("a number greater than 0"),
                Some(budget.to_string()),
            )),
        }
    }

    // ── Ad type check ─────────────────────────────────────────────────────────

    fn check_ad_type(
        &self,
        ad: &AdConfig,
        resolved: &AdInstance,
        advisories: &mut Vec<String>,
    ) -> Option<Blocked> {
        let key = ad.ad_type.as_ref()?;
        let Some(definition) = self.registry.get(key.platform, &key.id) else {
            let err = AdsyncError::UnknownAdType {
                platform: key.platform.to_string(),
                ad_type: key.id.clone(),
            };
            return Some(Blocked::new(
                FieldViolation::new("adType", ViolationKind::UnknownAdType, err.to_string())
                    .expecting("a registered ad type"),
                Some(key.to_string()),
            ));
        };

        let report = self.checker.check_resolved_ad(definition, resolved);
        if let Some(violation) = report.violations.into_iter().next() {
            let value = resolved.get(&violation.field).map(ToString::to_string);
            return Some(Blocked::new(violation, value));
        }
        for warning in &report.warnings {
            debug!(ad_id = %ad.id, ad_type = %key, %warning, "ad type warning");
        }
        advisories.extend(report.warnings);
        None
    }

    // ── Names and warnings ────────────────────────────────────────────────────

    fn display_name(&self, group: &AdGroupConfig, ad: &AdConfig, row: &SampleRow) -> String {
        match &ad.name {
            Some(template) => resolve(template, row, &self.filters),
            None => format!(
                "{} / {}",
                resolve(&group.name_template, row, &self.filters),
                ad.id
            ),
        }
    }

    fn warnings(&self, request: &PreviewRequest, breakdown: &Breakdown) -> Vec<String> {
        let mut warnings = Vec::new();
        let total = breakdown.total();

        if total == 0 {
            warnings.push("Campaign set contains no ads.".to_string());
        }
        if request.sample_rows.is_empty() {
            warnings.push(
                "No sample rows available; variables were checked against column names only."
                    .to_string(),
            );
        }
        if breakdown.fallback > 0 {
            warnings.push(match breakdown.fallback {
                1 => "1 ad will sync with fallback values".to_string(),
                n => format!("{n} ads will sync with fallback values"),
            });
        }
        if total > 0 {
            let rate = breakdown.skipped as f64 * 100.0 / total as f64;
            if rate > self.config.skip_rate_warning_pct {
                warnings.push(format!(
                    "High skip rate ({rate:.0}%): {} of {total} ads will be skipped.",
                    breakdown.skipped
                ));
            }
        }
        warnings
    }
}

/// A field without variable support must not carry placeholders.
fn literal_only(definition: &FieldDefinition, raw: &FieldValue) -> Option<Blocked> {
    let templated = match raw {
        FieldValue::Text(s) => !scan(s).is_empty(),
        FieldValue::List(items) => items
            .iter()
            .filter_map(FieldValue::as_text)
            .any(|s| !scan(s).is_empty()),
        _ => false,
    };
    templated.then(|| {
        Blocked::new(
            FieldViolation::new(
                &definition.id,
                ViolationKind::VariablesNotSupported,
                format!("{} does not support variables", definition.name),
            )
            .expecting("a literal value"),
            Some(raw.to_string()),
        )
    })
}

fn check_schedule(schedule: &Schedule) -> Option<Blocked> {
    let invalid = |field: &str, raw: &str, message: String, expected: String| {
        Blocked::new(
            FieldViolation::new(field, ViolationKind::InvalidDatetime, message).expecting(expected),
            Some(raw.to_string()),
        )
    };

    let start = match DateTime::parse_from_rfc3339(&schedule.start) {
        Ok(start) => start,
        Err(e) => {
            return Some(invalid(
                "schedule.start",
                &schedule.start,
                format!("Schedule start '{}' is not a valid datetime: {e}", schedule.start),
                "an RFC 3339 datetime".to_string(),
            ))
        }
    };

    let end_raw = schedule.end.as_deref()?;
    match DateTime::parse_from_rfc3339(end_raw) {
        Err(e) => Some(invalid(
            "schedule.end",
            end_raw,
            format!("Schedule end '{end_raw}' is not a valid datetime: {e}"),
            "an RFC 3339 datetime".to_string(),
        )),
        Ok(end) if end <= start => Some(invalid(
            "schedule.end",
            end_raw,
            "Schedule end must be after start".to_string(),
            format!("a datetime after {}", schedule.start),
        )),
        Ok(_) => None,
    }
}
