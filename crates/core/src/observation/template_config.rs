//! Per-template summarization configuration.
//!
//! Templates store their configuration as free-form JSON. Parsing is
//! tolerant: a missing or malformed configuration falls back to the
//! observational default with empty field lists, so a broken template
//! can never fail a run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling-density target assumed when the template does not set one.
pub const DEFAULT_TARGET_SPOTS_PER_HA: f64 = 5.0;

/// Which summarization pipeline applies to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMode {
    /// No summary computed (zero spots recorded).
    None,
    /// Quantitative pipeline: statistics and derived formulas.
    Calculated,
    /// Qualitative pipeline: counts, flags and distributions.
    Observational,
}

impl SummaryMode {
    /// Parse the configured mode. Anything other than `"calculated"`
    /// is observational, which doubles as the default.
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(mode) if mode.eq_ignore_ascii_case("calculated") => Self::Calculated,
            _ => Self::Observational,
        }
    }
}

/// One configured derived metric.
#[derive(Debug, Clone, Deserialize)]
pub struct DerivedMetricSpec {
    /// Display name the metric is reported under.
    pub name: String,
    /// Calculator identifier, resolved against the closed registry in
    /// [`super::derived::Calculator`]. Unknown identifiers skip the
    /// metric.
    pub calculator: String,
    /// Numeric fields whose aggregated means feed the formula.
    #[serde(default)]
    pub requires_fields: Vec<String>,
    /// Block attributes the formula needs (`area_ha`, `row_spacing_m`,
    /// `vine_spacing_m`, `vines_per_ha`).
    #[serde(default)]
    pub requires_block_data: Vec<String>,
}

/// Parsed template configuration driving the summarization engine.
///
/// Immutable per run; resolved once from the template before dispatch.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub summary_mode: SummaryMode,
    pub numeric_fields: Vec<String>,
    pub categorical_fields: Vec<String>,
    pub derived_metrics: Vec<DerivedMetricSpec>,
    pub count_flags: Vec<String>,
    pub aggregate_severity: bool,
    pub uniformity_calculation: bool,
    pub biosecurity_alert_check: bool,
    pub target_spots_per_ha: f64,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            summary_mode: SummaryMode::Observational,
            numeric_fields: Vec::new(),
            categorical_fields: Vec::new(),
            derived_metrics: Vec::new(),
            count_flags: Vec::new(),
            aggregate_severity: false,
            uniformity_calculation: false,
            biosecurity_alert_check: false,
            target_spots_per_ha: DEFAULT_TARGET_SPOTS_PER_HA,
        }
    }
}

/// Wire shape of the stored configuration. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct RawTemplateConfig {
    #[serde(default)]
    summary_mode: Option<String>,
    #[serde(default)]
    numeric_fields: Vec<String>,
    #[serde(default)]
    categorical_fields: Vec<String>,
    #[serde(default)]
    derived_metrics: Vec<DerivedMetricSpec>,
    #[serde(default)]
    count_flags: Vec<String>,
    #[serde(default)]
    aggregate_severity: bool,
    #[serde(default)]
    uniformity_calculation: bool,
    #[serde(default)]
    biosecurity_alert_check: bool,
    #[serde(default)]
    target_spots_per_ha: Option<f64>,
}

impl TemplateConfig {
    /// Parse a template's raw configuration value.
    ///
    /// `None`, non-object values and JSON that does not deserialize
    /// all fall back to [`TemplateConfig::default`].
    pub fn from_value(raw: Option<&Value>) -> Self {
        let Some(value) = raw else {
            return Self::default();
        };
        match serde_json::from_value::<RawTemplateConfig>(value.clone()) {
            Ok(parsed) => Self::from_raw(parsed),
            Err(err) => {
                tracing::warn!(error = %err, "Malformed template config, using observational default");
                Self::default()
            }
        }
    }

    fn from_raw(raw: RawTemplateConfig) -> Self {
        Self {
            summary_mode: SummaryMode::parse(raw.summary_mode.as_deref()),
            numeric_fields: raw.numeric_fields,
            categorical_fields: raw.categorical_fields,
            derived_metrics: raw.derived_metrics,
            count_flags: raw.count_flags,
            aggregate_severity: raw.aggregate_severity,
            uniformity_calculation: raw.uniformity_calculation,
            biosecurity_alert_check: raw.biosecurity_alert_check,
            target_spots_per_ha: raw
                .target_spots_per_ha
                .filter(|t| *t > 0.0)
                .unwrap_or(DEFAULT_TARGET_SPOTS_PER_HA),
        }
    }
}
