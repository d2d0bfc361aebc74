//! Severity aggregation for the observational pipeline.

use serde::Serialize;

use super::context::Spot;
use super::numeric;
use super::stats::{mean, round1};

/// Aggregated severity over the run's severity field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeveritySummary {
    pub field: String,
    pub n: usize,
    /// One decimal place.
    pub mean: f64,
    pub max: f64,
}

/// First configured numeric field whose name contains `"severity"`.
pub fn severity_field(numeric_fields: &[String]) -> Option<&String> {
    numeric_fields.iter().find(|f| f.contains("severity"))
}

/// Mean and max over the severity field's parseable values. `None`
/// when there is no severity field or it carries no values.
pub fn aggregate(numeric_fields: &[String], spots: &[Spot]) -> Option<SeveritySummary> {
    let field = severity_field(numeric_fields)?;
    let values = numeric::collect_values(field, spots);
    let mean = mean(&values)?;
    Some(SeveritySummary {
        field: field.clone(),
        n: values.len(),
        mean: round1(mean),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}
