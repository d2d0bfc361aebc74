//! Numeric aggregator: per-field descriptive statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use super::context::Spot;
use super::stats;

/// Full descriptive statistics for one numeric field (calculated mode).
/// All reported numbers are rounded to two decimal places.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldStats {
    pub n: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub stdev: f64,
    /// `[low, high]` under the normal approximation; `null` for n == 1.
    pub ci95: Option<(f64, f64)>,
}

/// Simple statistics for one numeric field (observational mode).
/// Means carry one decimal; min/max are reported as observed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimpleStats {
    pub n: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Collect the parseable numeric values for one field across all spots.
/// Non-numeric and missing values are skipped; one bad value never
/// fails the run.
pub fn collect_values(field: &str, spots: &[Spot]) -> Vec<f64> {
    spots
        .iter()
        .filter_map(|spot| spot.field(field).as_number())
        .collect()
}

/// Descriptive statistics for every configured numeric field. Fields
/// that yield no values are omitted from the output.
pub fn aggregate_fields(fields: &[String], spots: &[Spot]) -> BTreeMap<String, FieldStats> {
    let mut out = BTreeMap::new();
    for field in fields {
        let values = collect_values(field, spots);
        if let Some(stats) = field_stats(&values) {
            out.insert(field.clone(), stats);
        }
    }
    out
}

/// Simple mean/min/max for the given fields (observational mode).
pub fn aggregate_simple(fields: &[String], spots: &[Spot]) -> BTreeMap<String, SimpleStats> {
    let mut out = BTreeMap::new();
    for field in fields {
        let values = collect_values(field, spots);
        if let Some(stats) = simple_stats(&values) {
            out.insert(field.clone(), stats);
        }
    }
    out
}

fn field_stats(values: &[f64]) -> Option<FieldStats> {
    let mean = stats::mean(values)?;
    let stdev = stats::sample_stdev(values);
    let ci95 = stats::ci95(mean, stdev, values.len())
        .map(|(lo, hi)| (stats::round2(lo), stats::round2(hi)));
    Some(FieldStats {
        n: values.len(),
        mean: stats::round2(mean),
        min: stats::round2(values.iter().copied().fold(f64::INFINITY, f64::min)),
        max: stats::round2(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        stdev: stats::round2(stdev),
        ci95,
    })
}

/// Mean (one decimal), min and max. `None` for no values.
pub fn simple_stats(values: &[f64]) -> Option<SimpleStats> {
    let mean = stats::mean(values)?;
    Some(SimpleStats {
        n: values.len(),
        mean: stats::round1(mean),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}
