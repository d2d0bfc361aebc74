//! Categorical aggregator: per-field frequency distributions.

use std::collections::BTreeMap;

use serde::Serialize;

use super::context::Spot;
use super::labels;
use super::stats::round1;

/// One distinct value within a field's distribution.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryCount {
    pub value: String,
    pub label: String,
    pub count: usize,
    /// Share of the field's non-null values, one decimal place.
    pub percent: f64,
}

/// Share of spots agreeing on the dominant category. Used as a
/// phenological-stage-uniformity indicator.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Uniformity {
    pub score: f64,
    pub dominant: String,
    pub dominant_percent: f64,
}

/// Entry in the `categorical_distribution` map: either a field's
/// distribution or its `<field>_uniformity` companion.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CategoricalEntry {
    Distribution(Vec<CategoryCount>),
    Uniformity(Uniformity),
}

/// Frequency distribution for one field: counts of each distinct
/// stringified value, sorted by count descending (ties break on the
/// value so the ordering is deterministic). `None` when the field
/// never carries a value.
pub fn distribution(field: &str, spots: &[Spot]) -> Option<Vec<CategoryCount>> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for spot in spots {
        if let Some(value) = spot.field(field).as_category() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    if counts.is_empty() {
        return None;
    }
    let total: usize = counts.values().sum();
    let mut entries: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            label: labels::resolve(field, &value),
            percent: round1(count as f64 * 100.0 / total as f64),
            value,
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    Some(entries)
}

/// Uniformity of a distribution's dominant value.
pub fn uniformity(dist: &[CategoryCount]) -> Option<Uniformity> {
    let top = dist.first()?;
    Some(Uniformity {
        score: (top.percent / 100.0 * 1000.0).round() / 1000.0,
        dominant: top.value.clone(),
        dominant_percent: top.percent,
    })
}

/// Distributions (plus optional uniformity companions) for every
/// configured categorical field. Fields with no values are skipped.
pub fn aggregate_fields(
    fields: &[String],
    spots: &[Spot],
    with_uniformity: bool,
) -> BTreeMap<String, CategoricalEntry> {
    let mut out = BTreeMap::new();
    for field in fields {
        let Some(dist) = distribution(field, spots) else {
            continue;
        };
        if with_uniformity {
            if let Some(u) = uniformity(&dist) {
                out.insert(format!("{field}_uniformity"), CategoricalEntry::Uniformity(u));
            }
        }
        out.insert(field.clone(), CategoricalEntry::Distribution(dist));
    }
    out
}
