//! Confidence scorer: how trustworthy a summary is, as one 0-1 score.
//!
//! Blends spatial sampling coverage (spots per hectare against the
//! template's target density) with, for the quantitative pipeline, a
//! statistical precision component built from sample depth and the
//! coefficient of variation across numeric fields.

use std::collections::BTreeMap;

use serde::Serialize;

use super::numeric::FieldStats;
use super::stats::{mean, round2};

/// Area assumed when the run has no block or the block has no area.
/// An estimation, not ground truth: whenever it is used the details
/// object discloses it via `assumed_area_ha` and the fallback method
/// marker.
pub const DEFAULT_BLOCK_AREA_HA: f64 = 2.0;

/// Sample count at which the depth sub-score saturates.
const N_SCORE_SATURATION: f64 = 20.0;

/// Composite confidence score with its qualitative label.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Confidence {
    pub score: f64,
    pub label: &'static str,
    pub details: ConfidenceDetails,
}

/// Disclosure of how the score was built.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConfidenceDetails {
    pub spots_recorded: usize,
    pub target_spots_per_ha: f64,
    /// `spatial_coverage`, `spot_count_fallback` or `combined`.
    pub method: &'static str,
    pub spots_per_ha: f64,
    pub coverage_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistical_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assumed_area_ha: Option<f64>,
}

/// Score a summary's trustworthiness.
///
/// Pass `statistics` only from the quantitative pipeline; the
/// qualitative pipeline scores on spatial coverage alone.
pub fn score(
    n_spots: usize,
    area_ha: Option<f64>,
    target_spots_per_ha: f64,
    statistics: Option<&BTreeMap<String, FieldStats>>,
) -> Confidence {
    let (area, assumed_area_ha) = match area_ha {
        Some(area) if area > 0.0 => (area, None),
        _ => (DEFAULT_BLOCK_AREA_HA, Some(DEFAULT_BLOCK_AREA_HA)),
    };
    let spots_per_ha = n_spots as f64 / area;
    let coverage_ratio = spots_per_ha / target_spots_per_ha;
    let coverage_score = coverage_ratio.min(1.0);

    let statistical = statistics.and_then(statistical_score);
    let overall = match statistical {
        Some(stat) => 0.6 * coverage_score + 0.4 * stat,
        None => coverage_score,
    };
    let method = if statistical.is_some() {
        "combined"
    } else if assumed_area_ha.is_none() {
        "spatial_coverage"
    } else {
        "spot_count_fallback"
    };

    Confidence {
        score: round2(overall),
        label: label_for(overall),
        details: ConfidenceDetails {
            spots_recorded: n_spots,
            target_spots_per_ha,
            method,
            spots_per_ha: round2(spots_per_ha),
            coverage_ratio: round2(coverage_ratio),
            statistical_score: statistical.map(round2),
            assumed_area_ha,
        },
    }
}

/// Statistical precision: sample depth (60%) and dispersion (40%).
/// `None` when no numeric field aggregated at all.
pub fn statistical_score(statistics: &BTreeMap<String, FieldStats>) -> Option<f64> {
    let max_n = statistics.values().map(|s| s.n).max()?;
    let n_score = (max_n as f64 / N_SCORE_SATURATION).min(1.0);

    let cvs: Vec<f64> = statistics
        .values()
        .filter(|s| s.mean != 0.0)
        .map(|s| s.stdev / s.mean.abs())
        .collect();
    let cv_score = match mean(&cvs) {
        Some(avg_cv) => cv_to_score(avg_cv),
        None => 0.7,
    };

    Some(0.6 * n_score + 0.4 * cv_score)
}

fn cv_to_score(avg_cv: f64) -> f64 {
    if avg_cv < 0.1 {
        1.0
    } else if avg_cv < 0.3 {
        0.8
    } else if avg_cv < 0.5 {
        0.6
    } else {
        0.4
    }
}

/// Qualitative label for a score.
pub fn label_for(score: f64) -> &'static str {
    if score >= 0.8 {
        "High confidence"
    } else if score >= 0.6 {
        "Good confidence"
    } else if score >= 0.3 {
        "Moderate confidence"
    } else {
        "Low confidence - limited coverage"
    }
}
