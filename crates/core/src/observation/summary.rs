//! The composite summary document written back onto a run.
//!
//! Sections not produced by the selected pipeline are omitted from the
//! serialized output. All maps are `BTreeMap` so recomputing from the
//! same inputs serializes byte-for-byte identically.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

use super::biosecurity::BiosecurityAlerts;
use super::categorical::CategoricalEntry;
use super::confidence::Confidence;
use super::derived::DerivedMetric;
use super::notes::NoteEntry;
use super::numeric::{FieldStats, SimpleStats};
use super::severity::SeveritySummary;
use super::template_config::SummaryMode;

/// Message recorded on the minimal summary of a run with no spots.
pub const NO_SPOTS_MESSAGE: &str = "No observation spots recorded";

/// Observed-at span of the run's spots.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateRange {
    pub first: Timestamp,
    pub last: Timestamp,
}

/// Block identification carried into the summary when a block is known.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlockSummary {
    pub id: DbId,
    pub name: String,
    pub area_ha: Option<f64>,
}

/// Metadata attached by the summarization service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryMetadata {
    pub template_type: String,
    pub template_name: String,
    pub run_id: DbId,
    pub completed_at: Timestamp,
}

/// The composite summary document.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunSummary {
    pub summary_mode: SummaryMode,
    pub n_spots: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_info: Option<BlockSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<BTreeMap<String, FieldStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical_distribution: Option<BTreeMap<String, CategoricalEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_metrics: Option<BTreeMap<String, DerivedMetric>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_summary: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_summary: Option<SeveritySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_summary: Option<BTreeMap<String, SimpleStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biosecurity_alerts: Option<BiosecurityAlerts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_digest: Option<Vec<NoteEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SummaryMetadata>,
}

impl RunSummary {
    /// A bare summary with every section absent.
    pub fn bare(summary_mode: SummaryMode, n_spots: usize) -> Self {
        Self {
            summary_mode,
            n_spots,
            message: None,
            date_range: None,
            block_info: None,
            statistics: None,
            categorical_distribution: None,
            derived_metrics: None,
            flag_summary: None,
            severity_summary: None,
            numeric_summary: None,
            biosecurity_alerts: None,
            confidence: None,
            notes_digest: None,
            metadata: None,
        }
    }

    /// Minimal summary for a run with zero spots.
    pub fn empty() -> Self {
        let mut summary = Self::bare(SummaryMode::None, 0);
        summary.message = Some(NO_SPOTS_MESSAGE.to_string());
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_serializes_minimally() {
        let value = serde_json::to_value(RunSummary::empty()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "summary_mode": "none",
                "n_spots": 0,
                "message": NO_SPOTS_MESSAGE,
            })
        );
    }

    #[test]
    fn absent_sections_are_omitted() {
        let json = serde_json::to_string(&RunSummary::bare(SummaryMode::Observational, 3)).unwrap();
        assert!(!json.contains("statistics"));
        assert!(!json.contains("flag_summary"));
        assert!(!json.contains("confidence"));
    }
}
