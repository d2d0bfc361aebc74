//! Mode dispatcher: routes a loaded run to the quantitative or
//! qualitative pipeline and assembles the composite summary.

use crate::types::Timestamp;

use super::biosecurity;
use super::categorical;
use super::confidence;
use super::context::{BlockInfo, Spot};
use super::derived;
use super::flags;
use super::notes;
use super::numeric;
use super::severity;
use super::summary::{BlockSummary, DateRange, RunSummary};
use super::template_config::{SummaryMode, TemplateConfig};

/// Compute the summary for a loaded run.
///
/// Pure: the same spots and config always produce the same document,
/// and spot data is never mutated. A run with zero spots short-circuits
/// to the minimal summary regardless of configuration.
pub fn summarize(config: &TemplateConfig, spots: &[Spot], block: Option<&BlockInfo>) -> RunSummary {
    if spots.is_empty() {
        return RunSummary::empty();
    }
    match config.summary_mode {
        SummaryMode::Calculated => calculated(config, spots, block),
        _ => observational(config, spots, block),
    }
}

/// Quantitative pipeline: statistics, distributions, derived formulas
/// and a combined confidence score.
fn calculated(config: &TemplateConfig, spots: &[Spot], block: Option<&BlockInfo>) -> RunSummary {
    let statistics = numeric::aggregate_fields(&config.numeric_fields, spots);
    let categorical =
        categorical::aggregate_fields(&config.categorical_fields, spots, config.uniformity_calculation);
    let derived_metrics = derived::compute(&config.derived_metrics, &statistics, block);
    let confidence = confidence::score(
        spots.len(),
        block.and_then(|b| b.area_ha),
        config.target_spots_per_ha,
        Some(&statistics),
    );

    let mut summary = RunSummary::bare(SummaryMode::Calculated, spots.len());
    summary.date_range = date_range(spots);
    summary.block_info = block.map(block_summary);
    summary.statistics = Some(statistics);
    summary.categorical_distribution = Some(categorical);
    summary.derived_metrics = Some(derived_metrics);
    summary.confidence = Some(confidence);
    summary.notes_digest = notes::digest(spots);
    summary
}

/// Qualitative pipeline: flag counts, severity, distributions, simple
/// numeric summaries, biosecurity alerts and a coverage-only
/// confidence score.
fn observational(config: &TemplateConfig, spots: &[Spot], block: Option<&BlockInfo>) -> RunSummary {
    let flag_summary = flags::count(&config.count_flags, spots);
    let severity_summary = if config.aggregate_severity {
        severity::aggregate(&config.numeric_fields, spots)
    } else {
        None
    };
    let categorical = categorical::aggregate_fields(&config.categorical_fields, spots, false);

    // Numeric fields not already consumed as severity.
    let consumed = severity_summary.as_ref().map(|s| s.field.as_str());
    let plain_fields: Vec<String> = config
        .numeric_fields
        .iter()
        .filter(|f| Some(f.as_str()) != consumed)
        .cloned()
        .collect();
    let numeric_summary = numeric::aggregate_simple(&plain_fields, spots);

    let biosecurity_alerts = config.biosecurity_alert_check.then(|| {
        biosecurity::detect(
            spots,
            severity::severity_field(&config.numeric_fields).map(String::as_str),
        )
    });
    let confidence = confidence::score(
        spots.len(),
        block.and_then(|b| b.area_ha),
        config.target_spots_per_ha,
        None,
    );

    let mut summary = RunSummary::bare(SummaryMode::Observational, spots.len());
    summary.date_range = date_range(spots);
    summary.block_info = block.map(block_summary);
    summary.flag_summary = (!flag_summary.is_empty()).then_some(flag_summary);
    summary.severity_summary = severity_summary;
    summary.categorical_distribution = (!categorical.is_empty()).then_some(categorical);
    summary.numeric_summary = (!numeric_summary.is_empty()).then_some(numeric_summary);
    summary.biosecurity_alerts = biosecurity_alerts;
    summary.confidence = Some(confidence);
    summary.notes_digest = notes::digest(spots);
    summary
}

/// Min/max observed-at over the spots that carry a timestamp.
fn date_range(spots: &[Spot]) -> Option<DateRange> {
    let stamps: Vec<Timestamp> = spots.iter().filter_map(|s| s.observed_at).collect();
    Some(DateRange {
        first: *stamps.iter().min()?,
        last: *stamps.iter().max()?,
    })
}

fn block_summary(block: &BlockInfo) -> BlockSummary {
    BlockSummary {
        id: block.id,
        name: block.name.clone(),
        area_ha: block.area_ha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn spot(id: i64, hour: u32, pairs: &[(&str, serde_json::Value)]) -> Spot {
        Spot {
            id,
            block_id: Some(1),
            row_id: None,
            observed_at: Some(Utc.with_ymd_and_hms(2025, 11, 14, hour, 0, 0).unwrap()),
            data: pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        }
    }

    fn block() -> BlockInfo {
        BlockInfo {
            id: 1,
            name: "Home Block".into(),
            area_ha: Some(2.0),
            row_spacing_m: Some(2.5),
            vine_spacing_m: Some(1.6),
        }
    }

    fn calculated_config() -> TemplateConfig {
        TemplateConfig {
            summary_mode: SummaryMode::Calculated,
            numeric_fields: vec!["bunches_per_vine".into()],
            categorical_fields: vec!["growth_stage".into()],
            uniformity_calculation: true,
            ..TemplateConfig::default()
        }
    }

    #[test]
    fn zero_spots_short_circuits_regardless_of_config() {
        for config in [TemplateConfig::default(), calculated_config()] {
            let summary = summarize(&config, &[], Some(&block()));
            assert_eq!(summary.summary_mode, SummaryMode::None);
            assert_eq!(summary.n_spots, 0);
            assert!(summary.message.is_some());
            assert!(summary.confidence.is_none());
        }
    }

    #[test]
    fn calculated_summary_assembles_all_sections() {
        let spots = vec![
            spot(1, 8, &[("bunches_per_vine", json!(10)), ("growth_stage", json!("el_23"))]),
            spot(2, 9, &[("bunches_per_vine", json!(12)), ("growth_stage", json!("el_23"))]),
            spot(3, 10, &[("bunches_per_vine", json!(14)), ("growth_stage", json!("el_19"))]),
        ];
        let summary = summarize(&calculated_config(), &spots, Some(&block()));
        assert_eq!(summary.summary_mode, SummaryMode::Calculated);
        assert_eq!(summary.n_spots, 3);

        let range = summary.date_range.as_ref().unwrap();
        assert_eq!(range.first, spots[0].observed_at.unwrap());
        assert_eq!(range.last, spots[2].observed_at.unwrap());

        let block_info = summary.block_info.as_ref().unwrap();
        assert_eq!(block_info.name, "Home Block");
        assert_eq!(block_info.area_ha, Some(2.0));

        let stats = summary.statistics.as_ref().unwrap();
        assert_eq!(stats["bunches_per_vine"].mean, 12.0);

        let categorical = summary.categorical_distribution.as_ref().unwrap();
        assert!(categorical.contains_key("growth_stage"));
        assert!(categorical.contains_key("growth_stage_uniformity"));

        assert!(summary.confidence.is_some());
        // Observational-only sections stay absent.
        assert!(summary.flag_summary.is_none());
        assert!(summary.numeric_summary.is_none());
    }

    #[test]
    fn observational_summary_excludes_severity_from_numeric_summary() {
        let config = TemplateConfig {
            numeric_fields: vec!["mildew_severity".into(), "shoot_count".into()],
            aggregate_severity: true,
            ..TemplateConfig::default()
        };
        let spots = vec![
            spot(1, 8, &[("mildew_severity", json!(2)), ("shoot_count", json!(24))]),
            spot(2, 9, &[("mildew_severity", json!(4)), ("shoot_count", json!(30))]),
        ];
        let summary = summarize(&config, &spots, None);
        assert_eq!(summary.summary_mode, SummaryMode::Observational);

        let severity = summary.severity_summary.as_ref().unwrap();
        assert_eq!(severity.field, "mildew_severity");
        assert_eq!(severity.mean, 3.0);

        let numeric = summary.numeric_summary.as_ref().unwrap();
        assert!(numeric.contains_key("shoot_count"));
        assert!(!numeric.contains_key("mildew_severity"));

        // Quantitative-only sections stay absent.
        assert!(summary.statistics.is_none());
        assert!(summary.derived_metrics.is_none());
    }

    #[test]
    fn severity_field_feeds_numeric_summary_when_not_aggregated() {
        let config = TemplateConfig {
            numeric_fields: vec!["mildew_severity".into()],
            aggregate_severity: false,
            ..TemplateConfig::default()
        };
        let spots = vec![spot(1, 8, &[("mildew_severity", json!(2))])];
        let summary = summarize(&config, &spots, None);
        assert!(summary.severity_summary.is_none());
        assert!(summary.numeric_summary.as_ref().unwrap().contains_key("mildew_severity"));
    }

    #[test]
    fn biosecurity_section_present_only_when_enabled() {
        let spots = vec![spot(1, 8, &[("pest_or_disease", json!("downy_mildew"))])];

        let disabled = summarize(&TemplateConfig::default(), &spots, None);
        assert!(disabled.biosecurity_alerts.is_none());

        let config = TemplateConfig {
            biosecurity_alert_check: true,
            ..TemplateConfig::default()
        };
        let enabled = summarize(&config, &spots, None);
        let alerts = enabled.biosecurity_alerts.as_ref().unwrap();
        assert!(!alerts.detected);
    }

    #[test]
    fn spots_without_timestamps_omit_date_range() {
        let mut lone = spot(1, 8, &[]);
        lone.observed_at = None;
        let summary = summarize(&TemplateConfig::default(), &[lone], None);
        assert!(summary.date_range.is_none());
    }

    #[test]
    fn observational_confidence_has_no_statistical_component() {
        let spots = vec![spot(1, 8, &[]), spot(2, 9, &[])];
        let summary = summarize(&TemplateConfig::default(), &spots, Some(&block()));
        let confidence = summary.confidence.as_ref().unwrap();
        assert_eq!(confidence.details.statistical_score, None);
        assert_eq!(confidence.details.method, "spatial_coverage");
    }
}
