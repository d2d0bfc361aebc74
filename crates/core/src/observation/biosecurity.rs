//! Biosecurity alert detection.
//!
//! Scans the reserved pest/disease key of every spot for
//! quarantine-significant codes. Any detection requires immediate
//! reporting; the summary only aggregates, escalation happens
//! downstream.

use serde::Serialize;

use crate::types::DbId;

use super::context::Spot;

/// Reserved categorical key carrying the pest/disease identifier.
pub const BIOSECURITY_FIELD: &str = "pest_or_disease";

/// Spot data key consulted for severity when the template does not
/// name a severity field.
const DEFAULT_SEVERITY_FIELD: &str = "severity";

/// Quarantine-significant `(code, display label)` vocabulary.
/// Matching is exact and case-insensitive on the code.
pub const ALERT_SPECIES: &[(&str, &str)] = &[
    ("bmsb_alert", "Brown marmorated stink bug"),
    ("exotic_fruit_fly", "Exotic fruit fly"),
    ("flavescence_doree", "Flavescence doree"),
    ("glassy_winged_sharpshooter", "Glassy-winged sharpshooter"),
    ("phylloxera", "Grape phylloxera"),
    ("spotted_lanternfly", "Spotted lanternfly"),
    ("xylella_fastidiosa", "Xylella fastidiosa"),
];

/// One detected alert species aggregated across spots.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpeciesAlert {
    pub code: String,
    pub label: String,
    pub spot_ids: Vec<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_severity: Option<f64>,
}

/// Outcome of the biosecurity scan.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BiosecurityAlerts {
    pub detected: bool,
    pub species: Vec<SpeciesAlert>,
    pub requires_immediate_report: bool,
}

/// Scan all spots for alert species.
///
/// `severity_field` is the template's severity field when it has one;
/// the literal `severity` key is consulted otherwise.
pub fn detect(spots: &[Spot], severity_field: Option<&str>) -> BiosecurityAlerts {
    let severity_key = severity_field.unwrap_or(DEFAULT_SEVERITY_FIELD);
    let mut species: Vec<SpeciesAlert> = Vec::new();

    for spot in spots {
        let Some(raw) = spot.field(BIOSECURITY_FIELD).as_category() else {
            continue;
        };
        let code = raw.to_lowercase();
        let Some((_, label)) = ALERT_SPECIES.iter().find(|(c, _)| *c == code) else {
            continue;
        };
        let severity = spot.field(severity_key).as_number();
        match species.iter_mut().find(|s| s.code == code) {
            Some(entry) => {
                entry.spot_ids.push(spot.id);
                if let Some(sev) = severity {
                    entry.max_severity = Some(entry.max_severity.map_or(sev, |m| m.max(sev)));
                }
            }
            None => species.push(SpeciesAlert {
                code,
                label: (*label).to_string(),
                spot_ids: vec![spot.id],
                max_severity: severity,
            }),
        }
    }

    species.sort_by(|a, b| a.code.cmp(&b.code));
    let detected = !species.is_empty();
    BiosecurityAlerts {
        detected,
        species,
        requires_immediate_report: detected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spot(id: i64, pairs: &[(&str, serde_json::Value)]) -> Spot {
        Spot {
            id,
            block_id: None,
            row_id: None,
            observed_at: None,
            data: pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        }
    }

    #[test]
    fn bmsb_sighting_triggers_immediate_report() {
        let spots = vec![spot(1, &[("pest_or_disease", json!("bmsb_alert"))])];
        let alerts = detect(&spots, None);
        assert!(alerts.detected);
        assert!(alerts.requires_immediate_report);
        assert_eq!(alerts.species[0].code, "bmsb_alert");
        assert_eq!(alerts.species[0].spot_ids, vec![1]);
    }

    #[test]
    fn common_pests_do_not_alert() {
        let spots = vec![
            spot(1, &[("pest_or_disease", json!("powdery_mildew"))]),
            spot(2, &[("pest_or_disease", json!("light_brown_apple_moth"))]),
            spot(3, &[]),
        ];
        let alerts = detect(&spots, None);
        assert!(!alerts.detected);
        assert!(alerts.species.is_empty());
        assert!(!alerts.requires_immediate_report);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let spots = vec![spot(1, &[("pest_or_disease", json!("Phylloxera"))])];
        assert!(detect(&spots, None).detected);
    }

    #[test]
    fn severity_is_aggregated_per_species() {
        let spots = vec![
            spot(1, &[("pest_or_disease", json!("phylloxera")), ("severity", json!(2))]),
            spot(2, &[("pest_or_disease", json!("phylloxera")), ("severity", json!(4))]),
            spot(3, &[("pest_or_disease", json!("phylloxera"))]),
        ];
        let alerts = detect(&spots, None);
        let entry = &alerts.species[0];
        assert_eq!(entry.spot_ids, vec![1, 2, 3]);
        assert_eq!(entry.max_severity, Some(4.0));
    }

    #[test]
    fn template_severity_field_takes_precedence() {
        let spots = vec![spot(
            1,
            &[("pest_or_disease", json!("spotted_lanternfly")), ("pest_severity", json!(5))],
        )];
        let alerts = detect(&spots, Some("pest_severity"));
        assert_eq!(alerts.species[0].max_severity, Some(5.0));
    }

    #[test]
    fn species_are_sorted_by_code() {
        let spots = vec![
            spot(1, &[("pest_or_disease", json!("xylella_fastidiosa"))]),
            spot(2, &[("pest_or_disease", json!("bmsb_alert"))]),
        ];
        let alerts = detect(&spots, None);
        assert_eq!(alerts.species[0].code, "bmsb_alert");
        assert_eq!(alerts.species[1].code, "xylella_fastidiosa");
    }
}
