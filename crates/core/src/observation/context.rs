//! Loaded run context handed to the pure pipelines.
//!
//! These are the engine-side views of the stored rows: the db crate
//! converts its row types into these before computation starts, so the
//! pipelines stay free of any persistence dependency.

use serde_json::{Map, Value};

use crate::types::{DbId, Timestamp};

use super::field_value::FieldValue;

/// One measurement event within a run. Read-only to the engine.
#[derive(Debug, Clone)]
pub struct Spot {
    pub id: DbId,
    pub block_id: Option<DbId>,
    pub row_id: Option<DbId>,
    pub observed_at: Option<Timestamp>,
    /// Template-defined key/value measurements. The `notes` key is
    /// reserved for free text.
    pub data: Map<String, Value>,
}

impl Spot {
    /// Classified view of one data field.
    pub fn field(&self, name: &str) -> FieldValue {
        FieldValue::from_json(self.data.get(name))
    }
}

/// Spatial context for the block a run sampled, when known.
#[derive(Debug, Clone)]
pub struct BlockInfo {
    pub id: DbId,
    pub name: String,
    pub area_ha: Option<f64>,
    pub row_spacing_m: Option<f64>,
    pub vine_spacing_m: Option<f64>,
}

impl BlockInfo {
    /// Vine density derived from row and vine spacing. Absent unless
    /// both spacings are present and positive.
    pub fn vines_per_ha(&self) -> Option<f64> {
        match (self.row_spacing_m, self.vine_spacing_m) {
            (Some(row), Some(vine)) if row > 0.0 && vine > 0.0 => Some(10_000.0 / (row * vine)),
            _ => None,
        }
    }

    /// Named attribute lookup used by the derived metric calculator.
    pub fn attribute(&self, name: &str) -> Option<f64> {
        match name {
            "area_ha" => self.area_ha,
            "row_spacing_m" => self.row_spacing_m,
            "vine_spacing_m" => self.vine_spacing_m,
            "vines_per_ha" => self.vines_per_ha(),
            _ => None,
        }
    }
}

/// Run and template metadata loaded by the summarization service.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: DbId,
    pub company_id: DbId,
    pub block_id: Option<DbId>,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub template_type: String,
    pub template_name: String,
    /// Raw template configuration; parsed tolerantly by
    /// [`super::template_config::TemplateConfig::from_value`].
    pub template_config: Option<Value>,
}
