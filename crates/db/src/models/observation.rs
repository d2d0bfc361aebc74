//! Observation run and spot models.

use serde::Serialize;
use sqlx::FromRow;
use vinea_core::types::{DbId, Timestamp};

/// A row from the `observation_runs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ObservationRun {
    pub id: DbId,
    pub company_id: DbId,
    pub template_id: DbId,
    pub block_id: Option<DbId>,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    /// Last computed summary document; replaced on recompute.
    pub summary: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// A run joined with its template, as loaded for summarization.
#[derive(Debug, Clone, FromRow)]
pub struct RunContextRow {
    pub id: DbId,
    pub company_id: DbId,
    pub block_id: Option<DbId>,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub template_type: String,
    pub template_name: String,
    pub template_config: Option<serde_json::Value>,
}

/// A row from the `observation_spots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpotRow {
    pub id: DbId,
    pub run_id: DbId,
    pub block_id: Option<DbId>,
    pub row_id: Option<DbId>,
    pub observed_at: Option<Timestamp>,
    /// Template-defined key/value measurements.
    pub data: serde_json::Value,
}
