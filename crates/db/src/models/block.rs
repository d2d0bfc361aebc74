//! Vineyard block model (spatial context for summarization).

use serde::Serialize;
use sqlx::FromRow;
use vinea_core::types::DbId;

/// A row from the `blocks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlockRow {
    pub id: DbId,
    pub name: String,
    pub area_ha: Option<f64>,
    pub row_spacing_m: Option<f64>,
    pub vine_spacing_m: Option<f64>,
}
