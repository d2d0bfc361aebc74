//! Production [`ObservationStore`] backed by PostgreSQL.
//!
//! Converts between row models and the engine's context types so the
//! core crate stays free of any sqlx dependency.

use async_trait::async_trait;
use vinea_core::error::CoreError;
use vinea_core::observation::context::{BlockInfo, RunContext, Spot};
use vinea_core::observation::service::ObservationStore;
use vinea_core::observation::summary::RunSummary;
use vinea_core::types::DbId;

use crate::models::block::BlockRow;
use crate::models::observation::{RunContextRow, SpotRow};
use crate::repositories::{BlockRepo, ObservationRunRepo, SpotRepo};
use crate::DbPool;

/// [`ObservationStore`] implementation over the connection pool.
#[derive(Clone)]
pub struct PgObservationStore {
    pool: DbPool,
}

impl PgObservationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn storage_error(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("storage error: {err}"))
}

impl From<RunContextRow> for RunContext {
    fn from(row: RunContextRow) -> Self {
        Self {
            run_id: row.id,
            company_id: row.company_id,
            block_id: row.block_id,
            started_at: row.started_at,
            ended_at: row.ended_at,
            template_type: row.template_type,
            template_name: row.template_name,
            template_config: row.template_config,
        }
    }
}

impl From<SpotRow> for Spot {
    fn from(row: SpotRow) -> Self {
        Self {
            id: row.id,
            block_id: row.block_id,
            row_id: row.row_id,
            observed_at: row.observed_at,
            // Anything but a JSON object reads as an empty measurement
            // map; the pipelines treat every field as missing.
            data: match row.data {
                serde_json::Value::Object(map) => map,
                _ => serde_json::Map::new(),
            },
        }
    }
}

impl From<BlockRow> for BlockInfo {
    fn from(row: BlockRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            area_ha: row.area_ha,
            row_spacing_m: row.row_spacing_m,
            vine_spacing_m: row.vine_spacing_m,
        }
    }
}

#[async_trait]
impl ObservationStore for PgObservationStore {
    async fn fetch_run_context(&self, run_id: DbId) -> Result<Option<RunContext>, CoreError> {
        Ok(ObservationRunRepo::find_context(&self.pool, run_id)
            .await
            .map_err(storage_error)?
            .map(RunContext::from))
    }

    async fn fetch_spots(&self, run_id: DbId) -> Result<Vec<Spot>, CoreError> {
        Ok(SpotRepo::list_for_run(&self.pool, run_id)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(Spot::from)
            .collect())
    }

    async fn fetch_block_info(&self, block_id: DbId) -> Result<Option<BlockInfo>, CoreError> {
        Ok(BlockRepo::find_by_id(&self.pool, block_id)
            .await
            .map_err(storage_error)?
            .map(BlockInfo::from))
    }

    async fn persist_summary(&self, run_id: DbId, summary: &RunSummary) -> Result<(), CoreError> {
        let value = serde_json::to_value(summary)
            .map_err(|err| CoreError::Internal(format!("summary serialization failed: {err}")))?;
        let updated = ObservationRunRepo::save_summary(&self.pool, run_id, &value)
            .await
            .map_err(storage_error)?;
        if !updated {
            return Err(CoreError::NotFound { entity: "ObservationRun", id: run_id });
        }
        Ok(())
    }
}
