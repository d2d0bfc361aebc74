//! Repository for the `observation_runs` table.

use sqlx::PgPool;
use vinea_core::types::DbId;

use crate::models::observation::{ObservationRun, RunContextRow};

const COLUMNS: &str =
    "id, company_id, template_id, block_id, started_at, ended_at, summary, created_at";

/// Provides read and summary-write operations for observation runs.
pub struct ObservationRunRepo;

impl ObservationRunRepo {
    /// Find a run by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ObservationRun>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM observation_runs WHERE id = $1");
        sqlx::query_as::<_, ObservationRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a run joined with its template, as the summarization
    /// service consumes it. `None` when run or template is missing.
    pub async fn find_context(pool: &PgPool, id: DbId) -> Result<Option<RunContextRow>, sqlx::Error> {
        sqlx::query_as::<_, RunContextRow>(
            "SELECT r.id, r.company_id, r.block_id, r.started_at, r.ended_at, \
                    t.template_type, t.name AS template_name, \
                    t.validations_json AS template_config \
             FROM observation_runs r \
             JOIN observation_templates t ON t.id = r.template_id \
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Write a freshly computed summary onto the run, setting the end
    /// time if it was not already set. Returns `true` if a row was
    /// updated.
    pub async fn save_summary(
        pool: &PgPool,
        id: DbId,
        summary: &serde_json::Value,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE observation_runs \
             SET summary = $2, ended_at = COALESCE(ended_at, NOW()) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(summary)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
