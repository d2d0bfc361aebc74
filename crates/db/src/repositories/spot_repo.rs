//! Repository for the `observation_spots` table.

use sqlx::PgPool;
use vinea_core::types::DbId;

use crate::models::observation::SpotRow;

const COLUMNS: &str = "id, run_id, block_id, row_id, observed_at, data";

/// Read-only access to a run's spots. Spots are immutable once
/// summarized; this repository never writes.
pub struct SpotRepo;

impl SpotRepo {
    /// All spots for a run. The `(observed_at, id)` ordering keeps
    /// order-dependent computations reproducible across recomputes.
    pub async fn list_for_run(pool: &PgPool, run_id: DbId) -> Result<Vec<SpotRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM observation_spots \
             WHERE run_id = $1 \
             ORDER BY observed_at ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, SpotRow>(&query)
            .bind(run_id)
            .fetch_all(pool)
            .await
    }
}
