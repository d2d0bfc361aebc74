//! Repository for the `blocks` table.

use sqlx::PgPool;
use vinea_core::types::DbId;

use crate::models::block::BlockRow;

const COLUMNS: &str = "id, name, area_ha, row_spacing_m, vine_spacing_m";

/// Read access to vineyard blocks.
pub struct BlockRepo;

impl BlockRepo {
    /// Find a block by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlockRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blocks WHERE id = $1");
        sqlx::query_as::<_, BlockRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
