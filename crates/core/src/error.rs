use crate::types::DbId;

/// Domain error taxonomy.
///
/// Summarization surfaces only `NotFound` to callers; per-field and
/// per-metric problems are recovered locally by skipping the offending
/// value. Store failures arrive as `Internal`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
