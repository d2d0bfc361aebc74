//! Handlers for the `/observation` resources.
//!
//! Exposes run summarization: recompute on demand and fetch the
//! stored result. Run and spot creation live with the mobile sync
//! endpoints, not here.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use vinea_core::error::CoreError;
use vinea_core::observation::service::summarize_run;
use vinea_core::types::DbId;
use vinea_db::repositories::ObservationRunRepo;
use vinea_db::store::PgObservationStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/observation/runs/{id}", get(get_run))
        .route("/observation/runs/{id}/summarize", post(summarize))
}

/// GET /api/v1/observation/runs/{id}
///
/// Fetch a run, including its stored summary if one was computed.
async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let run = ObservationRunRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ObservationRun",
            id,
        }))?;
    Ok(Json(serde_json::json!({ "data": run })))
}

/// POST /api/v1/observation/runs/{id}/summarize
///
/// Recompute the run's summary from its recorded spots and persist
/// it, setting the run's end time if unset. Returns 404 when the run
/// or its template does not exist.
async fn summarize(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let store = PgObservationStore::new(state.pool.clone());
    let summary = summarize_run(&store, id).await?;
    Ok(Json(serde_json::json!({ "data": summary })))
}
