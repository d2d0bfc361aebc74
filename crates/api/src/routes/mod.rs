pub mod health;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(handlers::observation::router())
}
