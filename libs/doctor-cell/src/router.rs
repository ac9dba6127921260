use std::sync::Arc;

use axum::{routing::get, Router};

use shared_utils::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get_slots", get(handlers::get_slots))
        .with_state(state)
}
