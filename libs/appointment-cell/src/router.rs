use std::sync::Arc;

use axum::{routing::post, Router};

use shared_utils::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/log_booking", post(handlers::log_booking))
        .with_state(state)
}
