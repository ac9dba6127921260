use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use knowledge_cell::router::knowledge_routes;
use shared_utils::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, welcome to the clinic assistant API!" }))
        .merge(doctor_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(knowledge_routes(state))
}
