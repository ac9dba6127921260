use std::sync::Arc;

use axum::{routing::get, Router};

use shared_utils::AppState;

use crate::handlers;

pub fn knowledge_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/knowledge", get(handlers::get_knowledge))
        .with_state(state)
}
