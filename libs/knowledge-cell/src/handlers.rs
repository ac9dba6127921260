use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::debug;

use shared_models::error::AppError;
use shared_utils::AppState;

/// Returns the knowledge document as stored, `{}` when there is none.
#[axum::debug_handler]
pub async fn get_knowledge(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let knowledge = state
        .knowledge
        .load()
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    match &knowledge {
        Value::Object(entries) => debug!("Serving knowledge base with {} top-level entries", entries.len()),
        _ => debug!("Serving non-object knowledge document as stored"),
    }
    Ok(Json(knowledge))
}
