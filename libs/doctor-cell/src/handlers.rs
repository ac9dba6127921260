use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use shared_models::error::AppError;
use shared_utils::AppState;

use crate::models::{AvailabilityResponse, SlotsQuery};
use crate::services::availability::AvailabilityService;

#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let day = query
        .day
        .filter(|day| !day.is_empty())
        .ok_or_else(|| AppError::BadRequest("Day parameter is required".to_string()))?;

    let availability_service = AvailabilityService::new(&state);
    let availability = availability_service.available_slots(&day).await?;

    Ok(Json(availability))
}
