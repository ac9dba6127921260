use std::sync::Arc;

use axum::{extract::State, Json};

use shared_models::error::AppError;
use shared_utils::AppState;

use crate::models::{BookingRequest, BookingResponse};
use crate::services::booking::BookingService;

#[axum::debug_handler]
pub async fn log_booking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = request.validate()?;

    let booking_service = BookingService::new(&state);
    let appointment = booking_service.record(booking).await?;

    Ok(Json(BookingResponse {
        message: "Booking logged successfully".to_string(),
        appointment,
    }))
}
