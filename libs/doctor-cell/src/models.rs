use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{AppError, Slot};

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub doctor: String,
    pub available_slots: Vec<Slot>,
    pub date: NaiveDate,
}

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Invalid day name")]
    InvalidDay(String),

    #[error("No schedule found for {0}")]
    NoSchedule(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::InvalidDay(_) => AppError::BadRequest(err.to_string()),
            AvailabilityError::NoSchedule(_) => AppError::NotFound(err.to_string()),
            AvailabilityError::Store(e) => AppError::Storage(e.to_string()),
        }
    }
}
