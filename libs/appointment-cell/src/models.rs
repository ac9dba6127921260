use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{AppError, Appointment, Slot};

/// Body of `POST /log_booking`. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: Option<String>,
    pub doctor: Option<String>,
    pub day: Option<String>,
    pub slot: Option<String>,
}

/// A booking request with all fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub name: String,
    pub doctor: String,
    pub day: String,
    pub slot: String,
}

impl BookingRequest {
    pub fn new(name: &str, doctor: &str, day: &str, slot: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            doctor: Some(doctor.to_string()),
            day: Some(day.to_string()),
            slot: Some(slot.to_string()),
        }
    }

    pub fn validate(self) -> Result<NewBooking, BookingError> {
        fn present(field: Option<String>) -> Option<String> {
            field.filter(|value| !value.trim().is_empty())
        }

        match (present(self.name), present(self.doctor), present(self.day), present(self.slot)) {
            (Some(name), Some(doctor), Some(day), Some(slot)) => Ok(NewBooking { name, doctor, day, slot }),
            _ => Err(BookingError::MissingFields),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub message: String,
    pub appointment: Appointment,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid day name")]
    InvalidDay(String),

    #[error("Invalid slot '{0}', expected HH:MM")]
    InvalidSlot(String),

    #[error("{0} is not a bookable slot")]
    OffGrid(Slot),

    #[error("{slot} on {date} is already booked")]
    SlotTaken { slot: Slot, date: NaiveDate },

    #[error("Booking could not be recorded: {0}")]
    NotRecorded(#[from] StoreError),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::MissingFields
            | BookingError::InvalidDay(_)
            | BookingError::InvalidSlot(_) => AppError::BadRequest(err.to_string()),
            BookingError::OffGrid(_) => AppError::ValidationError(err.to_string()),
            BookingError::SlotTaken { .. } => AppError::Conflict(err.to_string()),
            BookingError::NotRecorded(_) => AppError::Storage(err.to_string()),
        }
    }
}
