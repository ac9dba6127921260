use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::slot::Slot;

pub const APPOINTMENT_DURATION_MINUTES: i64 = 30;

/// A persisted booking. Field names match the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "name")]
    pub patient_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl Appointment {
    pub fn new(patient_name: impl Into<String>, start_time: NaiveDateTime) -> Self {
        Self {
            patient_name: patient_name.into(),
            start_time,
            end_time: start_time + Duration::minutes(APPOINTMENT_DURATION_MINUTES),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn slot(&self) -> Slot {
        Slot::from_time(self.start_time.time())
    }

    /// Same calendar date and same slot label.
    pub fn occupies_same_slot(&self, other: &Appointment) -> bool {
        self.date() == other.date() && self.slot() == other.slot()
    }
}
