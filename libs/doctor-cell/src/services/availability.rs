use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use shared_database::{AppointmentStore, ScheduleStore};
use shared_models::{Appointment, Slot};
use shared_utils::{AppState, Clock};

use crate::models::{AvailabilityError, AvailabilityResponse};
use crate::services::calendar::resolve_day;
use crate::services::slots::slot_grid;

pub struct AvailabilityService {
    schedules: Arc<dyn ScheduleStore>,
    appointments: Arc<dyn AppointmentStore>,
    clock: Arc<dyn Clock>,
}

impl AvailabilityService {
    pub fn new(state: &AppState) -> Self {
        Self {
            schedules: state.schedules.clone(),
            appointments: state.appointments.clone(),
            clock: state.clock.clone(),
        }
    }

    /// Doctor on duty and the still-free slots for the next `day`.
    ///
    /// The date is resolved from the clock on every call.
    pub async fn available_slots(&self, day: &str) -> Result<AvailabilityResponse, AvailabilityError> {
        let date = resolve_day(day, self.clock.now())?;

        let schedule = self.schedules.load().await?;
        let doctor = schedule
            .doctor_for(day)
            .ok_or_else(|| AvailabilityError::NoSchedule(day.to_string()))?
            .to_string();

        let appointments = self.appointments.list().await?;
        let available_slots = free_slots(date, &appointments);

        debug!("{} on {} ({}) has {} free slots", doctor, day, date, available_slots.len());

        Ok(AvailabilityResponse {
            doctor,
            available_slots,
            date,
        })
    }
}

/// Slot labels already taken on `date`, whoever the doctor.
pub fn booked_slots(date: NaiveDate, appointments: &[Appointment]) -> HashSet<Slot> {
    appointments
        .iter()
        .filter(|appointment| appointment.date() == date)
        .map(Appointment::slot)
        .collect()
}

/// The daily grid minus what is booked on `date`, in grid order.
pub fn free_slots(date: NaiveDate, appointments: &[Appointment]) -> Vec<Slot> {
    let booked = booked_slots(date, appointments);
    slot_grid()
        .into_iter()
        .filter(|slot| !booked.contains(slot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_utils::test_utils::appointment_on;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    }

    #[test]
    fn empty_list_leaves_the_whole_grid() {
        assert_eq!(free_slots(monday(), &[]), slot_grid());
    }

    #[test]
    fn removes_only_slots_on_the_same_date() {
        let appointments = vec![
            appointment_on("Alice", monday(), 9, 0),
            appointment_on("Bob", monday(), 15, 30),
            appointment_on("Carol", monday().succ_opt().unwrap(), 10, 0),
            appointment_on("Dan", monday() - chrono::Duration::days(7), 10, 30),
        ];

        let free = free_slots(monday(), &appointments);
        let labels: Vec<String> = free.iter().map(ToString::to_string).collect();

        assert_eq!(free.len(), 14);
        assert!(!labels.contains(&"09:00".to_string()));
        assert!(!labels.contains(&"15:30".to_string()));
        assert!(labels.contains(&"10:00".to_string()));
        assert!(labels.contains(&"10:30".to_string()));
    }

    #[test]
    fn result_is_an_ordered_subsequence_of_the_grid() {
        let appointments: Vec<Appointment> = [(9, 30), (11, 0), (14, 0), (17, 30)]
            .into_iter()
            .map(|(h, m)| appointment_on("Patient", monday(), h, m))
            .collect();

        let free = free_slots(monday(), &appointments);
        let grid = slot_grid();
        let mut cursor = grid.iter();
        assert!(free.iter().all(|slot| cursor.any(|g| g == slot)));
        assert_eq!(free.len(), grid.len() - 4);
    }

    #[test]
    fn fully_booked_day_is_empty_not_an_error() {
        let appointments: Vec<Appointment> = slot_grid()
            .into_iter()
            .map(|slot| Appointment::new("Patient", monday().and_time(slot.time())))
            .collect();

        assert!(free_slots(monday(), &appointments).is_empty());
    }
}
