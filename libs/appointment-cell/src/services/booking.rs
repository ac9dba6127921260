use std::sync::Arc;

use tracing::{debug, info, warn};

use doctor_cell::services::{calendar::next_occurrence, slots::is_on_grid};
use shared_config::BookingPolicy;
use shared_database::AppointmentStore;
use shared_models::{parse_weekday, Appointment, Slot};
use shared_utils::{AppState, Clock};

use crate::models::{BookingError, NewBooking};

pub struct BookingService {
    appointments: Arc<dyn AppointmentStore>,
    clock: Arc<dyn Clock>,
    policy: BookingPolicy,
}

impl BookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            appointments: state.appointments.clone(),
            clock: state.clock.clone(),
            policy: state.config.booking_policy,
        }
    }

    /// Turns a weekday and slot into a concrete half-hour and appends it.
    ///
    /// The doctor is logged but not checked against the schedule. Under
    /// `BookingPolicy::Permissive` the slot is not checked either. Under
    /// `BookingPolicy::Checked` the taken-slot check happens inside the
    /// store's append, so two concurrent requests for one slot cannot both
    /// succeed. A store failure means nothing was written.
    pub async fn record(&self, booking: NewBooking) -> Result<Appointment, BookingError> {
        info!(
            patient = %booking.name,
            doctor = %booking.doctor,
            day = %booking.day,
            slot = %booking.slot,
            "New booking"
        );

        let weekday = parse_weekday(&booking.day)
            .ok_or_else(|| BookingError::InvalidDay(booking.day.clone()))?;
        let slot: Slot = booking
            .slot
            .parse()
            .map_err(|_| BookingError::InvalidSlot(booking.slot.clone()))?;

        let date = next_occurrence(weekday, self.clock.now().date());

        let appointment = Appointment::new(booking.name, date.and_time(slot.time()));

        let written = match self.policy {
            BookingPolicy::Permissive => self.appointments.append(appointment.clone()).await.map(|_| true),
            BookingPolicy::Checked => {
                if !is_on_grid(&slot) {
                    return Err(BookingError::OffGrid(slot));
                }
                self.appointments.append_if_free(appointment.clone()).await
            }
        };

        match written {
            Ok(true) => {}
            Ok(false) => return Err(BookingError::SlotTaken { slot, date }),
            Err(e) => {
                warn!("Skipping booking for {} on {}: {}", appointment.patient_name, date, e);
                return Err(BookingError::NotRecorded(e));
            }
        }

        debug!("Recorded appointment {} - {}", appointment.start_time, appointment.end_time);
        Ok(appointment)
    }
}
