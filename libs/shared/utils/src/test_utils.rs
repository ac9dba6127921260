use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Map, Value};

use shared_config::{AppConfig, BookingPolicy};
use shared_database::{
    AppointmentStore, InMemoryAppointmentStore, InMemoryKnowledgeStore, InMemoryScheduleStore,
};
use shared_models::{Appointment, Schedule};

use crate::clock::FixedClock;
use crate::state::AppState;

/// Wednesday 4 June 2025, 10:15 local time.
pub fn reference_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 4)
        .and_then(|d| d.and_hms_opt(10, 15, 0))
        .unwrap_or_default()
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub fn appointment_on(name: &str, date: NaiveDate, hour: u32, minute: u32) -> Appointment {
    Appointment::new(name, at(date, hour, minute))
}

pub fn week_schedule() -> Schedule {
    [
        ("Monday", "Dr. Smith"),
        ("Tuesday", "Dr. Jones"),
        ("Wednesday", "Dr. Smith"),
        ("Thursday", "Dr. Patel"),
        ("Friday", "Dr. Jones"),
        ("Saturday", "Dr. Patel"),
    ]
    .into_iter()
    .collect()
}

pub fn sample_knowledge() -> Map<String, Value> {
    let value = json!({
        "clinic_hours": "Monday to Saturday, 9 AM to 6 PM",
        "doctors": {
            "Dr. Smith": {"specialization": "General Dentist"},
            "Dr. Jones": {"specialization": "Orthodontist"}
        },
        "faq": {
            "walk_in": "Walk-ins are welcome, but appointments get priority.",
            "services": ["Cleaning", "Fillings", "Braces"]
        }
    });

    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Builder for an in-memory `AppState` with a fixed clock.
pub struct TestState {
    pub config: AppConfig,
    pub schedule: Schedule,
    pub appointments: Vec<Appointment>,
    pub knowledge: Map<String, Value>,
    pub now: NaiveDateTime,
}

impl Default for TestState {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            schedule: week_schedule(),
            appointments: Vec::new(),
            knowledge: sample_knowledge(),
            now: reference_now(),
        }
    }
}

impl TestState {
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }

    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.config.booking_policy = policy;
        self
    }

    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_clock().0
    }

    /// Also hands back the clock so a test can move time forward.
    pub fn build_with_clock(mut self) -> (AppState, Arc<FixedClock>) {
        let appointments = std::mem::take(&mut self.appointments);
        self.build_with_store(Arc::new(InMemoryAppointmentStore::with_appointments(appointments)))
    }

    pub fn build_with_store(self, appointments: Arc<dyn AppointmentStore>) -> (AppState, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(self.now));
        let state = AppState {
            config: self.config,
            schedules: Arc::new(InMemoryScheduleStore::new(self.schedule)),
            appointments,
            knowledge: Arc::new(InMemoryKnowledgeStore::new(Value::Object(self.knowledge))),
            clock: clock.clone(),
        };
        (state, clock)
    }

    pub fn to_arc(self) -> Arc<AppState> {
        Arc::new(self.build())
    }
}
