use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use shared_models::{Appointment, Schedule};

use crate::error::StoreError;
use crate::store::{AppointmentStore, KnowledgeStore, ScheduleStore};

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self { appointments: RwLock::new(appointments) }
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.appointments.read().await.clone())
    }

    async fn append(&self, appointment: Appointment) -> Result<(), StoreError> {
        self.appointments.write().await.push(appointment);
        Ok(())
    }

    async fn append_if_free(&self, appointment: Appointment) -> Result<bool, StoreError> {
        let mut appointments = self.appointments.write().await;
        if appointments.iter().any(|existing| existing.occupies_same_slot(&appointment)) {
            return Ok(false);
        }
        appointments.push(appointment);
        Ok(true)
    }
}

#[derive(Default)]
pub struct InMemoryScheduleStore {
    schedule: Schedule,
}

impl InMemoryScheduleStore {
    pub fn new(schedule: Schedule) -> Self {
        Self { schedule }
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn load(&self) -> Result<Schedule, StoreError> {
        Ok(self.schedule.clone())
    }
}

pub struct InMemoryKnowledgeStore {
    knowledge: Value,
}

impl InMemoryKnowledgeStore {
    pub fn new(knowledge: Value) -> Self {
        Self { knowledge }
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn load(&self) -> Result<Value, StoreError> {
        Ok(self.knowledge.clone())
    }
}
