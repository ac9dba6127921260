use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use shared_models::{Appointment, Schedule};

use crate::document::JsonDocument;
use crate::error::StoreError;

/// Persisted appointment list.
///
/// Implementations treat a missing backing document as an empty list.
/// `append` does not look at what is already booked.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Appointment>, StoreError>;

    async fn append(&self, appointment: Appointment) -> Result<(), StoreError>;

    /// Appends only if no stored appointment occupies the same date and
    /// slot. The check and the write are one step with respect to every
    /// other `append`/`append_if_free` on this store. Returns `false` when
    /// the slot was taken and nothing was written.
    async fn append_if_free(&self, appointment: Appointment) -> Result<bool, StoreError>;
}

/// Read-only weekday to doctor mapping. Missing reads as an empty schedule.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn load(&self) -> Result<Schedule, StoreError>;
}

/// Static clinic information, any JSON document. Missing reads as an empty
/// object.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    async fn load(&self) -> Result<Value, StoreError>;
}

pub struct FileAppointmentStore {
    document: JsonDocument,
    // Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileAppointmentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl AppointmentStore for FileAppointmentStore {
    async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        self.document.read().await
    }

    async fn append(&self, appointment: Appointment) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut appointments: Vec<Appointment> = self.document.read().await?;
        appointments.push(appointment);
        self.document.write(&appointments).await?;

        info!("Appointment list rewritten with {} records at {}",
              appointments.len(), self.document.path().display());
        Ok(())
    }

    async fn append_if_free(&self, appointment: Appointment) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut appointments: Vec<Appointment> = self.document.read().await?;
        if appointments.iter().any(|existing| existing.occupies_same_slot(&appointment)) {
            debug!("{} on {} already taken", appointment.slot(), appointment.date());
            return Ok(false);
        }

        appointments.push(appointment);
        self.document.write(&appointments).await?;

        info!("Appointment list rewritten with {} records at {}",
              appointments.len(), self.document.path().display());
        Ok(true)
    }
}

pub struct FileScheduleStore {
    document: JsonDocument,
}

impl FileScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { document: JsonDocument::new(path) }
    }
}

#[async_trait]
impl ScheduleStore for FileScheduleStore {
    async fn load(&self) -> Result<Schedule, StoreError> {
        self.document.read().await
    }
}

pub struct FileKnowledgeStore {
    document: JsonDocument,
}

impl FileKnowledgeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { document: JsonDocument::new(path) }
    }
}

#[async_trait]
impl KnowledgeStore for FileKnowledgeStore {
    async fn load(&self) -> Result<Value, StoreError> {
        match self.document.read().await? {
            Value::Null => Ok(json!({})),
            knowledge => Ok(knowledge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::tempdir;

    fn appointment(name: &str, day: u32, hour: u32, minute: u32) -> Appointment {
        let start = NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        Appointment::new(name, start)
    }

    #[tokio::test]
    async fn append_creates_the_document_when_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("appointments.json");
        let store = FileAppointmentStore::new(&path);

        assert!(store.list().await.unwrap().is_empty());

        store.append(appointment("Alice", 2, 9, 30)).await.unwrap();
        store.append(appointment("Bob", 2, 10, 0)).await.unwrap();

        let stored = store.list().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].patient_name, "Alice");
        assert_eq!(stored[1].patient_name, "Bob");

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["start_time"], "2025-06-02T09:30:00");
        assert_eq!(raw[0]["end_time"], "2025-06-02T10:00:00");
    }

    #[tokio::test]
    async fn append_refuses_to_overwrite_a_malformed_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("appointments.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileAppointmentStore::new(&path);

        let result = store.append(appointment("Alice", 2, 9, 30)).await;

        assert_matches!(result, Err(StoreError::Malformed { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let dir = tempdir().unwrap();
        let store = Arc::new(FileAppointmentStore::new(dir.path().join("appointments.json")));

        let mut handles = Vec::new();
        for minute in [0, 30] {
            for hour in 9..13 {
                let store = store.clone();
                handles.push(tokio::spawn(async move {
                    store.append(appointment("Patient", 2, hour, minute)).await
                }));
            }
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.list().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn concurrent_checked_appends_keep_one_per_slot() {
        let dir = tempdir().unwrap();
        let store = Arc::new(FileAppointmentStore::new(dir.path().join("appointments.json")));

        let mut handles = Vec::new();
        for name in ["Alice", "Bob", "Carol", "Dan"] {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append_if_free(appointment(name, 9, 9, 30)).await
            }));
        }

        let mut written = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                written += 1;
            }
        }

        assert_eq!(written, 1);
        assert_eq!(store.list().await.unwrap().len(), 1);

        // A different date for the same label is still free.
        assert!(store.append_if_free(appointment("Eve", 16, 9, 30)).await.unwrap());
    }

    #[tokio::test]
    async fn schedule_and_knowledge_read_from_disk() {
        let dir = tempdir().unwrap();
        let schedules = dir.path().join("schedules.json");
        let knowledge = dir.path().join("knowledge_base.json");
        std::fs::write(&schedules, json!({"Monday": {"doctor": "Dr. Smith"}}).to_string()).unwrap();
        std::fs::write(&knowledge, json!({"clinic_hours": "9 AM - 6 PM"}).to_string()).unwrap();

        let schedule = FileScheduleStore::new(&schedules).load().await.unwrap();
        assert_eq!(schedule.doctor_for("Monday"), Some("Dr. Smith"));

        let info = FileKnowledgeStore::new(&knowledge).load().await.unwrap();
        assert_eq!(info["clinic_hours"], "9 AM - 6 PM");
    }

    #[tokio::test]
    async fn missing_schedule_and_knowledge_are_empty() {
        let dir = tempdir().unwrap();

        let schedule = FileScheduleStore::new(dir.path().join("none.json")).load().await.unwrap();
        assert!(schedule.is_empty());

        let info = FileKnowledgeStore::new(dir.path().join("none.json")).load().await.unwrap();
        assert_eq!(info, json!({}));
    }

    #[tokio::test]
    async fn knowledge_need_not_be_an_object() {
        let dir = tempdir().unwrap();
        let knowledge = dir.path().join("knowledge_base.json");
        std::fs::write(&knowledge, r#"["Open on Saturdays", "Walk-ins welcome"]"#).unwrap();

        let info = FileKnowledgeStore::new(&knowledge).load().await.unwrap();
        assert_eq!(info, json!(["Open on Saturdays", "Walk-ins welcome"]));
    }
}
