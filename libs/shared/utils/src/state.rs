use std::sync::Arc;

use tracing::info;

use shared_config::AppConfig;
use shared_database::{
    AppointmentStore, FileAppointmentStore, FileKnowledgeStore, FileScheduleStore,
    KnowledgeStore, ScheduleStore,
};

use crate::clock::{Clock, SystemClock};

/// Everything a request handler needs, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub schedules: Arc<dyn ScheduleStore>,
    pub appointments: Arc<dyn AppointmentStore>,
    pub knowledge: Arc<dyn KnowledgeStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// File-backed stores rooted at the configured data directory.
    pub fn from_config(config: AppConfig) -> Self {
        info!("Using schedules at {}", config.schedules_path().display());
        info!("Using appointments at {}", config.appointments_path().display());
        info!("Using knowledge base at {}", config.knowledge_path().display());

        Self {
            schedules: Arc::new(FileScheduleStore::new(config.schedules_path())),
            appointments: Arc::new(FileAppointmentStore::new(config.appointments_path())),
            knowledge: Arc::new(FileKnowledgeStore::new(config.knowledge_path())),
            clock: Arc::new(SystemClock),
            config,
        }
    }
}
