pub mod document;
pub mod error;
pub mod memory;
pub mod store;

pub use document::JsonDocument;
pub use error::StoreError;
pub use memory::{InMemoryAppointmentStore, InMemoryKnowledgeStore, InMemoryScheduleStore};
pub use store::{
    AppointmentStore, FileAppointmentStore, FileKnowledgeStore, FileScheduleStore,
    KnowledgeStore, ScheduleStore,
};
