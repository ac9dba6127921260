pub mod appointment;
pub mod error;
pub mod schedule;
pub mod slot;

pub use appointment::{Appointment, APPOINTMENT_DURATION_MINUTES};
pub use error::AppError;
pub use schedule::{parse_weekday, weekday_name, Schedule, ScheduleEntry, WEEKDAY_NAMES};
pub use slot::Slot;
