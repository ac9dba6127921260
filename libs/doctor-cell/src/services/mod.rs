pub mod availability;
pub mod calendar;
pub mod slots;

pub use availability::AvailabilityService;
pub use calendar::{next_occurrence, resolve_day};
pub use slots::{is_on_grid, slot_grid};
