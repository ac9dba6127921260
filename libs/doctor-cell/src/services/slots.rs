use shared_models::Slot;

pub const OPENING_HOUR: u32 = 9;
pub const CLOSING_HOUR: u32 = 18;
pub const LUNCH_HOUR: u32 = 13;
pub const SLOT_MINUTES: [u32; 2] = [0, 30];

/// Every half-hour start from opening to closing, skipping the lunch hour.
pub fn slot_grid() -> Vec<Slot> {
    (OPENING_HOUR..CLOSING_HOUR)
        .filter(|hour| *hour != LUNCH_HOUR)
        .flat_map(|hour| SLOT_MINUTES.iter().filter_map(move |minute| Slot::from_hm(hour, *minute)))
        .collect()
}

pub fn is_on_grid(slot: &Slot) -> bool {
    slot_grid().contains(slot)
}
