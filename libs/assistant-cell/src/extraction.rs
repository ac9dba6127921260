//! Best-effort pulling of a weekday and a clock time out of free text.
//!
//! Nothing here is authoritative: `None` means "ask again".

use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use shared_models::{parse_weekday, Slot, WEEKDAY_NAMES};

// "3:30", "3:30 pm", "15:30", also glued to a word as in "at10:30".
// Only the end is anchored.
static HOUR_MINUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(am|pm)?\b").expect("valid hour:minute pattern"));

// "3 pm", "11am", "book10am"
static HOUR_MERIDIEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2})\s*(am|pm)\b").expect("valid hour meridiem pattern"));

/// First weekday name (Monday first) that appears anywhere in `text`.
pub fn extract_day(text: &str) -> Option<Weekday> {
    let lowered = text.to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .find(|name| lowered.contains(&name.to_lowercase()))
        .and_then(|name| parse_weekday(name))
}

/// A clock time as a slot label.
///
/// Shapes are tried in order and the first match wins: `H:MM` with an
/// optional am/pm (24-hour when absent), then `H am|pm`.
pub fn extract_time(text: &str) -> Option<Slot> {
    if let Some(caps) = HOUR_MINUTE.captures(text) {
        let hour = number(&caps, 1)?;
        let minute = number(&caps, 2)?;
        return match caps.get(3) {
            Some(meridiem) => to_slot_12h(hour, minute, meridiem.as_str()),
            None => Slot::from_hm(hour, minute),
        };
    }

    if let Some(caps) = HOUR_MERIDIEM.captures(text) {
        let hour = number(&caps, 1)?;
        let meridiem = caps.get(2)?.as_str();
        return to_slot_12h(hour, 0, meridiem);
    }

    None
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

fn to_slot_12h(hour: u32, minute: u32, meridiem: &str) -> Option<Slot> {
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = match (meridiem.to_ascii_lowercase().as_str(), hour) {
        ("am", 12) => 0,
        ("pm", 12) => 12,
        ("pm", h) => h + 12,
        (_, h) => h,
    };

    Slot::from_hm(hour, minute)
}
