use chrono::Timelike;

use shared_models::Slot;

/// "09:30" as it should be read aloud: "9:30 AM".
pub fn spoken_time(slot: &Slot) -> String {
    let time = slot.time();
    let (hour, minute) = (time.hour(), time.minute());

    match hour {
        0 => format!("12:{:02} AM", minute),
        1..=11 => format!("{}:{:02} AM", hour, minute),
        12 => format!("12:{:02} PM", minute),
        _ => format!("{}:{:02} PM", hour - 12, minute),
    }
}

/// Reads out at most `preview` slots and counts the rest.
pub fn describe_availability(doctor: &str, day: &str, slots: &[Slot], preview: usize) -> String {
    let spoken: Vec<String> = slots.iter().take(preview).map(spoken_time).collect();

    let mut response = format!(
        "{} is available on {} at the following times: {}",
        doctor,
        day,
        spoken.join(", ")
    );
    if slots.len() > preview {
        response.push_str(&format!(" and {} more slots.", slots.len() - preview));
    }

    response
}
