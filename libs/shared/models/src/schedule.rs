use std::collections::HashMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun,
];

/// Exact, case-sensitive match against the canonical English names.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .map(|index| WEEKDAYS[index])
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Either `"Dr. Smith"` or `{"doctor": "Dr. Smith", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleEntry {
    Doctor(String),
    Detailed {
        doctor: String,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
}

impl ScheduleEntry {
    pub fn doctor(&self) -> &str {
        match self {
            ScheduleEntry::Doctor(name) => name,
            ScheduleEntry::Detailed { doctor, .. } => doctor,
        }
    }
}

/// Weekday name to the doctor on duty that day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: HashMap<String, ScheduleEntry>,
}

impl Schedule {
    pub fn doctor_for(&self, day: &str) -> Option<&str> {
        self.entries.get(day).map(ScheduleEntry::doctor)
    }

    pub fn assign(&mut self, day: impl Into<String>, doctor: impl Into<String>) {
        self.entries.insert(day.into(), ScheduleEntry::Doctor(doctor.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut schedule = Schedule::default();
        for (day, doctor) in iter {
            schedule.assign(day, doctor);
        }
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weekday_names_round_trip_through_chrono() {
        for name in WEEKDAY_NAMES {
            let weekday = parse_weekday(name).unwrap();
            assert_eq!(weekday_name(weekday), name);
        }
        assert_eq!(parse_weekday("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("Sunday"), Some(Weekday::Sun));
    }

    #[test]
    fn rejects_unknown_and_differently_cased_names() {
        assert_eq!(parse_weekday("Funday"), None);
        assert_eq!(parse_weekday("monday"), None);
        assert_eq!(parse_weekday(""), None);
    }

    #[test]
    fn accepts_both_document_shapes() {
        let schedule: Schedule = serde_json::from_value(json!({
            "Monday": "Dr. Smith",
            "Tuesday": {"doctor": "Dr. Jones", "specialization": "Dentist"}
        }))
        .unwrap();

        assert_eq!(schedule.doctor_for("Monday"), Some("Dr. Smith"));
        assert_eq!(schedule.doctor_for("Tuesday"), Some("Dr. Jones"));
        assert_eq!(schedule.doctor_for("Wednesday"), None);
    }
}
