use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Start of a bookable half-hour, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(NaiveTime);

impl Slot {
    pub const FORMAT: &'static str = "%H:%M";

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Slot)
    }

    /// Truncates seconds so a stored timestamp maps back onto its slot label.
    pub fn from_time(time: NaiveTime) -> Self {
        Slot(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for Slot {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), Self::FORMAT).map(Slot)
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_renders_zero_padded() {
        let slot: Slot = "9:30".parse().unwrap();
        assert_eq!(slot.to_string(), "09:30");
        assert_eq!(Slot::from_hm(14, 0).unwrap().to_string(), "14:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!("noon".parse::<Slot>().is_err());
        assert!("25:00".parse::<Slot>().is_err());
    }

    #[test]
    fn serializes_as_string() {
        let slot = Slot::from_hm(16, 30).unwrap();
        assert_eq!(serde_json::to_value(slot).unwrap(), serde_json::json!("16:30"));
        let back: Slot = serde_json::from_str("\"16:30\"").unwrap();
        assert_eq!(back, slot);
    }
}
