use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use shared_models::parse_weekday;

use crate::models::AvailabilityError;

/// Next date strictly after `today` that falls on `weekday`.
///
/// Asking for today's weekday rolls forward a full week.
pub fn next_occurrence(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let target = i64::from(weekday.num_days_from_monday());
    let current = i64::from(today.weekday().num_days_from_monday());

    let mut days_ahead = target - current;
    if days_ahead <= 0 {
        days_ahead += 7;
    }

    today + Duration::days(days_ahead)
}

/// Resolves a weekday name against `now`.
pub fn resolve_day(day: &str, now: NaiveDateTime) -> Result<NaiveDate, AvailabilityError> {
    let weekday = parse_weekday(day).ok_or_else(|| AvailabilityError::InvalidDay(day.to_string()))?;
    Ok(next_occurrence(weekday, now.date()))
}
