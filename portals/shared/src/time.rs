//! Clock-time and calendar-date parsing and formatting.
//!
//! Persisted documents use `YYYY-MM-DD` dates and `HH:MM` clock times,
//! matching the wire layout the portals inherited. Display formatting
//! produces `Sep 1, 2025` and `9:00 AM`.

use chrono::{Datelike, Months, NaiveDate, NaiveTime, Timelike};

/// Parse an `HH:MM` clock string.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Format a time as `HH:MM`.
pub fn clock_string(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Format a time in 12-hour display form, e.g. `9:00 AM`.
pub fn format_time_12h(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, time.minute(), meridiem)
}

/// Format a date in long display form, e.g. `Sep 1, 2025`.
pub fn format_date_long(date: NaiveDate) -> String {
    format!("{} {}, {}", date.format("%b"), date.day(), date.format("%Y"))
}

/// One calendar month before `date`, clamping the day when the earlier
/// month is shorter.
pub fn one_month_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Serde adapter for `HH:MM` clock fields.
pub mod clock {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::clock_string(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid clock time: {raw}")))
    }
}

/// Serde adapter for optional date fields persisted as an empty string
/// when absent.
pub mod date_or_empty {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid date: {raw}")))
    }
}
