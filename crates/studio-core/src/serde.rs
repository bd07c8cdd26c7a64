use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDateTime {
    Millis(i64),
    Text(String),
}

/// Parses the date-time shapes clients send for a session date.
///
/// Accepts a local date-time (`2025-01-20T08:00:00`), RFC 3339 with an offset
/// (normalized to UTC), a bare date (midnight) or epoch milliseconds.
pub fn parse_flexible_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

pub fn deserialize_flexible_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDateTime::deserialize(deserializer)? {
        RawDateTime::Millis(ms) => DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| serde::de::Error::custom("timestamp out of range")),
        RawDateTime::Text(s) => parse_flexible_datetime(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s))),
    }
}
