//! Serde helpers for the API's datetimes.
//!
//! The server emits naive ISO-8601 (`2024-05-01T19:00:00`) for most columns, but
//! offset-carrying values (`…Z`, `…+02:00`) also appear. Both are accepted and
//! normalised to a naive UTC [`NaiveDateTime`]. Values are always written back
//! in the naive form with second precision.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse an ISO-8601 datetime, with or without offset, with or without seconds.
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Format for the wire.
pub fn format(dt: &NaiveDateTime) -> String {
    dt.format(WIRE_FORMAT).to_string()
}

pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid datetime {raw:?}")))
}

/// Same as the parent module for `Option<NaiveDateTime>`.
pub mod option {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_str(&super::format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(raw) => super::parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime {raw:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_accepts_server_forms() {
        assert_eq!(parse("2024-05-01T19:30:00"), Some(at(19, 30)));
        assert_eq!(parse("2024-05-01T19:30:00.123456").map(|d| d.format("%H:%M").to_string()), Some("19:30".into()));
        assert_eq!(parse("2024-05-01T19:30"), Some(at(19, 30)));
        assert_eq!(parse("2024-05-01T19:30:00Z"), Some(at(19, 30)));
        assert_eq!(parse("2024-05-01T21:30:00+02:00"), Some(at(19, 30)));
        assert_eq!(parse("not a date"), None);
    }

    #[test]
    fn test_format_is_naive_seconds() {
        assert_eq!(format(&at(7, 5)), "2024-05-01T07:05:00");
    }
}
