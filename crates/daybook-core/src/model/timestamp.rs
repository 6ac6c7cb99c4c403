//! Millisecond-precision UTC timestamps
//!
//! Snapshots store timestamps as RFC 3339 strings with exactly three
//! fractional digits and a `Z` suffix (`2024-01-01T09:30:00.000Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

pub type Timestamp = DateTime<Utc>;

/// Render a timestamp in snapshot form
pub fn format(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse any RFC 3339 timestamp into UTC
pub fn parse(raw: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uses_millis_and_z() {
        let ts = parse("2024-01-01T09:30:00+00:00").unwrap();
        assert_eq!(format(&ts), "2024-01-01T09:30:00.000Z");
    }

    #[test]
    fn test_offsets_normalize_to_utc() {
        let ts = parse("2024-01-01T09:30:00.250+09:00").unwrap();
        assert_eq!(format(&ts), "2024-01-01T00:30:00.250Z");
    }
}
