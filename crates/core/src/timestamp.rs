//! Timestamp serialization for stored documents.
//!
//! Timestamps are written as RFC 3339 in UTC with exactly three fractional
//! digits (`2024-03-05T10:00:00.000Z`). Fixed width makes lexicographic order
//! of the stored strings equal to chronological order, which ordered
//! collection reads rely on. Any RFC 3339 timestamp is accepted on read.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a timestamp in the stored fixed-width form.
#[must_use]
pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serialize a required timestamp.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(timestamp))
}

/// Deserialize a required timestamp.
///
/// # Errors
///
/// Fails if the value is not an RFC 3339 string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer)
}

/// Optional timestamps; unparseable values read as `None`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    /// Serialize an optional timestamp.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(timestamp: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match timestamp {
            Some(ts) => serializer.serialize_some(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp.
    ///
    /// # Errors
    ///
    /// Only fails if the input is not valid JSON.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(with = "super")]
        at: DateTime<Utc>,
        #[serde(default, with = "super::option")]
        seen: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_fixed_width_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(format(&ts), "2024-03-05T10:00:00.000Z");
    }

    #[test]
    fn test_lexicographic_order_matches_chronological() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let later = earlier + chrono::Duration::milliseconds(123);
        assert!(format(&earlier) < format(&later));
    }

    #[test]
    fn test_option_tolerates_garbage() {
        let parsed: Stamped = serde_json::from_value(serde_json::json!({
            "at": "2024-03-05T10:00:00Z",
            "seen": 12
        }))
        .unwrap();
        assert_eq!(parsed.seen, None);

        let missing: Stamped =
            serde_json::from_value(serde_json::json!({ "at": "2024-03-05T10:00:00Z" })).unwrap();
        assert_eq!(missing.seen, None);
    }
}
