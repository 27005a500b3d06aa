//! Timestamp formatting shared by stored records and store keys.

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T10:20:30.123Z`
pub fn iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar day (UTC) used in analytics keys, e.g. `2024-05-01`
pub fn day_key(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Serde adapter writing `DateTime<Utc>` with millisecond precision.
///
/// Use with `#[serde(with = "crate::timestamp::iso_millis_serde")]`.
pub mod iso_millis_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::iso_millis(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
