//! Document-store timestamp encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A timestamp as the document store encodes it: whole seconds since the
/// Unix epoch plus a nanosecond remainder.
///
/// Reads accept both the plain field names and the admin SDK's
/// underscore-prefixed spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireTimestamp {
    /// Seconds since the Unix epoch.
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    /// Sub-second remainder in nanoseconds.
    #[serde(alias = "_nanoseconds", default)]
    pub nanoseconds: u32,
}

impl WireTimestamp {
    /// Creates a timestamp from its raw parts.
    #[must_use]
    pub const fn new(seconds: i64, nanoseconds: u32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Encodes an instant.
    #[must_use]
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            seconds: instant.timestamp(),
            nanoseconds: instant.timestamp_subsec_nanos(),
        }
    }

    /// Decodes the instant, or `None` when the parts are out of range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }
}

impl From<DateTime<Utc>> for WireTimestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_datetime(instant)
    }
}

/// Reads an optional timestamp field, treating any value that is not a
/// well-formed timestamp as absent.
///
/// Covers strings, numbers, objects missing `seconds`, and objects that
/// carry both the plain and the underscore-prefixed spelling. A bad
/// timestamp never fails decoding of the record around it.
///
/// # Errors
///
/// Returns the deserializer's error only when the field's value cannot be
/// read at all.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<WireTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| WireTimestamp::deserialize(value).ok()))
}
