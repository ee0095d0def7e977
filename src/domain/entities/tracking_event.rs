//! Tracking event entity: one entry in a package's movement history.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single movement of a package.
///
/// Events are ordered by `(date, time)`; `id` breaks ties between events
/// recorded at the same instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(with = "wall_clock")]
    pub time: NaiveTime,
    pub status: String,
    pub location_id: i64,
    /// Title of the referenced location, joined in for display.
    #[serde(default)]
    pub location_title: Option<String>,
}

impl TrackingEvent {
    /// Creates a new TrackingEvent instance.
    pub fn new(
        id: i64,
        date: NaiveDate,
        time: NaiveTime,
        status: String,
        location_id: i64,
        location_title: Option<String>,
    ) -> Self {
        Self {
            id,
            date,
            time,
            status,
            location_id,
            location_title,
        }
    }

    /// Chronological sort key. Later events compare greater.
    pub fn chronology(&self) -> (NaiveDate, NaiveTime, i64) {
        (self.date, self.time, self.id)
    }
}

/// Serde adapter for wall-clock times.
///
/// Writes `HH:MM:SS`, accepts `HH:MM:SS` or `HH:MM` on input.
mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M"))
            .map_err(serde::de::Error::custom)
    }
}
