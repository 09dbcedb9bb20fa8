use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::CoreError;

/// Returns the current wall-clock time as milliseconds since Unix epoch.
pub fn physical_now() -> Result<u64, CoreError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .map_err(|_| CoreError::InvalidData("system clock before epoch".into()))
}

/// RFC 3339 rendering of a millisecond timestamp, e.g. `2024-05-01T12:00:00.000Z`.
pub fn rfc3339(ms: u64) -> Result<String, CoreError> {
    datetime(ms).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Calendar date (UTC) of a millisecond timestamp.
pub fn calendar_date(ms: u64) -> Result<NaiveDate, CoreError> {
    datetime(ms).map(|dt| dt.date_naive())
}

fn datetime(ms: u64) -> Result<DateTime<Utc>, CoreError> {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| CoreError::InvalidData(format!("timestamp out of range: {ms}")))
}

/// Hands out strictly increasing millisecond timestamps.
///
/// Follows wall time while it moves forward; if two ticks land in the same
/// millisecond (or the wall clock steps back) the previous value is bumped by one.
pub struct MonotonicClock {
    last_ms: u64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { last_ms: 0 }
    }

    /// Generate the next timestamp.
    pub fn tick(&mut self) -> Result<u64, CoreError> {
        let now = physical_now()?;
        let next = if now > self.last_ms {
            now
        } else {
            self.last_ms
                .checked_add(1)
                .ok_or_else(|| CoreError::InvalidData(format!("clock exhausted at {}", self.last_ms)))?
        };
        self.last_ms = next;
        Ok(next)
    }

    /// Never step backwards past a value observed elsewhere. Values that do
    /// not render as a timestamp are ignored.
    pub fn observe(&mut self, ms: u64) {
        if ms > self.last_ms && datetime(ms).is_ok() {
            self.last_ms = ms;
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
