//! Logical insertion time.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A totally ordered logical timestamp.
///
/// `millis` is wall-clock milliseconds at issue time; `sequence` breaks ties
/// between timestamps issued within the same millisecond (or after the wall
/// clock stepped backwards).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    pub millis: i64,
    #[serde(default)]
    pub sequence: u64,
}

impl Timestamp {
    pub fn new(millis: i64, sequence: u64) -> Self {
        Self { millis, sequence }
    }

    /// Wall-clock now, sequence zero.
    pub fn now() -> Self {
        Self::new(Utc::now().timestamp_millis(), 0)
    }

    /// The smallest timestamp strictly after `self`: the next sequence in the
    /// same millisecond, or the start of the next millisecond once the
    /// sequence is exhausted.
    pub fn next(&self) -> Self {
        match self.sequence.checked_add(1) {
            Some(sequence) => Self::new(self.millis, sequence),
            None => Self::new(self.millis.saturating_add(1), 0),
        }
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.millis).single()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "{}#{}", self.millis, self.sequence),
        }
    }
}
