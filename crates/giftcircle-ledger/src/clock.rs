//! Logical clock for contribution timestamps.

use chrono::Utc;
use giftcircle_types::Timestamp;

/// Issues timestamps strictly greater than every timestamp it has issued or
/// observed, even when the wall clock stalls or steps backwards.
#[derive(Debug, Clone, Default)]
pub struct LogicalClock {
    last: Option<Timestamp>,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> Timestamp {
        self.tick_at(Utc::now().timestamp_millis())
    }

    /// Tick against an explicit wall-clock reading.
    pub fn tick_at(&mut self, wall_millis: i64) -> Timestamp {
        let next = match self.last {
            Some(last) if wall_millis <= last.millis => last.next(),
            _ => Timestamp::new(wall_millis, 0),
        };
        self.last = Some(next);
        next
    }

    /// Account for a timestamp issued elsewhere (e.g. on a reloaded item).
    pub fn observe(&mut self, ts: Timestamp) {
        if self.last.map_or(true, |last| ts > last) {
            self.last = Some(ts);
        }
    }

    pub fn last(&self) -> Option<Timestamp> {
        self.last
    }
}
