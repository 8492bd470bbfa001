//! Manually advanced clock for tests and replays.

use std::sync::RwLock;

use chrono::{FixedOffset, Offset, Utc};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// A clock that only moves when told to.
///
/// # Example
///
/// ```ignore
/// let clock = ManualClock::at(Timestamp::from_unix_secs(1_700_000_000));
/// clock.advance_secs(650);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<Timestamp>,
    offset: FixedOffset,
}

impl ManualClock {
    /// Creates a clock frozen at `start`, on UTC wall time.
    pub fn at(start: Timestamp) -> Self {
        Self {
            current: RwLock::new(start),
            offset: Utc.fix(),
        }
    }

    /// Reports `offset` as the wall-clock zone.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
        *current = current.plus_secs(secs);
    }

    /// Moves the clock forward by milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
        *current = current.plus_millis(millis);
    }

    /// Jumps to an absolute instant.
    pub fn set(&self, at: Timestamp) {
        let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
        *current = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read().unwrap_or_else(|p| p.into_inner())
    }

    fn utc_offset(&self) -> FixedOffset {
        self.offset
    }
}
