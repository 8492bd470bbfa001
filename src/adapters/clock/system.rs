//! Wall-clock adapter.

use chrono::{FixedOffset, Local};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Reads the system clock.
///
/// Without a configured offset, file-name stamps follow the host's local
/// zone, including any daylight-saving shift at the moment of export.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Uses the host's local zone.
    pub fn local() -> Self {
        Self { offset: None }
    }

    /// Pins the wall-clock zone regardless of the host setting.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn utc_offset(&self) -> FixedOffset {
        self.offset.unwrap_or_else(|| *Local::now().offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_offset_wins_over_host_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(SystemClock::with_offset(tokyo).utc_offset(), tokyo);
    }

    #[test]
    fn local_clock_reports_host_offset() {
        assert_eq!(SystemClock::local().utc_offset(), *Local::now().offset());
    }
}
