//! Clock Port - wall-clock time on demand.

use chrono::FixedOffset;

use crate::domain::foundation::Timestamp;

/// Source of the current time.
///
/// Every timer sample and transition reads time through this port so tests
/// can drive the session with a manual clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Offset of the lab's wall clock from UTC. Export file names are
    /// stamped in this zone.
    fn utc_offset(&self) -> FixedOffset;
}
