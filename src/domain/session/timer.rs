//! Timer unit: elapsed-time tracking for timed and untimed phases.
//!
//! Neither type owns a thread. Elapsed time is recomputed only when a clock
//! sample is delivered through `tick`, so the values are always a function of
//! the last observed time.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::Phase;

/// Elapsed-seconds tracker with start-once semantics.
///
/// # Invariants
///
/// - `started_at` is written at most once
/// - `elapsed_secs` never decreases
/// - once closed, later samples are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stopwatch {
    started_at: Option<Timestamp>,
    elapsed_secs: u64,
    closed: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the stopwatch. Returns false (and changes nothing) if it was
    /// already started.
    pub fn start(&mut self, now: Timestamp) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Recomputes elapsed seconds from a clock sample.
    pub fn tick(&mut self, now: Timestamp) {
        if self.closed {
            return;
        }
        if let Some(started_at) = self.started_at {
            self.elapsed_secs = self.elapsed_secs.max(now.whole_secs_since(&started_at));
        }
    }

    /// Takes a final sample and freezes the stopwatch.
    ///
    /// Closing a stopwatch that never started leaves it at zero.
    pub fn close(&mut self, now: Timestamp) {
        self.tick(now);
        self.closed = true;
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Started and still accepting samples.
    pub fn is_running(&self) -> bool {
        self.is_started() && !self.closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }
}

/// Countdown window bound to one timed phase.
///
/// Expiry is advisory: reaching zero remaining never ends the phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedWindow {
    phase: Phase,
    duration_secs: u64,
    #[serde(flatten)]
    watch: Stopwatch,
}

impl TimedWindow {
    /// Creates an unstarted window with an explicit duration.
    pub fn new(phase: Phase, duration_secs: u64) -> Self {
        Self {
            phase,
            duration_secs,
            watch: Stopwatch::new(),
        }
    }

    /// Creates the window for a timed phase using its fixed duration.
    ///
    /// Returns `None` for phases without a countdown.
    pub fn for_phase(phase: Phase) -> Option<Self> {
        phase
            .window_duration_secs()
            .map(|duration| Self::new(phase, duration))
    }

    /// Starts the countdown once; repeated calls are silent no-ops.
    pub fn start(&mut self, now: Timestamp) -> bool {
        self.watch.start(now)
    }

    /// Recomputes elapsed time while the window is running.
    pub fn tick(&mut self, now: Timestamp) {
        self.watch.tick(now);
    }

    /// Records the final elapsed time when the participant leaves the phase.
    pub fn close(&mut self, now: Timestamp) {
        self.watch.close(now);
    }

    /// Seconds left on the countdown, floored at zero.
    pub fn remaining_secs(&self) -> u64 {
        self.duration_secs.saturating_sub(self.watch.elapsed_secs())
    }

    /// Started and the countdown has reached zero.
    pub fn is_expired(&self) -> bool {
        self.is_started() && self.remaining_secs() == 0
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn is_started(&self) -> bool {
        self.watch.is_started()
    }

    pub fn is_running(&self) -> bool {
        self.watch.is_running()
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.watch.started_at()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.watch.elapsed_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000 + secs)
    }

    #[test]
    fn new_window_is_idle_with_full_remaining() {
        let window = TimedWindow::for_phase(Phase::Brainstorm).unwrap();
        assert!(!window.is_started());
        assert_eq!(window.elapsed_secs(), 0);
        assert_eq!(window.remaining_secs(), 600);
    }

    #[test]
    fn for_phase_rejects_untimed_phases() {
        assert!(TimedWindow::for_phase(Phase::Reflection).is_none());
        assert!(TimedWindow::for_phase(Phase::Identify).is_none());
    }

    #[test]
    fn second_start_keeps_first_timestamp() {
        let mut window = TimedWindow::for_phase(Phase::PreTest).unwrap();
        assert!(window.start(t(0)));
        assert!(!window.start(t(30)));
        assert_eq!(window.started_at(), Some(t(0)));
    }

    #[test]
    fn tick_before_start_is_a_no_op() {
        let mut window = TimedWindow::for_phase(Phase::PreTest).unwrap();
        window.tick(t(100));
        assert_eq!(window.elapsed_secs(), 0);
        assert_eq!(window.remaining_secs(), 1800);
    }

    #[test]
    fn tick_recomputes_elapsed_from_start() {
        let mut window = TimedWindow::for_phase(Phase::Brainstorm).unwrap();
        window.start(t(0));
        window.tick(t(125));
        assert_eq!(window.elapsed_secs(), 125);
        assert_eq!(window.remaining_secs(), 475);
    }

    #[test]
    fn remaining_floors_at_zero_without_forcing_anything() {
        let mut window = TimedWindow::for_phase(Phase::Brainstorm).unwrap();
        window.start(t(0));
        window.tick(t(650));
        assert_eq!(window.remaining_secs(), 0);
        assert_eq!(window.elapsed_secs(), 650);
        assert!(window.is_expired());
        assert!(window.is_running());
    }

    #[test]
    fn earlier_sample_never_rewinds_elapsed() {
        let mut window = TimedWindow::for_phase(Phase::PostTest).unwrap();
        window.start(t(0));
        window.tick(t(90));
        window.tick(t(60));
        assert_eq!(window.elapsed_secs(), 90);
    }

    #[test]
    fn close_freezes_elapsed_at_exit_time() {
        let mut window = TimedWindow::for_phase(Phase::Brainstorm).unwrap();
        window.start(t(0));
        window.close(t(42));
        window.tick(t(500));
        assert_eq!(window.elapsed_secs(), 42);
        assert!(!window.is_running());
    }

    #[test]
    fn stopwatch_closed_without_start_stays_at_zero() {
        let mut watch = Stopwatch::new();
        watch.close(t(10));
        assert_eq!(watch.elapsed_secs(), 0);
        assert!(watch.is_closed());
        assert!(!watch.is_started());
    }

    #[test]
    fn stopwatch_tracks_untimed_phase_duration() {
        let mut watch = Stopwatch::new();
        watch.start(t(5));
        watch.close(t(305));
        assert_eq!(watch.elapsed_secs(), 300);
    }
}
