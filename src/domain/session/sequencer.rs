//! Phase sequencer - gates, transitions, and phase hooks.
//!
//! The sequencer owns no state of its own. It reads the record's current
//! phase, checks the gate for leaving it, runs the exit hook of the old phase
//! and the entry hook of the new one. Pass-through phases are left again
//! inside the same `advance` call.
//!
//! | From         | Gate              | Hook                                  |
//! |--------------|-------------------|---------------------------------------|
//! | Identify     | identity complete | -                                     |
//! | Instructions | -                 | start Brainstorm window               |
//! | Brainstorm   | -                 | close Brainstorm, start PreTest       |
//! | PreTest      | -                 | close PreTest, seed model text        |
//! | ModelReveal  | automatic         | start reflection stopwatch            |
//! | Reflection   | -                 | close stopwatch, start PostTest       |
//! | PostTest     | -                 | close PostTest                        |
//! | Survey       | -                 | finalize                              |

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, Timestamp};

use super::validator;
use super::{Phase, SessionRecord, TextField};

/// Deployment switches that shape timer and gate behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPolicy {
    /// Start a timed phase's window as soon as the phase is entered.
    pub auto_start: bool,
    /// Lock a timed phase's text field until its window is running.
    pub gated_editing: bool,
    /// Require the cohort label before leaving `Identify`.
    pub require_cohort: bool,
}

impl Default for TimerPolicy {
    fn default() -> Self {
        Self {
            auto_start: true,
            gated_editing: true,
            require_cohort: true,
        }
    }
}

/// Drives a record through the fixed phase order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseSequencer {
    policy: TimerPolicy,
}

impl PhaseSequencer {
    pub fn new(policy: TimerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TimerPolicy {
        self.policy
    }

    /// Checks the gate for leaving the current phase.
    ///
    /// Returns the phase that `advance` would enter.
    ///
    /// # Errors
    ///
    /// - `SessionFinalized` if the record is frozen
    /// - `InvalidStateTransition` from `Complete`
    /// - `ValidationFailed` if the current phase's gate is not met
    pub fn can_advance(&self, record: &SessionRecord) -> Result<Phase, DomainError> {
        if record.is_finished() {
            return Err(DomainError::new(
                ErrorCode::SessionFinalized,
                "The session is already complete",
            ));
        }

        let current = record.phase();
        let next = current.successor().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("No phase follows {}", current.display_name()),
            )
        })?;

        if current == Phase::Identify {
            validator::identity_complete(record.identity(), self.policy.require_cohort)?;
        }

        Ok(next)
    }

    /// Moves the record to the next phase, running exit and entry hooks.
    ///
    /// On a refused gate the record is untouched. Returns the phase the
    /// record ends up in, which skips past any pass-through phase.
    pub fn advance(&self, record: &mut SessionRecord, now: Timestamp) -> Result<Phase, DomainError> {
        let next = self.can_advance(record)?;
        self.step(record, next, now)?;

        while record.phase().is_pass_through() {
            let current = record.phase();
            let next = current.successor().ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    format!("No phase follows {}", current.display_name()),
                )
            })?;
            self.step(record, next, now)?;
        }

        Ok(record.phase())
    }

    /// Starts the current phase's countdown on participant request.
    ///
    /// Returns false if the window was already running.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the current phase has no countdown
    /// - `SessionFinalized` if the record is frozen
    pub fn start_timer(&self, record: &mut SessionRecord, now: Timestamp) -> Result<bool, DomainError> {
        let phase = record.phase();
        if !phase.is_timed() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("{} has no timer to start", phase.display_name()),
            ));
        }
        record.start_timer(phase, now)
    }

    /// Whether the participant may currently overwrite `field`.
    pub fn is_editable(&self, record: &SessionRecord, field: TextField) -> bool {
        if record.is_finished() || !field.is_participant_written() {
            return false;
        }
        if field.phase() != record.phase() {
            return false;
        }
        if self.policy.gated_editing {
            if let Some(window) = record.window(field.phase()) {
                return window.is_running();
            }
        }
        true
    }

    /// Whether a manual timer start is meaningful right now.
    pub fn can_start_timer(&self, record: &SessionRecord) -> bool {
        !record.is_finished()
            && record
                .current_window()
                .is_some_and(|window| !window.is_started())
    }

    fn step(&self, record: &mut SessionRecord, next: Phase, now: Timestamp) -> Result<(), DomainError> {
        let current = record.phase();
        current.transition_to(next)?;

        self.on_exit(record, current, now);
        record.enter_phase(next, now);
        self.on_enter(record, next, now)
    }

    fn on_exit(&self, record: &mut SessionRecord, phase: Phase, now: Timestamp) {
        match phase {
            Phase::Brainstorm | Phase::PreTest | Phase::Reflection | Phase::PostTest => {
                record.close_timer(phase, now);
            }
            _ => {}
        }
    }

    fn on_enter(&self, record: &mut SessionRecord, phase: Phase, now: Timestamp) -> Result<(), DomainError> {
        match phase {
            Phase::Brainstorm | Phase::PreTest | Phase::PostTest if self.policy.auto_start => {
                record.start_timer(phase, now)?;
            }
            Phase::ModelReveal => {
                record.seed_model_text();
            }
            Phase::Reflection => {
                record.start_timer(phase, now)?;
            }
            Phase::Complete => {
                record.finalize(now)?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{Identity, MODEL_TEXT};

    fn t(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000 + secs)
    }

    fn identified_record() -> SessionRecord {
        let mut record = SessionRecord::new(t(0));
        record
            .set_identity(Identity::new("Aki", "S100", Some("Mon3".to_string())))
            .unwrap();
        record
    }

    fn advance_to(seq: &PhaseSequencer, record: &mut SessionRecord, target: Phase, now: Timestamp) {
        while record.phase() < target {
            seq.advance(record, now).unwrap();
        }
    }

    #[test]
    fn identify_is_gated_on_complete_identity() {
        let seq = PhaseSequencer::default();
        let mut record = SessionRecord::new(t(0));
        record
            .set_identity(Identity::new("Aki", "S100", Some("  ".to_string())))
            .unwrap();

        let err = seq.advance(&mut record, t(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("field"), Some("cohort"));
        assert_eq!(record.phase(), Phase::Identify);
    }

    #[test]
    fn optional_cohort_policy_lets_blank_cohort_through() {
        let seq = PhaseSequencer::new(TimerPolicy {
            require_cohort: false,
            ..TimerPolicy::default()
        });
        let mut record = SessionRecord::new(t(0));
        record.set_identity(Identity::new("Aki", "S100", None)).unwrap();
        assert_eq!(seq.advance(&mut record, t(1)).unwrap(), Phase::Instructions);
    }

    #[test]
    fn entering_brainstorm_auto_starts_window() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        advance_to(&seq, &mut record, Phase::Brainstorm, t(5));

        let window = record.window(Phase::Brainstorm).unwrap();
        assert_eq!(window.started_at(), Some(t(5)));
        assert!(record.has_running_window());
    }

    #[test]
    fn manual_policy_waits_for_start_timer() {
        let seq = PhaseSequencer::new(TimerPolicy {
            auto_start: false,
            ..TimerPolicy::default()
        });
        let mut record = identified_record();
        advance_to(&seq, &mut record, Phase::Brainstorm, t(5));

        assert!(!record.window(Phase::Brainstorm).unwrap().is_started());
        assert!(seq.can_start_timer(&record));
        assert!(!seq.is_editable(&record, TextField::Brainstorm));

        assert!(seq.start_timer(&mut record, t(9)).unwrap());
        assert!(!seq.start_timer(&mut record, t(12)).unwrap());
        assert_eq!(record.window(Phase::Brainstorm).unwrap().started_at(), Some(t(9)));
        assert!(seq.is_editable(&record, TextField::Brainstorm));
    }

    #[test]
    fn start_timer_outside_timed_phase_is_refused() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        let err = seq.start_timer(&mut record, t(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn leaving_a_phase_records_elapsed_at_exit() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        advance_to(&seq, &mut record, Phase::Brainstorm, t(0));

        seq.advance(&mut record, t(420)).unwrap();
        let window = record.window(Phase::Brainstorm).unwrap();
        assert_eq!(window.elapsed_secs(), 420);
        assert!(!window.is_running());
        assert_eq!(record.window(Phase::PreTest).unwrap().started_at(), Some(t(420)));
    }

    #[test]
    fn model_reveal_passes_straight_to_reflection() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        advance_to(&seq, &mut record, Phase::PreTest, t(0));

        assert_eq!(seq.advance(&mut record, t(100)).unwrap(), Phase::Reflection);
        assert_eq!(record.text(TextField::Model), MODEL_TEXT);
        assert_eq!(record.reflection_clock().started_at(), Some(t(100)));
    }

    #[test]
    fn existing_model_text_is_not_replaced() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        record.set_text(TextField::Model, "custom model".to_string()).unwrap();
        advance_to(&seq, &mut record, Phase::Reflection, t(0));
        assert_eq!(record.text(TextField::Model), "custom model");
    }

    #[test]
    fn survey_to_complete_finalizes() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        advance_to(&seq, &mut record, Phase::Complete, t(50));

        assert!(record.is_finished());
        assert_eq!(record.finalized_at(), Some(t(50)));
        let err = seq.advance(&mut record, t(60)).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionFinalized);
    }

    #[test]
    fn visited_phases_follow_protocol_order() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        let mut visited = vec![record.phase()];
        while !record.is_finished() {
            seq.advance(&mut record, t(1)).unwrap();
            visited.push(record.phase());
        }
        let expected: Vec<Phase> = Phase::all()
            .iter()
            .copied()
            .filter(|p| !p.is_pass_through())
            .collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn fields_are_editable_only_in_their_phase() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        advance_to(&seq, &mut record, Phase::PreTest, t(0));

        assert!(seq.is_editable(&record, TextField::PreTest));
        assert!(!seq.is_editable(&record, TextField::Brainstorm));
        assert!(!seq.is_editable(&record, TextField::PostTest));
        assert!(!seq.is_editable(&record, TextField::Model));
    }

    #[test]
    fn expired_window_stays_editable() {
        let seq = PhaseSequencer::default();
        let mut record = identified_record();
        advance_to(&seq, &mut record, Phase::Brainstorm, t(0));
        record.tick(t(650));

        let window = record.window(Phase::Brainstorm).unwrap();
        assert_eq!(window.remaining_secs(), 0);
        assert_eq!(record.phase(), Phase::Brainstorm);
        assert!(seq.is_editable(&record, TextField::Brainstorm));
    }
}
