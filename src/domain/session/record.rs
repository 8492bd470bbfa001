//! SessionRecord aggregate - everything one participant produces.
//!
//! The record is created with every field at its default, mutated by the
//! form handlers and the phase sequencer, and frozen by `finalize`. After
//! that only the export serializer reads it.

use std::collections::HashMap;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};

use super::catalog::{BRAINSTORM_DURATION_SECS, MODEL_TEXT, WRITING_TEST_DURATION_SECS};
use super::validator;
use super::{
    Identity, LikertScore, Phase, ReflectionDraft, ReflectionEntry, SessionEvent, Stopwatch,
    SurveyAnswers, TextField, TextStats, TimedWindow,
};

/// The session aggregate root.
///
/// # Invariants
///
/// - `phase` only moves forward (enforced by the sequencer)
/// - identity is writable only while `phase` is `Identify`
/// - reflection entries are append-only
/// - once `finished`, every mutator fails with `SessionFinalized`
#[derive(Debug, Clone)]
pub struct SessionRecord {
    id: SessionId,
    identity: Identity,
    phase: Phase,
    brainstorm_window: TimedWindow,
    pre_test_window: TimedWindow,
    post_test_window: TimedWindow,
    reflection_clock: Stopwatch,
    texts: HashMap<TextField, String>,
    reflection_entries: Vec<ReflectionEntry>,
    survey: SurveyAnswers,
    finished: bool,
    created_at: Timestamp,
    finalized_at: Option<Timestamp>,
    domain_events: Vec<SessionEvent>,
}

impl SessionRecord {
    /// Creates a blank record positioned at `Identify`.
    pub fn new(created_at: Timestamp) -> Self {
        let id = SessionId::new();
        let mut record = Self {
            id,
            identity: Identity::default(),
            phase: Phase::Identify,
            brainstorm_window: TimedWindow::new(Phase::Brainstorm, BRAINSTORM_DURATION_SECS),
            pre_test_window: TimedWindow::new(Phase::PreTest, WRITING_TEST_DURATION_SECS),
            post_test_window: TimedWindow::new(Phase::PostTest, WRITING_TEST_DURATION_SECS),
            reflection_clock: Stopwatch::new(),
            texts: HashMap::new(),
            reflection_entries: Vec::new(),
            survey: SurveyAnswers::new(),
            finished: false,
            created_at,
            finalized_at: None,
            domain_events: Vec::new(),
        };

        record.record_event(SessionEvent::Created {
            session_id: id,
            created_at,
        });

        record
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn finalized_at(&self) -> Option<Timestamp> {
        self.finalized_at
    }

    /// Returns the countdown window of a timed phase.
    pub fn window(&self, phase: Phase) -> Option<&TimedWindow> {
        match phase {
            Phase::Brainstorm => Some(&self.brainstorm_window),
            Phase::PreTest => Some(&self.pre_test_window),
            Phase::PostTest => Some(&self.post_test_window),
            _ => None,
        }
    }

    /// All countdown windows in protocol order.
    pub fn windows(&self) -> [&TimedWindow; 3] {
        [
            &self.brainstorm_window,
            &self.pre_test_window,
            &self.post_test_window,
        ]
    }

    /// Stopwatch measuring time spent in the untimed reflection phase.
    pub fn reflection_clock(&self) -> &Stopwatch {
        &self.reflection_clock
    }

    /// Returns the window of the current phase, if it has one.
    pub fn current_window(&self) -> Option<&TimedWindow> {
        self.window(self.phase)
    }

    /// True while the current phase has a started, unclosed countdown.
    pub fn has_running_window(&self) -> bool {
        self.current_window().is_some_and(TimedWindow::is_running)
    }

    /// True while a clock sample would change the record: a running
    /// countdown, or the reflection stopwatch during `Reflection`.
    pub fn has_running_clock(&self) -> bool {
        self.has_running_window()
            || (self.phase == Phase::Reflection && self.reflection_clock.is_running())
    }

    /// Returns the text of a field, empty if never written.
    pub fn text(&self, field: TextField) -> &str {
        self.texts.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn text_stats(&self, field: TextField) -> TextStats {
        TextStats::of(self.text(field))
    }

    /// Reflection entries in insertion order.
    pub fn reflection_entries(&self) -> &[ReflectionEntry] {
        &self.reflection_entries
    }

    pub fn survey(&self) -> &SurveyAnswers {
        &self.survey
    }

    /// Takes accumulated domain events, clearing the internal buffer.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Form mutations
    // ───────────────────────────────────────────────────────────────

    /// Stores participant details.
    ///
    /// Completeness is not checked here; the sequencer checks it when the
    /// participant tries to leave `Identify`.
    ///
    /// # Errors
    ///
    /// - `SessionFinalized` if the record is frozen
    /// - `FieldLocked` once the session has left `Identify`
    /// - `OutOfRange` if a value would not fit in one workbook cell
    pub fn set_identity(&mut self, identity: Identity) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        if self.phase != Phase::Identify {
            return Err(DomainError::new(
                ErrorCode::FieldLocked,
                "Participant details cannot change after the session has started",
            )
            .with_detail("field", "identity"));
        }
        validator::identity_within_limits(&identity)?;

        self.identity = identity;
        self.record_event(SessionEvent::IdentityCaptured { session_id: self.id });
        Ok(())
    }

    /// Overwrites a free-text field. No history is kept.
    ///
    /// # Errors
    ///
    /// - `SessionFinalized` if the record is frozen
    /// - `OutOfRange` if the text would not fit in one workbook cell; the
    ///   previous text is kept
    pub fn set_text(&mut self, field: TextField, text: String) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        validator::text_within_limit(field.as_str(), &text)?;

        let chars = text.chars().count();
        self.texts.insert(field, text);
        self.record_event(SessionEvent::TextUpdated {
            session_id: self.id,
            field,
            chars,
        });
        Ok(())
    }

    /// Validates a draft and appends it as a new entry.
    ///
    /// # Errors
    ///
    /// - `SessionFinalized` if the record is frozen
    /// - `ValidationFailed` / `InvalidFormat` if the draft is incomplete;
    ///   the entry sequence is left unchanged
    pub fn add_reflection_entry(
        &mut self,
        draft: ReflectionDraft,
    ) -> Result<&ReflectionEntry, DomainError> {
        self.ensure_mutable()?;
        let code = validator::reflection_entry_complete(&draft)?;

        self.reflection_entries
            .push(ReflectionEntry::from_checked(draft, code));
        let position = self.reflection_entries.len();
        self.record_event(SessionEvent::ReflectionEntryAdded {
            session_id: self.id,
            position,
            code,
        });

        Ok(&self.reflection_entries[position - 1])
    }

    /// Records or overwrites one survey answer.
    ///
    /// # Errors
    ///
    /// - `SessionFinalized` if the record is frozen
    /// - `QuestionNotFound` for ids outside the catalog
    /// - `OutOfRange` for values outside 1..=5
    pub fn set_survey_answer(
        &mut self,
        question_id: &str,
        value: i64,
    ) -> Result<LikertScore, DomainError> {
        self.ensure_mutable()?;

        let score = self.survey.set(question_id, value)?;
        if let Some(question) = super::find_question(question_id) {
            self.record_event(SessionEvent::SurveyAnswered {
                session_id: self.id,
                question_id: question.id,
                value: score.value(),
            });
        }
        Ok(score)
    }

    /// Freezes the record for export.
    ///
    /// # Errors
    ///
    /// - `SessionFinalized` if called a second time
    pub fn finalize(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_mutable()?;

        self.finished = true;
        self.finalized_at = Some(now);
        self.record_event(SessionEvent::Finalized {
            session_id: self.id,
            at: now,
        });
        Ok(())
    }

    /// Applies a clock sample to whatever is measuring the current phase.
    ///
    /// Samples outside a running window or stopwatch change nothing.
    pub fn tick(&mut self, now: Timestamp) {
        match self.phase {
            Phase::Brainstorm => self.brainstorm_window.tick(now),
            Phase::PreTest => self.pre_test_window.tick(now),
            Phase::PostTest => self.post_test_window.tick(now),
            Phase::Reflection => self.reflection_clock.tick(now),
            _ => {}
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Sequencer hooks
    // ───────────────────────────────────────────────────────────────

    pub(super) fn enter_phase(&mut self, phase: Phase, now: Timestamp) {
        self.phase = phase;
        self.record_event(SessionEvent::PhaseEntered {
            session_id: self.id,
            phase,
            at: now,
        });
    }

    /// Starts the window or stopwatch belonging to `phase`.
    ///
    /// Returns false if there is nothing to start or it already started.
    pub(super) fn start_timer(&mut self, phase: Phase, now: Timestamp) -> Result<bool, DomainError> {
        self.ensure_mutable()?;

        let started = match phase {
            Phase::Brainstorm => self.brainstorm_window.start(now),
            Phase::PreTest => self.pre_test_window.start(now),
            Phase::PostTest => self.post_test_window.start(now),
            Phase::Reflection => self.reflection_clock.start(now),
            _ => false,
        };
        if started {
            self.record_event(SessionEvent::TimerStarted {
                session_id: self.id,
                phase,
                at: now,
            });
        }
        Ok(started)
    }

    /// Takes a final sample for `phase` and freezes its timer.
    pub(super) fn close_timer(&mut self, phase: Phase, now: Timestamp) {
        let elapsed_secs = match phase {
            Phase::Brainstorm => {
                self.brainstorm_window.close(now);
                self.brainstorm_window.elapsed_secs()
            }
            Phase::PreTest => {
                self.pre_test_window.close(now);
                self.pre_test_window.elapsed_secs()
            }
            Phase::PostTest => {
                self.post_test_window.close(now);
                self.post_test_window.elapsed_secs()
            }
            Phase::Reflection => {
                self.reflection_clock.close(now);
                self.reflection_clock.elapsed_secs()
            }
            _ => return,
        };
        self.record_event(SessionEvent::TimerClosed {
            session_id: self.id,
            phase,
            elapsed_secs,
        });
    }

    /// Places the fixed model text into the record unless one is present.
    pub(super) fn seed_model_text(&mut self) -> bool {
        if !self.text(TextField::Model).is_empty() {
            return false;
        }
        self.texts.insert(TextField::Model, MODEL_TEXT.to_string());
        self.record_event(SessionEvent::ModelTextSeeded { session_id: self.id });
        true
    }

    // ───────────────────────────────────────────────────────────────
    // Private helpers
    // ───────────────────────────────────────────────────────────────

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.finished {
            Err(DomainError::new(
                ErrorCode::SessionFinalized,
                "Cannot modify a finalized session",
            ))
        } else {
            Ok(())
        }
    }

    fn record_event(&mut self, event: SessionEvent) {
        self.domain_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000 + secs)
    }

    fn test_record() -> SessionRecord {
        SessionRecord::new(t(0))
    }

    #[test]
    fn new_record_starts_blank_at_identify() {
        let record = test_record();
        assert_eq!(record.phase(), Phase::Identify);
        assert!(!record.is_finished());
        assert!(record.reflection_entries().is_empty());
        assert!(record.survey().is_empty());
        assert_eq!(record.text(TextField::PreTest), "");
        assert!(record.windows().iter().all(|w| !w.is_started()));
    }

    #[test]
    fn new_record_emits_created_event() {
        let mut record = test_record();
        let events = record.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SessionEvent::Created { .. }));
        assert!(record.take_events().is_empty());
    }

    #[test]
    fn identity_is_locked_after_identify() {
        let mut record = test_record();
        record.set_identity(Identity::new("Aki", "S100", None)).unwrap();
        record.enter_phase(Phase::Instructions, t(1));

        let err = record
            .set_identity(Identity::new("Someone", "S999", None))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FieldLocked);
        assert_eq!(record.identity().name, "Aki");
    }

    #[test]
    fn oversized_text_is_refused_and_previous_text_kept() {
        use crate::domain::foundation::ErrorCode;
        use crate::domain::session::MAX_TEXT_CHARS;

        let mut record = test_record();
        record.set_text(TextField::Brainstorm, "ideas".to_string()).unwrap();
        record.take_events();

        let err = record
            .set_text(TextField::Brainstorm, "x".repeat(MAX_TEXT_CHARS + 1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(err.detail("field"), Some("brainstorm"));
        assert_eq!(record.text(TextField::Brainstorm), "ideas");
        assert!(record.take_events().is_empty());

        record
            .set_text(TextField::Brainstorm, "x".repeat(MAX_TEXT_CHARS))
            .unwrap();
        assert_eq!(record.text_stats(TextField::Brainstorm).chars, MAX_TEXT_CHARS);
    }

    #[test]
    fn set_text_overwrites_without_history() {
        let mut record = test_record();
        record.set_text(TextField::Brainstorm, "first".to_string()).unwrap();
        record.set_text(TextField::Brainstorm, "second draft".to_string()).unwrap();
        assert_eq!(record.text(TextField::Brainstorm), "second draft");
        assert_eq!(record.text_stats(TextField::Brainstorm).words, 2);
    }

    #[test]
    fn incomplete_reflection_draft_is_not_appended() {
        let mut record = test_record();
        let err = record
            .add_reflection_entry(ReflectionDraft::new("peoples", "", "GR", ""))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("field"), Some("correction_text"));
        assert!(record.reflection_entries().is_empty());
    }

    #[test]
    fn reflection_entries_keep_insertion_order() {
        let mut record = test_record();
        record
            .add_reflection_entry(ReflectionDraft::new("a", "b", "L", ""))
            .unwrap();
        record
            .add_reflection_entry(ReflectionDraft::new("c", "d", "SP", "typo"))
            .unwrap();
        let errors: Vec<_> = record
            .reflection_entries()
            .iter()
            .map(|e| e.error_text())
            .collect();
        assert_eq!(errors, vec!["a", "c"]);
    }

    #[test]
    fn start_timer_is_idempotent_once() {
        let mut record = test_record();
        assert!(record.start_timer(Phase::Brainstorm, t(10)).unwrap());
        assert!(!record.start_timer(Phase::Brainstorm, t(20)).unwrap());
        assert_eq!(
            record.window(Phase::Brainstorm).unwrap().started_at(),
            Some(t(10))
        );
    }

    #[test]
    fn tick_only_touches_the_current_phase() {
        let mut record = test_record();
        record.start_timer(Phase::Brainstorm, t(0)).unwrap();
        record.tick(t(30));
        assert_eq!(record.window(Phase::Brainstorm).unwrap().elapsed_secs(), 0);

        record.enter_phase(Phase::Brainstorm, t(0));
        record.tick(t(30));
        assert_eq!(record.window(Phase::Brainstorm).unwrap().elapsed_secs(), 30);
        assert!(record.has_running_window());
    }

    #[test]
    fn reflection_stopwatch_counts_only_while_reflection_is_current() {
        let mut record = test_record();
        assert!(!record.has_running_clock());

        record.enter_phase(Phase::Reflection, t(0));
        record.reflection_clock.start(t(0));
        assert!(record.has_running_clock());
        assert!(!record.has_running_window());

        record.tick(t(45));
        assert_eq!(record.reflection_clock().elapsed_secs(), 45);
    }

    #[test]
    fn seed_model_text_only_fills_empty_field() {
        let mut record = test_record();
        assert!(record.seed_model_text());
        assert!(!record.seed_model_text());
        assert_eq!(record.text(TextField::Model), MODEL_TEXT);
    }

    #[test]
    fn finalize_blocks_every_mutator() {
        let mut record = test_record();
        record.finalize(t(100)).unwrap();

        assert!(record.is_finished());
        assert_eq!(record.finalized_at(), Some(t(100)));
        assert_eq!(
            record.set_text(TextField::PostTest, "late".to_string()).unwrap_err().code,
            ErrorCode::SessionFinalized
        );
        assert_eq!(
            record.set_survey_answer("M1", 3).unwrap_err().code,
            ErrorCode::SessionFinalized
        );
        assert_eq!(
            record
                .add_reflection_entry(ReflectionDraft::new("a", "b", "O", ""))
                .unwrap_err()
                .code,
            ErrorCode::SessionFinalized
        );
        assert_eq!(record.finalize(t(101)).unwrap_err().code, ErrorCode::SessionFinalized);
        assert_eq!(record.text(TextField::PostTest), "");
    }
}
