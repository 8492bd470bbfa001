//! SessionDispatcher - the single writer for a session record.
//!
//! Every participant command and clock tick is applied here, one at a time,
//! to completion. The dispatcher owns the record outright; callers only ever
//! see rendered views and exported workbooks.

use std::sync::Arc;

use tracing::{debug, error, info, trace, warn};

use crate::domain::export::{export_file_stem, serialize};
use crate::domain::foundation::Timestamp;
use crate::domain::session::{
    Phase, PhaseSequencer, SessionError, SessionEvent, SessionRecord, TextField,
};
use crate::ports::{Clock, ExportedWorkbook, SpreadsheetWriter};

use super::{SessionCommand, SessionView};

/// Applies commands and ticks to one owned record.
pub struct SessionDispatcher {
    record: SessionRecord,
    sequencer: PhaseSequencer,
    clock: Arc<dyn Clock>,
    writer: Arc<dyn SpreadsheetWriter>,
    notice: Option<String>,
}

impl SessionDispatcher {
    /// Creates a dispatcher around a fresh record.
    pub fn new(
        sequencer: PhaseSequencer,
        clock: Arc<dyn Clock>,
        writer: Arc<dyn SpreadsheetWriter>,
    ) -> Self {
        let record = SessionRecord::new(clock.now());
        let mut dispatcher = Self {
            record,
            sequencer,
            clock,
            writer,
            notice: None,
        };
        dispatcher.drain_events();
        dispatcher
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn sequencer(&self) -> &PhaseSequencer {
        &self.sequencer
    }

    /// True while clock ticks would change the record.
    pub fn wants_ticks(&self) -> bool {
        self.record.has_running_clock()
    }

    /// Applies one command. On failure the record is unchanged and the
    /// error's message becomes the notice on the next view.
    pub fn dispatch(&mut self, command: SessionCommand) -> Result<(), SessionError> {
        let now = self.clock.now();
        let name = command.name();
        let phase = self.record.phase();

        let result = self.apply(command, now);
        match &result {
            Ok(()) => {
                debug!(command = name, phase = ?phase, "Command applied");
                self.notice = None;
            }
            Err(SessionError::Finalized) => {
                error!(
                    session_id = %self.record.id(),
                    command = name,
                    "Mutation attempted on a finalized session"
                );
                self.notice = Some(SessionError::Finalized.message());
            }
            Err(err) => {
                warn!(
                    session_id = %self.record.id(),
                    command = name,
                    phase = ?phase,
                    code = %err.code(),
                    reason = %err.message(),
                    "Command refused"
                );
                self.notice = Some(err.message());
            }
        }

        self.drain_events();
        result
    }

    /// Applies a clock sample. A no-op unless the current phase has a
    /// running window or stopwatch.
    pub fn tick(&mut self) {
        if !self.record.has_running_clock() {
            trace!(phase = ?self.record.phase(), "Tick ignored");
            return;
        }

        let now = self.clock.now();
        self.record.tick(now);
        match self.record.current_window() {
            Some(window) => trace!(
                phase = ?window.phase(),
                elapsed_secs = window.elapsed_secs(),
                remaining_secs = window.remaining_secs(),
                "Tick"
            ),
            None => trace!(
                elapsed_secs = self.record.reflection_clock().elapsed_secs(),
                "Reflection tick"
            ),
        }
    }

    /// Builds the render view for the current state.
    pub fn view(&self) -> SessionView {
        SessionView::render(&self.record, &self.sequencer, self.notice.as_deref())
    }

    /// Serializes the finished record through the configured writer.
    ///
    /// # Errors
    ///
    /// - `InvalidState` before the session is complete
    /// - `Export` if the writer fails
    pub fn export(&self) -> Result<ExportedWorkbook, SessionError> {
        if !self.record.is_finished() {
            return Err(SessionError::invalid_state(
                "export is available once the session is complete",
            ));
        }

        let now = self.clock.now();
        let tables = serialize(&self.record);
        let bytes = self.writer.write(&tables).map_err(|e| {
            error!(session_id = %self.record.id(), error = %e, "Export failed");
            SessionError::export(e.to_string())
        })?;

        let stem = export_file_stem(now, self.clock.utc_offset());
        let workbook = ExportedWorkbook::new(bytes, self.writer.format(), &stem);
        info!(
            session_id = %self.record.id(),
            filename = %workbook.filename,
            bytes = workbook.content.len(),
            "Session exported"
        );
        Ok(workbook)
    }

    fn apply(&mut self, command: SessionCommand, now: Timestamp) -> Result<(), SessionError> {
        if self.record.is_finished() {
            return Err(SessionError::Finalized);
        }

        match command {
            SessionCommand::SetIdentity(identity) => {
                self.record.set_identity(identity)?;
            }
            SessionCommand::SetText { field, text } => {
                self.ensure_editable(field)?;
                self.record.set_text(field, text)?;
            }
            SessionCommand::StartTimer => {
                self.sequencer.start_timer(&mut self.record, now)?;
            }
            SessionCommand::AddReflectionEntry(draft) => {
                self.ensure_phase(Phase::Reflection, "reflection")?;
                self.record.add_reflection_entry(draft)?;
            }
            SessionCommand::AnswerSurvey { question_id, value } => {
                self.ensure_phase(Phase::Survey, &question_id)?;
                self.record.set_survey_answer(&question_id, value)?;
            }
            SessionCommand::Advance => {
                self.sequencer.advance(&mut self.record, now)?;
            }
        }
        Ok(())
    }

    fn ensure_editable(&self, field: TextField) -> Result<(), SessionError> {
        if self.sequencer.is_editable(&self.record, field) {
            return Ok(());
        }

        let message = if field.phase() != self.record.phase() || !field.is_participant_written() {
            format!("'{}' cannot be edited during {}", field, self.record.phase())
        } else {
            format!("Start the timer before writing in '{}'", field)
        };
        Err(SessionError::field_locked(field.as_str(), message))
    }

    fn ensure_phase(&self, expected: Phase, field: &str) -> Result<(), SessionError> {
        if self.record.phase() == expected {
            Ok(())
        } else {
            Err(SessionError::field_locked(
                field,
                format!("Only available during {}", expected),
            ))
        }
    }

    fn drain_events(&mut self) {
        for event in self.record.take_events() {
            match &event {
                SessionEvent::PhaseEntered { session_id, phase, .. } => {
                    info!(session_id = %session_id, phase = ?phase, event = event.event_type(), "Phase entered");
                }
                SessionEvent::TimerStarted { session_id, phase, .. } => {
                    info!(session_id = %session_id, phase = ?phase, event = event.event_type(), "Timer started");
                }
                SessionEvent::TimerClosed { session_id, phase, elapsed_secs } => {
                    info!(
                        session_id = %session_id,
                        phase = ?phase,
                        elapsed_secs,
                        event = event.event_type(),
                        "Timer closed"
                    );
                }
                SessionEvent::Finalized { session_id, .. } => {
                    info!(session_id = %session_id, event = event.event_type(), "Session finalized");
                }
                SessionEvent::Created { session_id, .. } => {
                    info!(session_id = %session_id, event = event.event_type(), "Session created");
                }
                _ => {
                    debug!(event = event.event_type(), "Session event");
                }
            }
        }
    }
}
