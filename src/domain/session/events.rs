//! Session domain events.
//!
//! Events are buffered on the record and drained by the dispatcher, which
//! turns them into log lines. They are not persisted.

use crate::domain::foundation::{SessionId, Timestamp};
use serde::Serialize;

use super::{CorrectionCode, Phase, TextField};

/// Events that can occur during a session's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new session record was created.
    Created {
        session_id: SessionId,
        created_at: Timestamp,
    },

    /// Participant details were stored.
    IdentityCaptured { session_id: SessionId },

    /// The session entered a phase.
    PhaseEntered {
        session_id: SessionId,
        phase: Phase,
        at: Timestamp,
    },

    /// A phase's window or stopwatch started.
    TimerStarted {
        session_id: SessionId,
        phase: Phase,
        at: Timestamp,
    },

    /// A window or stopwatch was frozen as its phase was left.
    TimerClosed {
        session_id: SessionId,
        phase: Phase,
        elapsed_secs: u64,
    },

    /// The model text was placed into the record.
    ModelTextSeeded { session_id: SessionId },

    /// A free-text field was overwritten.
    TextUpdated {
        session_id: SessionId,
        field: TextField,
        chars: usize,
    },

    /// A reflection entry was appended.
    ReflectionEntryAdded {
        session_id: SessionId,
        position: usize,
        code: CorrectionCode,
    },

    /// A survey question was answered.
    SurveyAnswered {
        session_id: SessionId,
        question_id: &'static str,
        value: u8,
    },

    /// The record was frozen for export.
    Finalized {
        session_id: SessionId,
        at: Timestamp,
    },
}

impl SessionEvent {
    /// Dotted event name used in log output.
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::Created { .. } => "session.created",
            SessionEvent::IdentityCaptured { .. } => "session.identity_captured",
            SessionEvent::PhaseEntered { .. } => "session.phase_entered",
            SessionEvent::TimerStarted { .. } => "session.timer_started",
            SessionEvent::TimerClosed { .. } => "session.timer_closed",
            SessionEvent::ModelTextSeeded { .. } => "session.model_text_seeded",
            SessionEvent::TextUpdated { .. } => "session.text_updated",
            SessionEvent::ReflectionEntryAdded { .. } => "session.reflection_entry_added",
            SessionEvent::SurveyAnswered { .. } => "session.survey_answered",
            SessionEvent::Finalized { .. } => "session.finalized",
        }
    }
}
