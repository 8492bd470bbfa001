//! Participant actions accepted by the session dispatcher.

use crate::domain::session::{Identity, ReflectionDraft, TextField};

/// One discrete participant action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Store participant details (Identify only).
    SetIdentity(Identity),
    /// Overwrite a free-text field.
    SetText { field: TextField, text: String },
    /// Start the current phase's countdown.
    StartTimer,
    /// Validate and append a reflection entry.
    AddReflectionEntry(ReflectionDraft),
    /// Record a survey answer.
    AnswerSurvey { question_id: String, value: i64 },
    /// Leave the current phase.
    Advance,
}

impl SessionCommand {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::SetIdentity(_) => "set_identity",
            SessionCommand::SetText { .. } => "set_text",
            SessionCommand::StartTimer => "start_timer",
            SessionCommand::AddReflectionEntry(_) => "add_reflection_entry",
            SessionCommand::AnswerSurvey { .. } => "answer_survey",
            SessionCommand::Advance => "advance",
        }
    }
}
