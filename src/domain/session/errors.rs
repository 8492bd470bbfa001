//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by session commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A required field is blank or a draft is incomplete.
    ValidationFailed { field: String, message: String },
    /// A numeric answer fell outside its scale.
    OutOfRange { field: String, message: String },
    /// The survey question id is not in the catalog.
    UnknownQuestion(String),
    /// The field cannot be edited in the current phase or timer state.
    FieldLocked { field: String, message: String },
    /// The action is not valid in the current phase.
    InvalidState(String),
    /// The record has been finalized.
    Finalized,
    /// Export could not be produced.
    Export(String),
    /// The session runtime is no longer running.
    Unavailable,
}

impl SessionError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field_locked(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::FieldLocked {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }

    pub fn export(message: impl Into<String>) -> Self {
        SessionError::Export(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::OutOfRange { .. } => ErrorCode::OutOfRange,
            SessionError::UnknownQuestion(_) => ErrorCode::QuestionNotFound,
            SessionError::FieldLocked { .. } => ErrorCode::FieldLocked,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::Finalized => ErrorCode::SessionFinalized,
            SessionError::Export(_) => ErrorCode::ExportFailed,
            SessionError::Unavailable => ErrorCode::InternalError,
        }
    }

    /// Name of the offending field, for errors tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            SessionError::ValidationFailed { field, .. }
            | SessionError::OutOfRange { field, .. }
            | SessionError::FieldLocked { field, .. } => Some(field),
            SessionError::UnknownQuestion(id) => Some(id),
            _ => None,
        }
    }

    /// Human-readable notice shown to the participant.
    pub fn message(&self) -> String {
        match self {
            SessionError::ValidationFailed { message, .. } => message.clone(),
            SessionError::OutOfRange { message, .. } => message.clone(),
            SessionError::UnknownQuestion(id) => format!("Unknown survey question '{}'", id),
            SessionError::FieldLocked { message, .. } => message.clone(),
            SessionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SessionError::Finalized => "The session is finished and can no longer change".to_string(),
            SessionError::Export(msg) => format!("Export failed: {}", msg),
            SessionError::Unavailable => "Session runtime is not running".to_string(),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        let field = err.detail("field").unwrap_or("unknown").to_string();
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                SessionError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            ErrorCode::OutOfRange => SessionError::OutOfRange {
                field,
                message: err.message,
            },
            ErrorCode::QuestionNotFound => SessionError::UnknownQuestion(field),
            ErrorCode::FieldLocked => SessionError::FieldLocked {
                field,
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => SessionError::InvalidState(err.message),
            ErrorCode::SessionFinalized => SessionError::Finalized,
            ErrorCode::ExportFailed => SessionError::Export(err.message),
            ErrorCode::InternalError => SessionError::Unavailable,
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        DomainError::from(err).into()
    }
}
