//! Free-text fields and their derived counts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

use super::Phase;

/// Prose fields captured during the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Brainstorm,
    PreTest,
    Model,
    ReflectionNotes,
    PostTest,
}

impl TextField {
    /// Returns all fields in export order.
    pub fn all() -> &'static [TextField] {
        &[
            TextField::Brainstorm,
            TextField::PreTest,
            TextField::Model,
            TextField::ReflectionNotes,
            TextField::PostTest,
        ]
    }

    /// The phase during which the participant writes this field.
    ///
    /// The model text belongs to `ModelReveal`, which is never current long
    /// enough to be edited.
    pub fn phase(&self) -> Phase {
        match self {
            TextField::Brainstorm => Phase::Brainstorm,
            TextField::PreTest => Phase::PreTest,
            TextField::Model => Phase::ModelReveal,
            TextField::ReflectionNotes => Phase::Reflection,
            TextField::PostTest => Phase::PostTest,
        }
    }

    /// Returns false for fields only the system writes.
    pub fn is_participant_written(&self) -> bool {
        !matches!(self, TextField::Model)
    }

    /// Wire identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Brainstorm => "brainstorm",
            TextField::PreTest => "pre_test",
            TextField::Model => "model",
            TextField::ReflectionNotes => "reflection_notes",
            TextField::PostTest => "post_test",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TextField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextField::all()
            .iter()
            .find(|field| field.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::invalid_format("text_field", format!("unknown field '{}'", s)))
    }
}

/// Word and character counts of a text, derived on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub words: usize,
    pub chars: usize,
}

impl TextStats {
    /// Words are whitespace-delimited tokens; chars count Unicode scalar values
    /// of the raw text, whitespace included.
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }
}
