//! Structured error-correction entries recorded during reflection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Error category assigned by the participant to each correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionCode {
    /// Lexical (word choice).
    #[serde(rename = "L")]
    Lexical,
    /// Grammar.
    #[serde(rename = "GR")]
    Grammar,
    /// Spelling.
    #[serde(rename = "SP")]
    Spelling,
    /// Punctuation.
    #[serde(rename = "P")]
    Punctuation,
    /// Anything else.
    #[serde(rename = "O")]
    Other,
}

impl CorrectionCode {
    pub fn all() -> &'static [CorrectionCode] {
        &[
            CorrectionCode::Lexical,
            CorrectionCode::Grammar,
            CorrectionCode::Spelling,
            CorrectionCode::Punctuation,
            CorrectionCode::Other,
        ]
    }

    /// Short code as written on the coding sheet.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            CorrectionCode::Lexical => "L",
            CorrectionCode::Grammar => "GR",
            CorrectionCode::Spelling => "SP",
            CorrectionCode::Punctuation => "P",
            CorrectionCode::Other => "O",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorrectionCode::Lexical => "Lexical",
            CorrectionCode::Grammar => "Grammar",
            CorrectionCode::Spelling => "Spelling",
            CorrectionCode::Punctuation => "Punctuation",
            CorrectionCode::Other => "Other",
        }
    }
}

impl fmt::Display for CorrectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for CorrectionCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CorrectionCode::all()
            .iter()
            .find(|code| code.abbreviation().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "code",
                    format!("'{}' is not one of L, GR, SP, P, O", trimmed),
                )
            })
    }
}

/// Unvalidated form input for a reflection entry.
///
/// The draft belongs to the UI; the record only ever sees it at submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReflectionDraft {
    #[serde(default)]
    pub error_text: String,
    #[serde(default)]
    pub correction_text: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub explanation: String,
}

impl ReflectionDraft {
    pub fn new(
        error_text: impl Into<String>,
        correction_text: impl Into<String>,
        code: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            error_text: error_text.into(),
            correction_text: correction_text.into(),
            code: code.into(),
            explanation: explanation.into(),
        }
    }
}

/// One immutable error/correction pair with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectionEntry {
    error_text: String,
    correction_text: String,
    code: CorrectionCode,
    explanation: String,
}

impl ReflectionEntry {
    /// Builds an entry from a draft that already passed completeness checks.
    pub(super) fn from_checked(draft: ReflectionDraft, code: CorrectionCode) -> Self {
        Self {
            error_text: draft.error_text,
            correction_text: draft.correction_text,
            code,
            explanation: draft.explanation,
        }
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    pub fn correction_text(&self) -> &str {
        &self.correction_text
    }

    pub fn code(&self) -> CorrectionCode {
        self.code
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!("gr".parse::<CorrectionCode>().unwrap(), CorrectionCode::Grammar);
        assert_eq!(" SP ".parse::<CorrectionCode>().unwrap(), CorrectionCode::Spelling);
        assert_eq!("o".parse::<CorrectionCode>().unwrap(), CorrectionCode::Other);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "X".parse::<CorrectionCode>().unwrap_err();
        assert_eq!(err.field(), "code");
    }

    #[test]
    fn codes_serialize_as_abbreviations() {
        for code in CorrectionCode::all() {
            let json = serde_json::to_string(code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.abbreviation()));
        }
    }

    #[test]
    fn draft_deserializes_with_missing_explanation() {
        let draft: ReflectionDraft = serde_json::from_str(
            r#"{"error_text": "peoples", "correction_text": "people", "code": "GR"}"#,
        )
        .unwrap();
        assert_eq!(draft.explanation, "");
        assert_eq!(draft.code, "GR");
    }
}
