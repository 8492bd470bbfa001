//! Participant identity captured on the first screen.

use serde::{Deserialize, Serialize};

/// Who is writing. Captured while the session is in `Identify` and frozen
/// once the participant moves on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub participant_id: String,
    #[serde(default)]
    pub cohort: Option<String>,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        participant_id: impl Into<String>,
        cohort: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            participant_id: participant_id.into(),
            cohort,
        }
    }

    /// Cohort label, or an empty string when none was given.
    pub fn cohort_label(&self) -> &str {
        self.cohort.as_deref().unwrap_or("")
    }
}
