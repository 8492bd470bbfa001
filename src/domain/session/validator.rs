//! Stateless completeness checks run before a transition or an append.
//!
//! Each check stops at the first failing field, so the returned error is
//! exactly the notice the participant should see.

use crate::domain::foundation::ValidationError;

use super::catalog::MAX_TEXT_CHARS;
use super::{CorrectionCode, Identity, ReflectionDraft};

fn require_filled(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::empty_field(field))
    } else {
        Ok(())
    }
}

/// Rejects text longer than one workbook cell can hold.
pub fn text_within_limit(field: &str, text: &str) -> Result<(), ValidationError> {
    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        Err(ValidationError::too_long(field, MAX_TEXT_CHARS, chars))
    } else {
        Ok(())
    }
}

/// Every identity value must fit in its export cell. Blank values pass here;
/// completeness is checked when leaving `Identify`.
pub fn identity_within_limits(identity: &Identity) -> Result<(), ValidationError> {
    text_within_limit("name", &identity.name)?;
    text_within_limit("participant_id", &identity.participant_id)?;
    text_within_limit("cohort", identity.cohort_label())
}

/// Identity is complete when name and participant id are non-blank, and the
/// cohort label too when the deployment requires it.
pub fn identity_complete(identity: &Identity, require_cohort: bool) -> Result<(), ValidationError> {
    require_filled("name", &identity.name)?;
    require_filled("participant_id", &identity.participant_id)?;
    if require_cohort {
        require_filled("cohort", identity.cohort_label())?;
    }
    Ok(())
}

/// A draft is complete when error, correction, and code are present and the
/// code is one of the known categories. Explanation is optional. No field
/// may exceed the cell limit.
pub fn reflection_entry_complete(draft: &ReflectionDraft) -> Result<CorrectionCode, ValidationError> {
    require_filled("error_text", &draft.error_text)?;
    require_filled("correction_text", &draft.correction_text)?;
    require_filled("code", &draft.code)?;
    text_within_limit("error_text", &draft.error_text)?;
    text_within_limit("correction_text", &draft.correction_text)?;
    text_within_limit("explanation", &draft.explanation)?;
    draft.code.parse()
}
