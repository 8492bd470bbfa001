//! Phase enum representing the ordered stages of the writing protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

use super::catalog::{BRAINSTORM_DURATION_SECS, WRITING_TEST_DURATION_SECS};

/// The 9 stages a participant passes through, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Identify,
    Instructions,
    Brainstorm,
    PreTest,
    ModelReveal,
    Reflection,
    PostTest,
    Survey,
    Complete,
}

impl Phase {
    /// Returns all phases in protocol order.
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Identify,
            Phase::Instructions,
            Phase::Brainstorm,
            Phase::PreTest,
            Phase::ModelReveal,
            Phase::Reflection,
            Phase::PostTest,
            Phase::Survey,
            Phase::Complete,
        ]
    }

    /// Returns the 0-based index of this phase in protocol order.
    pub fn order_index(&self) -> usize {
        Self::all().iter().position(|p| p == self).unwrap_or(0)
    }

    /// Returns the next phase in order, if any.
    pub fn next(&self) -> Option<Phase> {
        Self::all().get(self.order_index() + 1).copied()
    }

    /// Fixed countdown length for phases that carry a timed window.
    pub fn window_duration_secs(&self) -> Option<u64> {
        match self {
            Phase::Brainstorm => Some(BRAINSTORM_DURATION_SECS),
            Phase::PreTest | Phase::PostTest => Some(WRITING_TEST_DURATION_SECS),
            _ => None,
        }
    }

    /// Returns true if this phase owns a countdown window.
    pub fn is_timed(&self) -> bool {
        self.window_duration_secs().is_some()
    }

    /// Pass-through phases advance on entry without a participant action.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Phase::ModelReveal)
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Identify => "Participant Details",
            Phase::Instructions => "Instructions",
            Phase::Brainstorm => "Brainstorming",
            Phase::PreTest => "Writing Pre-Test",
            Phase::ModelReveal => "Model Text",
            Phase::Reflection => "Reflection",
            Phase::PostTest => "Writing Post-Test",
            Phase::Survey => "Survey",
            Phase::Complete => "Complete",
        }
    }
}

impl StateMachine for Phase {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next() == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().collect()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_phases_in_protocol_order() {
        let all = Phase::all();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], Phase::Identify);
        assert_eq!(all[4], Phase::ModelReveal);
        assert_eq!(all[8], Phase::Complete);
    }

    #[test]
    fn order_index_matches_position() {
        for (idx, phase) in Phase::all().iter().enumerate() {
            assert_eq!(phase.order_index(), idx);
        }
    }

    #[test]
    fn next_walks_forward_and_stops_at_complete() {
        assert_eq!(Phase::Identify.next(), Some(Phase::Instructions));
        assert_eq!(Phase::PreTest.next(), Some(Phase::ModelReveal));
        assert_eq!(Phase::Survey.next(), Some(Phase::Complete));
        assert_eq!(Phase::Complete.next(), None);
    }

    #[test]
    fn only_forward_single_step_transitions_are_valid() {
        assert!(Phase::Brainstorm.can_transition_to(&Phase::PreTest));
        assert!(!Phase::Brainstorm.can_transition_to(&Phase::ModelReveal));
        assert!(!Phase::PreTest.can_transition_to(&Phase::Brainstorm));
        assert!(!Phase::Reflection.can_transition_to(&Phase::Reflection));
    }

    #[test]
    fn complete_is_the_only_terminal_phase() {
        for phase in Phase::all() {
            assert_eq!(phase.is_terminal(), *phase == Phase::Complete);
        }
    }

    #[test]
    fn timed_phases_carry_fixed_durations() {
        assert_eq!(Phase::Brainstorm.window_duration_secs(), Some(600));
        assert_eq!(Phase::PreTest.window_duration_secs(), Some(1800));
        assert_eq!(Phase::PostTest.window_duration_secs(), Some(1800));
        assert_eq!(Phase::Reflection.window_duration_secs(), None);
        assert!(!Phase::Survey.is_timed());
    }

    #[test]
    fn model_reveal_is_the_only_pass_through() {
        let pass_through: Vec<_> = Phase::all().iter().filter(|p| p.is_pass_through()).collect();
        assert_eq!(pass_through, vec![&Phase::ModelReveal]);
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(serde_json::to_string(&Phase::PreTest).unwrap(), "\"pre_test\"");
        let phase: Phase = serde_json::from_str("\"model_reveal\"").unwrap();
        assert_eq!(phase, Phase::ModelReveal);
    }

    #[test]
    fn display_uses_display_name() {
        assert_eq!(format!("{}", Phase::PostTest), "Writing Post-Test");
    }
}
