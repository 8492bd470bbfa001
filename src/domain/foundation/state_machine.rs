//! State machine trait for forward-only lifecycle enums.
//!
//! The session phase order is expressed through this trait so the sequencer
//! can validate every transition against one table.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for Phase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         self.next() == Some(*target)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         self.next().into_iter().collect()
///     }
/// }
///
/// let next = Phase::Identify.transition_to(Phase::Instructions)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// The single successor of a linear state machine, if any.
    fn successor(&self) -> Option<Self> {
        match self.valid_transitions().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
