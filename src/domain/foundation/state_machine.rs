//! Validated transitions for lifecycle enums.

use super::ValidationError;

/// Gives a status enum a checked transition step.
///
/// The conversation phase implements this so an illegal move (say,
/// jumping from collecting straight to complete) is refused at the call
/// site that attempts it, instead of trusting every caller to know the
/// flow. The refusal message names the moves that would have been legal.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Whether this state may move directly to `target`.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one step from this one.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Moves to `target`, refusing transitions the flow does not allow.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            return Ok(target);
        }
        let allowed: Vec<String> = self
            .valid_transitions()
            .iter()
            .map(|state| format!("{state:?}"))
            .collect();
        let allowed = if allowed.is_empty() {
            "none".to_string()
        } else {
            allowed.join(", ")
        };
        Err(ValidationError::invalid_format(
            "phase",
            format!("{self:?} cannot move to {target:?} (allowed: {allowed})"),
        ))
    }
}
