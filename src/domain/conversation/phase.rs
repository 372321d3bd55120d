//! Conversation phase state machine.
//!
//! Phases track where the dialogue is in assembling one expense:
//! `Initial → Collecting → Confirming → Editing → Complete`, with
//! `Editing` always returning to `Confirming`, `Collecting` able to loop
//! on itself, and `Complete` either resetting for the next expense or
//! falling back to `Confirming` when the save fails.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The dialogue's position in assembling one expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    /// No draft fields populated; the first utterance doubles as the
    /// first extraction pass.
    #[default]
    Initial,

    /// Gathering required fields from utterances.
    Collecting,

    /// All fields present; awaiting a yes or an edit instruction.
    Confirming,

    /// Applying a single-field targeted update.
    Editing,

    /// Draft validated and handed to persistence.
    Complete,
}

impl ConversationPhase {
    /// Returns a short label for the phase, suitable for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "Starting",
            Self::Collecting => "Collecting details",
            Self::Confirming => "Confirming",
            Self::Editing => "Editing",
            Self::Complete => "Done",
        }
    }

    /// Returns true if the phase is still gathering required fields.
    pub fn is_gathering(&self) -> bool {
        matches!(self, Self::Initial | Self::Collecting)
    }

    /// Returns true if user input drives this phase forward.
    pub fn accepts_user_input(&self) -> bool {
        !matches!(self, Self::Complete)
    }
}

impl StateMachine for ConversationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationPhase::*;
        matches!(
            (self, target),
            // First utterance starts the extraction pass
            (Initial, Collecting) |
            // Keep collecting while required fields are missing
            (Collecting, Collecting) |
            // Everything present, resolution attempted
            (Collecting, Confirming) |
            // Targeted single-field update
            (Confirming, Editing) |
            // Edits always land back on the summary
            (Editing, Confirming) |
            // Affirmation passes the validation gate
            (Confirming, Complete) |
            // Persistence failed; draft retained for retry
            (Complete, Confirming) |
            // Saved; fresh draft for the next expense
            (Complete, Initial)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationPhase::*;
        match self {
            Initial => vec![Collecting],
            Collecting => vec![Collecting, Confirming],
            Confirming => vec![Editing, Complete],
            Editing => vec![Confirming],
            Complete => vec![Confirming, Initial],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basics {
        use super::*;

        #[test]
        fn default_phase_is_initial() {
            assert_eq!(ConversationPhase::default(), ConversationPhase::Initial);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&ConversationPhase::Collecting).unwrap();
            assert_eq!(json, "\"collecting\"");
        }

        #[test]
        fn deserializes_from_snake_case() {
            let phase: ConversationPhase = serde_json::from_str("\"confirming\"").unwrap();
            assert_eq!(phase, ConversationPhase::Confirming);
        }

        #[test]
        fn all_phases_have_labels() {
            for phase in [
                ConversationPhase::Initial,
                ConversationPhase::Collecting,
                ConversationPhase::Confirming,
                ConversationPhase::Editing,
                ConversationPhase::Complete,
            ] {
                assert!(!phase.label().is_empty());
            }
        }
    }

    mod predicates {
        use super::*;

        #[test]
        fn initial_and_collecting_are_gathering() {
            assert!(ConversationPhase::Initial.is_gathering());
            assert!(ConversationPhase::Collecting.is_gathering());
            assert!(!ConversationPhase::Confirming.is_gathering());
        }

        #[test]
        fn complete_does_not_accept_input() {
            assert!(!ConversationPhase::Complete.accepts_user_input());
            assert!(ConversationPhase::Confirming.accepts_user_input());
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn initial_only_moves_to_collecting() {
            let phase = ConversationPhase::Initial;
            assert_eq!(phase.valid_transitions(), vec![ConversationPhase::Collecting]);
            assert!(!phase.can_transition_to(&ConversationPhase::Complete));
        }

        #[test]
        fn collecting_can_loop_on_itself() {
            let phase = ConversationPhase::Collecting;
            assert!(phase.can_transition_to(&ConversationPhase::Collecting));
            assert!(phase.can_transition_to(&ConversationPhase::Confirming));
        }

        #[test]
        fn collecting_cannot_skip_to_complete() {
            assert!(!ConversationPhase::Collecting.can_transition_to(&ConversationPhase::Complete));
        }

        #[test]
        fn editing_always_returns_to_confirming() {
            let phase = ConversationPhase::Editing;
            assert_eq!(phase.valid_transitions(), vec![ConversationPhase::Confirming]);
        }

        #[test]
        fn complete_falls_back_to_confirming_on_save_failure() {
            assert!(ConversationPhase::Complete.can_transition_to(&ConversationPhase::Confirming));
        }

        #[test]
        fn complete_resets_to_initial_after_save() {
            assert!(ConversationPhase::Complete.can_transition_to(&ConversationPhase::Initial));
        }

        #[test]
        fn transition_to_rejects_invalid_moves() {
            let result = ConversationPhase::Initial.transition_to(ConversationPhase::Editing);
            assert!(result.is_err());
        }

        #[test]
        fn valid_transitions_matches_can_transition_to() {
            for phase in [
                ConversationPhase::Initial,
                ConversationPhase::Collecting,
                ConversationPhase::Confirming,
                ConversationPhase::Editing,
                ConversationPhase::Complete,
            ] {
                for target in phase.valid_transitions() {
                    assert!(
                        phase.can_transition_to(&target),
                        "can_transition_to should return true for {:?} -> {:?}",
                        phase,
                        target
                    );
                }
            }
        }
    }
}
