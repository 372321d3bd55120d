//! Per-session conversation state.
//!
//! A context is owned by exactly one session. The taxonomy snapshot is
//! read-only for the context's lifetime; refreshing it requires starting
//! a new conversation. The generation counter is a liveness token:
//! results of collaborator calls observed under a stale generation must
//! be discarded, never applied.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::draft::{ExpenseDraft, ExpenseSource};
use crate::domain::conversation::phase::ConversationPhase;
use crate::domain::conversation::transcript::Transcript;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, StateMachine};
use crate::domain::taxonomy::TaxonomySnapshot;

/// The full state of one expense-entry conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    id: ConversationId,
    phase: ConversationPhase,
    transcript: Transcript,
    draft: ExpenseDraft,
    taxonomy: TaxonomySnapshot,
    generation: u64,
    assistant_online: bool,
}

impl ConversationContext {
    /// Creates a fresh context over a taxonomy snapshot.
    ///
    /// `assistant_online` records the collaborator capability detected at
    /// session start; it is not re-checked per utterance, so behavior
    /// stays consistent within one session.
    pub fn new(
        taxonomy: TaxonomySnapshot,
        source: ExpenseSource,
        today: NaiveDate,
        assistant_online: bool,
    ) -> Self {
        Self {
            id: ConversationId::new(),
            phase: ConversationPhase::Initial,
            transcript: Transcript::new(),
            draft: ExpenseDraft::new(source, today),
            taxonomy,
            generation: 0,
            assistant_online,
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ExpenseDraft {
        &mut self.draft
    }

    pub fn taxonomy(&self) -> &TaxonomySnapshot {
        &self.taxonomy
    }

    /// Splits the borrow so the draft can be mutated while resolving
    /// against the (read-only) taxonomy snapshot.
    pub fn draft_and_taxonomy(&mut self) -> (&mut ExpenseDraft, &TaxonomySnapshot) {
        (&mut self.draft, &self.taxonomy)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn assistant_online(&self) -> bool {
        self.assistant_online
    }

    // ─────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────

    /// Moves to a new phase, validating the transition.
    pub fn set_phase(&mut self, target: ConversationPhase) -> Result<(), DomainError> {
        self.phase = self
            .phase
            .transition_to(target)
            .map_err(|refusal| DomainError::new(ErrorCode::PhaseRefused, refusal.to_string()))?;
        Ok(())
    }

    /// Starts the next expense in the same session after a successful
    /// save: fresh draft, `Initial` phase, new generation. The transcript
    /// is retained so the chat reads as one continuous session.
    pub fn reset_for_next_expense(&mut self, today: NaiveDate) {
        self.draft = ExpenseDraft::new(self.draft.source(), today);
        self.phase = ConversationPhase::Initial;
        self.generation += 1;
    }

    /// Marks the context cancelled. Any in-flight collaborator result
    /// captured under an earlier generation must be discarded.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Returns true if a generation captured earlier is still current.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}
