//! Session orchestrator: the public-facing unit.
//!
//! Accepts one utterance at a time and drives the guard → state machine
//! → (save | re-prompt) sequence. All side effects live here: transcript
//! mutation, the persistence call, and the outcome reported to the
//! embedding UI. No error propagates out of `submit`; every failure
//! becomes a transcript message.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::guard::{Admission, SubmissionGuard};
use crate::application::machine::{ConversationMachine, TurnOutcome};
use crate::config::EngineConfig;
use crate::domain::conversation::{
    ConversationContext, ConversationPhase, ExpenseRecord, ExpenseSource, Speaker,
};
use crate::domain::foundation::{ExpenseId, Timestamp};
use crate::domain::taxonomy::TaxonomySnapshot;
use crate::ports::{ConversationAssistant, ExpenseClassifier, ExpenseStore};

/// What one call to [`SessionOrchestrator::submit`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The system replied; the conversation continues.
    Replied { reply: String },
    /// The expense was persisted; the context is reset for the next one.
    Saved { reply: String, expense_id: ExpenseId },
    /// Duplicate submission, silently absorbed. Nothing changed.
    Duplicate,
    /// The context was cancelled or recreated while the utterance was in
    /// flight; the result was discarded. Nothing changed.
    Discarded,
}

/// Public entry point for one chat session.
///
/// Owns the deduplication guard; the context is owned by the caller and
/// passed back in for each utterance.
pub struct SessionOrchestrator {
    machine: ConversationMachine,
    assistant: Arc<dyn ConversationAssistant>,
    classifier: Arc<dyn ExpenseClassifier>,
    store: Arc<dyn ExpenseStore>,
    guard: SubmissionGuard,
    assistant_enabled: bool,
}

impl SessionOrchestrator {
    /// Wires the orchestrator to its collaborators.
    pub fn new(
        assistant: Arc<dyn ConversationAssistant>,
        classifier: Arc<dyn ExpenseClassifier>,
        store: Arc<dyn ExpenseStore>,
        config: EngineConfig,
    ) -> Self {
        let machine = ConversationMachine::new(
            assistant.clone(),
            classifier.clone(),
            config.default_currency.clone(),
        );
        Self {
            machine,
            assistant,
            classifier,
            store,
            guard: SubmissionGuard::new(
                config.guard.trailing_window_secs,
                config.guard.eviction_horizon_secs,
            ),
            assistant_enabled: config.assistant_enabled,
        }
    }

    /// Starts a conversation over a taxonomy snapshot.
    ///
    /// Collaborator capability is probed exactly once here; the welcome
    /// wording tells the user which mode they are in.
    pub fn start(&self, taxonomy: TaxonomySnapshot, source: ExpenseSource) -> ConversationContext {
        let assistant_online = self.assistant_enabled && self.assistant.is_available();
        let smart_categories = self.classifier.is_available();
        let mut ctx = ConversationContext::new(taxonomy, source, Self::today(), assistant_online);

        let welcome = if assistant_online || smart_categories {
            "Hi! Tell me about an expense in your own words - for example, \
             \"I spent $25 at McDonald's yesterday for lunch\"."
        } else {
            "Hi! I'll walk you through logging an expense step by step. \
             Start with what you bought and how much it cost."
        };
        ctx.transcript_mut().append(Speaker::System, welcome);
        tracing::info!(
            conversation = %ctx.id(),
            assistant_online,
            "conversation started"
        );
        ctx
    }

    /// Processes one utterance through guard and state machine.
    pub async fn submit(
        &mut self,
        ctx: &mut ConversationContext,
        utterance: &str,
    ) -> SubmitOutcome {
        if utterance.trim().is_empty() {
            return SubmitOutcome::Replied {
                reply: "I didn't catch that - could you say it again?".to_string(),
            };
        }

        let key = match self.guard.admit(utterance) {
            Admission::Admitted(key) => key,
            Admission::Duplicate => {
                tracing::debug!(conversation = %ctx.id(), "duplicate submission absorbed");
                return SubmitOutcome::Duplicate;
            }
        };

        let generation = ctx.generation();
        let outcome = self.machine.handle(ctx, utterance, Self::today()).await;
        self.guard.complete(key);

        // A result observed under a stale generation is never applied to
        // a cancelled or recreated context.
        if !ctx.is_current(generation) {
            tracing::debug!(conversation = %ctx.id(), "stale result discarded");
            return SubmitOutcome::Discarded;
        }

        ctx.transcript_mut().append(Speaker::User, utterance);
        match outcome {
            TurnOutcome::Reply(reply) => {
                ctx.transcript_mut().append(Speaker::System, reply.clone());
                SubmitOutcome::Replied { reply }
            }
            TurnOutcome::Finalize(record) => self.save(ctx, record).await,
        }
    }

    /// Discards the conversation. Unconditional and immediate: any
    /// in-flight collaborator result becomes stale and will be dropped.
    pub fn cancel(&mut self, ctx: &mut ConversationContext) {
        ctx.invalidate();
        tracing::info!(conversation = %ctx.id(), "conversation cancelled");
    }

    async fn save(&self, ctx: &mut ConversationContext, record: ExpenseRecord) -> SubmitOutcome {
        let summary = format!(
            "{} - {} at {}",
            record.description, record.amount, record.merchant
        );
        match self.store.insert(record).await {
            Ok(expense_id) => {
                tracing::info!(conversation = %ctx.id(), %expense_id, "expense saved");
                ctx.reset_for_next_expense(Self::today());
                let reply = format!("Saved! {summary}. Ready for the next one whenever you are.");
                ctx.transcript_mut().append(Speaker::System, reply.clone());
                SubmitOutcome::Saved { reply, expense_id }
            }
            Err(error) => {
                tracing::warn!(conversation = %ctx.id(), error = %error, "expense save failed");
                // Draft retained; the user can say "yes" again to retry
                if let Err(transition) = ctx.set_phase(ConversationPhase::Confirming) {
                    tracing::warn!(error = %transition, "could not return to confirming");
                }
                let reply = format!(
                    "I couldn't save that ({error}). Your details are still here - \
                     say \"yes\" to try again, or tell me what to change."
                );
                ctx.transcript_mut().append(Speaker::System, reply.clone());
                SubmitOutcome::Replied { reply }
            }
        }
    }

    fn today() -> NaiveDate {
        Timestamp::now().date()
    }
}
