//! The conversation state machine driver.
//!
//! Decides, per admitted utterance, whether to extract-and-advance,
//! apply a targeted field edit, request confirmation, or finalize. The
//! pure per-turn logic lives in `domain::conversation`; this driver adds
//! the collaborator calls (understanding and classification) and the
//! phase flow around them.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::conversation::{
    self, CategoryResolution, ConversationContext, ConversationPhase, DraftPatch, EditOutcome,
    ExpenseRecord,
};
use crate::domain::extraction;
use crate::domain::foundation::Amount;
use crate::ports::{
    AssistantContext, AssistantReply, Classification, ClassificationInput, ConversationAssistant,
    ExpenseClassifier,
};

/// What one processed utterance produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// A system reply; the conversation continues.
    Reply(String),
    /// The draft passed the validation gate; persist this record.
    Finalize(ExpenseRecord),
}

/// Drives the conversation phases for one utterance at a time.
pub struct ConversationMachine {
    assistant: Arc<dyn ConversationAssistant>,
    classifier: Arc<dyn ExpenseClassifier>,
    default_currency: String,
}

impl ConversationMachine {
    /// Creates a machine over the understanding and classification ports.
    pub fn new(
        assistant: Arc<dyn ConversationAssistant>,
        classifier: Arc<dyn ExpenseClassifier>,
        default_currency: impl Into<String>,
    ) -> Self {
        Self {
            assistant,
            classifier,
            default_currency: default_currency.into(),
        }
    }

    /// Processes one utterance against the context.
    ///
    /// Never fails: extraction misses, resolution misses, and
    /// collaborator errors all become user-facing reply text.
    pub async fn handle(
        &self,
        ctx: &mut ConversationContext,
        utterance: &str,
        today: NaiveDate,
    ) -> TurnOutcome {
        match ctx.phase() {
            ConversationPhase::Initial => {
                self.advance(ctx, ConversationPhase::Collecting);
                self.collect(ctx, utterance, today).await
            }
            ConversationPhase::Collecting => self.collect(ctx, utterance, today).await,
            ConversationPhase::Confirming | ConversationPhase::Editing => {
                self.confirm(ctx, utterance, today).await
            }
            // Transient phase; the orchestrator resets or reverts it
            // before the next submission under normal operation.
            ConversationPhase::Complete => {
                TurnOutcome::Reply("That expense is already saved.".to_string())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Collecting
    // ─────────────────────────────────────────────────────────────────

    async fn collect(
        &self,
        ctx: &mut ConversationContext,
        utterance: &str,
        today: NaiveDate,
    ) -> TurnOutcome {
        if ctx.assistant_online() {
            let result = {
                let turns = ctx.transcript().recent_user_turns(8);
                let assistant_ctx = AssistantContext {
                    draft: ctx.draft(),
                    taxonomy: ctx.taxonomy(),
                    recent_turns: &turns,
                };
                self.assistant.process(utterance, assistant_ctx).await
            };
            match result {
                Ok(reply) => return self.apply_assistant_reply(ctx, reply).await,
                Err(error) => {
                    tracing::warn!(error = %error, "assistant failed; using direct extraction");
                }
            }
        }
        self.collect_offline(ctx, utterance, today).await
    }

    /// Merges the understanding collaborator's reply, trusting its
    /// suggested phase where the transition is legal.
    async fn apply_assistant_reply(
        &self,
        ctx: &mut ConversationContext,
        reply: AssistantReply,
    ) -> TurnOutcome {
        ctx.draft_mut().apply(&reply.extracted);
        self.resolve_patch_labels(ctx, &reply.extracted);
        let manual_category = self.ensure_category(ctx).await;

        let target = reply
            .next_phase
            .or(reply.is_complete.then_some(ConversationPhase::Confirming));
        if let Some(phase) = target {
            // Only follow the suggestion once the gate would allow it
            if phase != ConversationPhase::Confirming || ctx.draft().is_ready() {
                self.advance(ctx, phase);
            }
        }
        if ctx.phase() == ConversationPhase::Collecting && ctx.draft().is_ready() {
            self.advance(ctx, ConversationPhase::Confirming);
        }

        let mut parts: Vec<String> = Vec::new();
        if !reply.message.trim().is_empty() {
            parts.push(reply.message.trim().to_string());
        }
        match ctx.phase() {
            ConversationPhase::Confirming => {
                parts.push(conversation::summarize(ctx.draft()));
            }
            _ => {
                if let Some(prompt) = manual_category {
                    parts.push(prompt);
                } else if parts.is_empty() {
                    parts.push(conversation::missing_fields_prompt(
                        &ctx.draft().missing_fields(),
                        ctx.taxonomy(),
                    ));
                }
            }
        }
        TurnOutcome::Reply(parts.join("\n\n"))
    }

    /// Deterministic path: run the direct extractors and drive the phase
    /// from the single validation function.
    async fn collect_offline(
        &self,
        ctx: &mut ConversationContext,
        utterance: &str,
        today: NaiveDate,
    ) -> TurnOutcome {
        let patch = self.extract_patch(utterance, today);
        let patch_was_empty = patch.is_empty();
        ctx.draft_mut().apply(&patch);

        // A reply that extracts nothing while only the category is
        // missing answers the category prompt.
        let only_category_missing = ctx.draft().missing_fields()
            == vec![conversation::RequiredField::Category];
        if patch_was_empty && only_category_missing {
            let (draft, taxonomy) = ctx.draft_and_taxonomy();
            match conversation::attempt_category(utterance, None, taxonomy) {
                CategoryResolution::Resolved(assignment) => draft.assign_category(assignment),
                CategoryResolution::FellBackToOther(assignment) => {
                    draft.add_note(format!("category: {}", utterance.trim()));
                    draft.assign_category(assignment);
                }
                CategoryResolution::Unresolvable => {
                    return TurnOutcome::Reply(conversation::category_prompt(ctx.taxonomy()));
                }
            }
        }

        let manual_category = self.ensure_category(ctx).await;

        if ctx.draft().is_ready() {
            self.advance(ctx, ConversationPhase::Confirming);
            return TurnOutcome::Reply(conversation::summarize(ctx.draft()));
        }
        if let Some(prompt) = manual_category {
            return TurnOutcome::Reply(prompt);
        }
        TurnOutcome::Reply(conversation::missing_fields_prompt(
            &ctx.draft().missing_fields(),
            ctx.taxonomy(),
        ))
    }

    /// Runs all four extractors over the utterance.
    fn extract_patch(&self, utterance: &str, today: NaiveDate) -> DraftPatch {
        let amount = extraction::extract_amount(utterance).and_then(|m| {
            Amount::new(m.value, m.currency.unwrap_or(&self.default_currency)).ok()
        });
        DraftPatch {
            merchant: extraction::extract_merchant(utterance),
            amount,
            date: extraction::extract_date(utterance, today),
            description: extraction::extract_description(utterance),
            ..Default::default()
        }
    }

    /// Resolves category/payment-method labels carried by a patch.
    fn resolve_patch_labels(&self, ctx: &mut ConversationContext, patch: &DraftPatch) {
        if let Some(label) = patch.category_label.as_deref().filter(|l| !l.trim().is_empty()) {
            let (draft, taxonomy) = ctx.draft_and_taxonomy();
            match conversation::attempt_category(label, None, taxonomy) {
                CategoryResolution::Resolved(assignment) => draft.assign_category(assignment),
                CategoryResolution::FellBackToOther(assignment) => {
                    draft.add_note(format!("category: {}", label.trim()));
                    draft.assign_category(assignment);
                }
                CategoryResolution::Unresolvable => {}
            }
        }
        if let Some(label) = patch
            .payment_method_label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
        {
            let (draft, taxonomy) = ctx.draft_and_taxonomy();
            if let Some(assignment) = conversation::attempt_payment_method(label, taxonomy) {
                draft.assign_payment_method(assignment);
            }
        }
    }

    /// Asks the classification collaborator for a category once the other
    /// required fields are in. Returns the manual-selection prompt when
    /// classification cannot help.
    async fn ensure_category(&self, ctx: &mut ConversationContext) -> Option<String> {
        let draft = ctx.draft();
        if draft.category().is_some() {
            return None;
        }
        let (Some(merchant), Some(amount), Some(description)) =
            (draft.merchant(), draft.amount(), draft.description())
        else {
            return None;
        };

        let input = ClassificationInput {
            merchant: merchant.to_string(),
            amount: Some(amount.clone()),
            description: description.to_string(),
            date: draft.date(),
            notes: draft.notes().map(str::to_string),
        };

        match self.classifier.categorize(input).await {
            Ok(Classification::Suggestion(suggestion)) => {
                let (draft, taxonomy) = ctx.draft_and_taxonomy();
                match conversation::attempt_category(
                    &suggestion.category,
                    Some(suggestion.confidence),
                    taxonomy,
                ) {
                    CategoryResolution::Resolved(assignment) => {
                        tracing::debug!(category = %assignment.name, "classifier category accepted");
                        draft.assign_category(assignment);
                    }
                    CategoryResolution::FellBackToOther(assignment) => {
                        draft.add_note(format!("category: {}", suggestion.category));
                        draft.assign_category(assignment);
                    }
                    CategoryResolution::Unresolvable => {
                        return Some(conversation::category_prompt(ctx.taxonomy()));
                    }
                }
                if let Some(method) = suggestion.payment_method.as_deref() {
                    let (draft, taxonomy) = ctx.draft_and_taxonomy();
                    if let Some(assignment) = conversation::attempt_payment_method(method, taxonomy)
                    {
                        draft.assign_payment_method(assignment);
                    }
                }
                None
            }
            Ok(Classification::Unavailable) => Some(conversation::category_prompt(ctx.taxonomy())),
            Err(error) => {
                tracing::warn!(error = %error, "classifier failed; falling back to manual choice");
                Some(conversation::category_prompt(ctx.taxonomy()))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Confirming / editing
    // ─────────────────────────────────────────────────────────────────

    async fn confirm(
        &self,
        ctx: &mut ConversationContext,
        utterance: &str,
        today: NaiveDate,
    ) -> TurnOutcome {
        if let Some(edit) = conversation::detect_edit(utterance) {
            if ctx.phase() == ConversationPhase::Confirming {
                self.advance(ctx, ConversationPhase::Editing);
            }
            let outcome = {
                let (draft, taxonomy) = ctx.draft_and_taxonomy();
                conversation::apply_edit(
                    draft,
                    taxonomy,
                    &edit,
                    utterance,
                    today,
                    &self.default_currency,
                )
            };
            self.advance(ctx, ConversationPhase::Confirming);
            return match outcome {
                EditOutcome::Applied(field) => {
                    tracing::debug!(field = field.label(), "field edit applied");
                    TurnOutcome::Reply(format!(
                        "Updated the {}.\n\n{}",
                        field.label(),
                        conversation::summarize(ctx.draft())
                    ))
                }
                EditOutcome::Rejected { message, .. } => TurnOutcome::Reply(message),
            };
        }

        if conversation::is_affirmation(utterance) {
            return match ctx.draft().finalize() {
                Ok(record) => {
                    self.advance(ctx, ConversationPhase::Complete);
                    TurnOutcome::Finalize(record)
                }
                // Unreachable when confirming was entered through the
                // gate, but defended: name exactly what is missing.
                Err(_) => TurnOutcome::Reply(conversation::missing_fields_prompt(
                    &ctx.draft().missing_fields(),
                    ctx.taxonomy(),
                )),
            };
        }

        TurnOutcome::Reply(conversation::summarize(ctx.draft()))
    }

    /// Phase transition that cannot fail by construction; a refused
    /// transition is a bug worth a log line, not a crash.
    fn advance(&self, ctx: &mut ConversationContext, target: ConversationPhase) {
        if ctx.phase() == target && target == ConversationPhase::Collecting {
            return; // collecting loops on itself without ceremony
        }
        let from = ctx.phase();
        if let Err(error) = ctx.set_phase(target) {
            tracing::warn!(?from, ?target, error = %error, "refused phase transition");
        } else {
            tracing::debug!(?from, ?target, "phase transition");
        }
    }
}
