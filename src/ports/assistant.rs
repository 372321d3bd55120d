//! Conversational-understanding port.
//!
//! Abstracts the collaborator that interprets an open-ended utterance in
//! the context of the running conversation and returns a reply, any
//! extracted fields, and a suggested next phase. The engine trusts the
//! suggested phase; when the collaborator is unavailable the engine's
//! own collecting loop and validation gate take over.

use async_trait::async_trait;

use crate::domain::conversation::{ConversationPhase, DraftPatch, ExpenseDraft};
use crate::domain::taxonomy::TaxonomySnapshot;

/// Port for the conversational-understanding collaborator.
#[async_trait]
pub trait ConversationAssistant: Send + Sync {
    /// Interprets one utterance against the running conversation.
    async fn process(
        &self,
        utterance: &str,
        context: AssistantContext<'_>,
    ) -> Result<AssistantReply, AssistantError>;

    /// Capability probe, read once at session start.
    fn is_available(&self) -> bool;
}

/// The conversation context shipped with each utterance.
#[derive(Debug, Clone, Copy)]
pub struct AssistantContext<'a> {
    /// The partial draft assembled so far.
    pub draft: &'a ExpenseDraft,
    /// The taxonomy the conversation resolves against.
    pub taxonomy: &'a TaxonomySnapshot,
    /// Recent user turns, oldest first.
    pub recent_turns: &'a [&'a str],
}

/// What the collaborator made of one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    /// Text to show the user.
    pub message: String,
    /// Fields extracted from the utterance, if any.
    pub extracted: DraftPatch,
    /// The phase the collaborator suggests moving to.
    pub next_phase: Option<ConversationPhase>,
    /// True once the collaborator considers the draft complete.
    pub is_complete: bool,
}

impl AssistantReply {
    /// Creates a plain reply with no extracted data.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: text.into(),
            extracted: DraftPatch::default(),
            next_phase: None,
            is_complete: false,
        }
    }

    /// Attaches extracted fields.
    pub fn with_extracted(mut self, patch: DraftPatch) -> Self {
        self.extracted = patch;
        self
    }

    /// Suggests the next phase.
    pub fn with_next_phase(mut self, phase: ConversationPhase) -> Self {
        self.next_phase = Some(phase);
        self
    }

    /// Marks the draft complete.
    pub fn completed(mut self) -> Self {
        self.is_complete = true;
        self
    }
}

/// Understanding collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Collaborator is not configured or not reachable.
    #[error("assistant unavailable: {message}")]
    Unavailable { message: String },

    /// Network failure mid-request.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator's response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AssistantError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
