//! Conversation state: the expense draft, dialogue phases, transcript,
//! edit detection, and the pure per-turn logic.

mod context;
mod dialogue;
mod draft;
mod edit;
mod phase;
mod transcript;

pub use context::ConversationContext;
pub use dialogue::{
    apply_edit, attempt_category, attempt_payment_method, category_prompt, is_affirmation,
    missing_fields_prompt, summarize, CategoryResolution, EditOutcome,
};
pub use draft::{
    CategoryAssignment, DraftPatch, ExpenseDraft, ExpenseRecord, ExpenseSource,
    PaymentMethodAssignment, RequiredField,
};
pub use edit::{detect_edit, EditField, EditRequest};
pub use phase::ConversationPhase;
pub use transcript::{Speaker, Transcript, TranscriptEntry};
