//! Collaborator interfaces consumed by the engine.
//!
//! The engine is a library invoked by an interactive surface; everything
//! it does not own (understanding, classification, taxonomy retrieval,
//! persistence) lives behind these async traits.

mod assistant;
mod classifier;
mod expense_store;
mod taxonomy_source;

pub use assistant::{AssistantContext, AssistantError, AssistantReply, ConversationAssistant};
pub use classifier::{
    Classification, ClassificationInput, CategorySuggestion, ClassifierError, ExpenseClassifier,
};
pub use expense_store::{ExpenseStore, StoreError};
pub use taxonomy_source::{load_snapshot, TaxonomyError, TaxonomySource};
