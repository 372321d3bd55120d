//! Expense classification port.
//!
//! Abstracts the collaborator that, given merchant/amount/description,
//! suggests a category and payment method with a confidence score.
//! "Unavailable" is a valid, non-error outcome: the engine falls back to
//! manual category selection.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::Amount;

/// Port for the classification collaborator.
#[async_trait]
pub trait ExpenseClassifier: Send + Sync {
    /// Suggests a category for the expense described by the input.
    async fn categorize(&self, input: ClassificationInput) -> Result<Classification, ClassifierError>;

    /// Capability probe, read once at session start.
    fn is_available(&self) -> bool;
}

/// What the classifier gets to work with.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationInput {
    pub merchant: String,
    pub amount: Option<Amount>,
    pub description: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Outcome of a classification request.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The collaborator produced a suggestion.
    Suggestion(CategorySuggestion),
    /// The collaborator is not configured; not an error.
    Unavailable,
}

/// A suggested category with confidence in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySuggestion {
    pub category: String,
    pub confidence: f32,
    pub payment_method: Option<String>,
    pub reasoning: Option<String>,
}

impl CategorySuggestion {
    /// Creates a suggestion, clamping confidence into [0, 1].
    pub fn new(category: impl Into<String>, confidence: f32) -> Self {
        Self {
            category: category.into(),
            confidence: confidence.clamp(0.0, 1.0),
            payment_method: None,
            reasoning: None,
        }
    }

    /// Attaches a suggested payment method.
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Attaches the collaborator's reasoning.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

/// Classification collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Network failure mid-request.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator's response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// Rate limited by the collaborator.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },
}

impl ClassifierError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
