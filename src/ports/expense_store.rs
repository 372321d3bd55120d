//! Persistence port for finalized expense records.
//!
//! The engine calls `insert` exactly once per finalized draft and never
//! retries automatically; on failure control returns to the confirmation
//! step with the draft intact, so the user can retry without re-entry.

use async_trait::async_trait;

use crate::domain::conversation::ExpenseRecord;
use crate::domain::foundation::ExpenseId;

/// Port for the record-insert collaborator.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Persists a finalized record, returning its assigned id.
    async fn insert(&self, record: ExpenseRecord) -> Result<ExpenseId, StoreError>;
}

/// Persistence collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store is not reachable.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    /// The store refused the record.
    #[error("record rejected: {reason}")]
    Rejected { reason: String },
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a rejected error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns true if retrying the same insert later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}
