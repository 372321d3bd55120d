//! Taxonomy retrieval port.
//!
//! Supplies the category and payment-method lists for a workspace. A
//! conversation captures one snapshot at start and never refreshes it;
//! implementations must return a consistent snapshot per call.

use async_trait::async_trait;

use crate::domain::foundation::WorkspaceId;
use crate::domain::taxonomy::{Category, PaymentMethod, TaxonomySnapshot};

/// Port for the taxonomy provider.
#[async_trait]
pub trait TaxonomySource: Send + Sync {
    /// The workspace's categories, in display order.
    async fn categories(&self, workspace: &WorkspaceId) -> Result<Vec<Category>, TaxonomyError>;

    /// The workspace's payment methods, in display order.
    async fn payment_methods(
        &self,
        workspace: &WorkspaceId,
    ) -> Result<Vec<PaymentMethod>, TaxonomyError>;
}

/// Captures the snapshot a conversation resolves against for its whole
/// lifetime. Both lists come from the same provider call sequence, which
/// is where the "consistent snapshot" contract is honored.
pub async fn load_snapshot(
    source: &dyn TaxonomySource,
    workspace: &WorkspaceId,
) -> Result<TaxonomySnapshot, TaxonomyError> {
    let categories = source.categories(workspace).await?;
    let payment_methods = source.payment_methods(workspace).await?;
    Ok(TaxonomySnapshot::new(categories, payment_methods))
}

/// Taxonomy provider errors.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    /// The provider is not reachable.
    #[error("taxonomy source unavailable: {message}")]
    Unavailable { message: String },

    /// The workspace does not exist.
    #[error("unknown workspace: {workspace}")]
    UnknownWorkspace { workspace: WorkspaceId },
}

impl TaxonomyError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
