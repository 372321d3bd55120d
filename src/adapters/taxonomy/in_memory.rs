//! In-memory taxonomy source.
//!
//! Serves a fixed category and payment-method list for every workspace,
//! which is exactly the "consistent snapshot per conversation" contract
//! the port requires. Backs tests and demo surfaces.

use async_trait::async_trait;

use crate::domain::foundation::WorkspaceId;
use crate::domain::taxonomy::{Category, PaymentMethod, TaxonomySnapshot};
use crate::ports::{TaxonomyError, TaxonomySource};

/// Taxonomy source with fixed lists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaxonomySource {
    categories: Vec<Category>,
    payment_methods: Vec<PaymentMethod>,
}

impl InMemoryTaxonomySource {
    /// Creates a source serving the given lists.
    pub fn new(categories: Vec<Category>, payment_methods: Vec<PaymentMethod>) -> Self {
        Self {
            categories,
            payment_methods,
        }
    }

    /// A source pre-loaded with a typical consumer workspace taxonomy.
    pub fn with_defaults() -> Self {
        Self::new(
            vec![
                Category::named("Food & Dining"),
                Category::named("Transportation"),
                Category::named("Shopping"),
                Category::named("Entertainment"),
                Category::named("Utilities"),
                Category::named("Travel"),
                Category::named("Office Supplies"),
                Category::named("Other"),
            ],
            vec![
                PaymentMethod::named("Cash"),
                PaymentMethod::named("Credit Card"),
                PaymentMethod::named("Debit Card"),
            ],
        )
    }

    /// Builds the snapshot a conversation would capture.
    pub fn snapshot(&self) -> TaxonomySnapshot {
        TaxonomySnapshot::new(self.categories.clone(), self.payment_methods.clone())
    }
}

#[async_trait]
impl TaxonomySource for InMemoryTaxonomySource {
    async fn categories(&self, _workspace: &WorkspaceId) -> Result<Vec<Category>, TaxonomyError> {
        Ok(self.categories.clone())
    }

    async fn payment_methods(
        &self,
        _workspace: &WorkspaceId,
    ) -> Result<Vec<PaymentMethod>, TaxonomyError> {
        Ok(self.payment_methods.clone())
    }
}
