//! Taxonomy entries and the per-conversation snapshot.
//!
//! Categories and payment methods are supplied by an external source and
//! never mutated by the engine. A conversation captures one snapshot at
//! start and resolves against it for its whole lifetime, so draft
//! references always point into the snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, PaymentMethodId};

/// A category the workspace accepts for expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Unique within the workspace taxonomy.
    pub name: String,
    /// Display metadata, opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    /// Creates a category with a fresh id and no display metadata.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: None,
            color: None,
        }
    }
}

/// A payment method the workspace accepts for expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    /// Unique within the workspace taxonomy.
    pub name: String,
}

impl PaymentMethod {
    /// Creates a payment method with a fresh id.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: PaymentMethodId::new(),
            name: name.into(),
        }
    }
}

/// Read-only snapshot of the workspace taxonomy for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomySnapshot {
    categories: Vec<Category>,
    payment_methods: Vec<PaymentMethod>,
}

impl TaxonomySnapshot {
    /// Creates a snapshot from externally supplied lists, preserving order.
    pub fn new(categories: Vec<Category>, payment_methods: Vec<PaymentMethod>) -> Self {
        Self {
            categories,
            payment_methods,
        }
    }

    /// Categories in source order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Payment methods in source order.
    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    /// Looks up a category by id.
    pub fn category_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == *id)
    }

    /// Looks up a payment method by id.
    pub fn payment_method_by_id(&self, id: &PaymentMethodId) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|p| p.id == *id)
    }

    /// Looks up a category by case-insensitive name.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// The "Other" bucket used when resolution misses, if the workspace
    /// defines one.
    pub fn other_category(&self) -> Option<&Category> {
        self.category_by_name("Other")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TaxonomySnapshot {
        TaxonomySnapshot::new(
            vec![Category::named("Food & Dining"), Category::named("Other")],
            vec![PaymentMethod::named("Credit Card")],
        )
    }

    #[test]
    fn lookups_by_id_and_name_agree() {
        let snap = snapshot();
        let food = snap.category_by_name("food & dining").unwrap();
        assert_eq!(snap.category_by_id(&food.id), Some(food));
    }

    #[test]
    fn other_category_is_found_case_insensitively() {
        let snap = snapshot();
        assert_eq!(snap.other_category().unwrap().name, "Other");
    }

    #[test]
    fn missing_lookups_return_none() {
        let snap = snapshot();
        assert!(snap.category_by_name("Travel").is_none());
        assert!(snap.category_by_id(&CategoryId::new()).is_none());
    }

    #[test]
    fn order_is_preserved() {
        let snap = snapshot();
        assert_eq!(snap.categories()[0].name, "Food & Dining");
        assert_eq!(snap.payment_methods()[0].name, "Credit Card");
    }
}
