//! In-memory expense store.
//!
//! Backs tests and demo surfaces. Supports queued failure injection so
//! persistence-failure handling can be exercised: a queued error is
//! returned once, then the store is healthy again.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::conversation::ExpenseRecord;
use crate::domain::foundation::ExpenseId;
use crate::ports::{ExpenseStore, StoreError};

/// Expense store holding records in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpenseStore {
    records: Arc<Mutex<Vec<(ExpenseId, ExpenseRecord)>>>,
    failures: Arc<Mutex<VecDeque<StoreError>>>,
}

impl InMemoryExpenseStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error to return on the next insert.
    pub fn fail_next(&self, error: StoreError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// All saved records, in insertion order.
    pub fn records(&self) -> Vec<(ExpenseId, ExpenseRecord)> {
        self.records.lock().unwrap().clone()
    }

    /// Number of saved records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ExpenseStore for InMemoryExpenseStore {
    async fn insert(&self, record: ExpenseRecord) -> Result<ExpenseId, StoreError> {
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        let id = ExpenseId::new();
        self.records.lock().unwrap().push((id, record));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{CategoryAssignment, ExpenseDraft, ExpenseSource};
    use crate::domain::foundation::{Amount, CategoryId};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn record() -> ExpenseRecord {
        let today = NaiveDate::from_ymd_opt(2025, 9, 29).unwrap();
        let mut draft = ExpenseDraft::new(ExpenseSource::Chat, today);
        draft.set_merchant("Aldi");
        draft.set_amount(Amount::new(Decimal::from(30), "USD").unwrap());
        draft.set_description("groceries");
        draft.assign_category(CategoryAssignment {
            id: CategoryId::new(),
            name: "Food & Dining".to_string(),
            confidence: None,
        });
        draft.finalize().unwrap()
    }

    #[tokio::test]
    async fn insert_stores_the_record() {
        let store = InMemoryExpenseStore::new();
        let id = store.insert(record()).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].0, id);
        assert_eq!(store.records()[0].1.merchant, "Aldi");
    }

    #[tokio::test]
    async fn queued_failure_is_returned_once() {
        let store = InMemoryExpenseStore::new();
        store.fail_next(StoreError::unavailable("db down"));

        assert!(store.insert(record()).await.is_err());
        assert!(store.is_empty());

        // Next insert succeeds
        assert!(store.insert(record()).await.is_ok());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn ids_are_unique_per_insert() {
        let store = InMemoryExpenseStore::new();
        let a = store.insert(record()).await.unwrap();
        let b = store.insert(record()).await.unwrap();
        assert_ne!(a, b);
    }
}
