//! Scripted classifier for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{Classification, ClassificationInput, ClassifierError, ExpenseClassifier};

/// Classifier double with queued outcomes and call tracking.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClassifier {
    outcomes: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    calls: Arc<Mutex<Vec<ClassificationInput>>>,
}

#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Outcome(Classification),
    Network(String),
}

impl ScriptedClassifier {
    /// Creates a classifier with an empty outcome queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a classification outcome.
    pub fn with_outcome(self, outcome: Classification) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Outcome(outcome));
        self
    }

    /// Queues a network error.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Network(message.into()));
        self
    }

    /// Inputs received so far, in order.
    pub fn calls(&self) -> Vec<ClassificationInput> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `categorize` invocations.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ExpenseClassifier for ScriptedClassifier {
    async fn categorize(
        &self,
        input: ClassificationInput,
    ) -> Result<Classification, ClassifierError> {
        self.calls.lock().unwrap().push(input);

        let next = self.outcomes.lock().unwrap().pop_front();
        match next {
            Some(ScriptedOutcome::Outcome(outcome)) => Ok(outcome),
            Some(ScriptedOutcome::Network(message)) => Err(ClassifierError::network(message)),
            None => Ok(Classification::Unavailable),
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Classifier that is not configured at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineClassifier;

#[async_trait]
impl ExpenseClassifier for OfflineClassifier {
    async fn categorize(
        &self,
        _input: ClassificationInput,
    ) -> Result<Classification, ClassifierError> {
        Ok(Classification::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CategorySuggestion;
    use chrono::NaiveDate;

    fn input() -> ClassificationInput {
        ClassificationInput {
            merchant: "McDonald's".to_string(),
            amount: None,
            description: "lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 29).unwrap(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn outcomes_are_consumed_in_order() {
        let classifier = ScriptedClassifier::new()
            .with_outcome(Classification::Suggestion(CategorySuggestion::new(
                "Food & Dining",
                0.9,
            )))
            .with_outcome(Classification::Unavailable);

        let first = classifier.categorize(input()).await.unwrap();
        assert!(matches!(first, Classification::Suggestion(_)));

        let second = classifier.categorize(input()).await.unwrap();
        assert_eq!(second, Classification::Unavailable);
    }

    #[tokio::test]
    async fn empty_queue_reports_unavailable() {
        let classifier = ScriptedClassifier::new();
        assert_eq!(
            classifier.categorize(input()).await.unwrap(),
            Classification::Unavailable
        );
    }

    #[tokio::test]
    async fn inputs_are_recorded() {
        let classifier = ScriptedClassifier::new();
        let _ = classifier.categorize(input()).await;
        assert_eq!(classifier.call_count(), 1);
        assert_eq!(classifier.calls()[0].merchant, "McDonald's");
    }

    #[tokio::test]
    async fn offline_classifier_is_unavailable_but_not_an_error() {
        let classifier = OfflineClassifier;
        assert!(!classifier.is_available());
        assert_eq!(
            classifier.categorize(input()).await.unwrap(),
            Classification::Unavailable
        );
    }
}
