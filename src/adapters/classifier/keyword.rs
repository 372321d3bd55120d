//! Deterministic keyword classifier.
//!
//! Rule-based implementation of the classification port: matches the
//! expense description and merchant against the same keyword table the
//! category resolver uses, so a suggestion made here always resolves.
//! Useful as an offline fallback and in tests where a real model is
//! overkill.

use async_trait::async_trait;

use crate::domain::taxonomy::variation_canonical;
use crate::ports::{
    CategorySuggestion, Classification, ClassificationInput, ClassifierError, ExpenseClassifier,
};

/// Confidence reported for a description keyword hit.
const DESCRIPTION_CONFIDENCE: f32 = 0.7;
/// Confidence reported for a merchant keyword hit.
const MERCHANT_CONFIDENCE: f32 = 0.6;

/// Classifier driven by the fixed keyword table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExpenseClassifier for KeywordClassifier {
    async fn categorize(
        &self,
        input: ClassificationInput,
    ) -> Result<Classification, ClassifierError> {
        if let Some(canonical) = variation_canonical(&input.description) {
            return Ok(Classification::Suggestion(
                CategorySuggestion::new(canonical, DESCRIPTION_CONFIDENCE)
                    .with_reasoning(format!("description keyword match: {}", input.description)),
            ));
        }
        if let Some(canonical) = variation_canonical(&input.merchant) {
            return Ok(Classification::Suggestion(
                CategorySuggestion::new(canonical, MERCHANT_CONFIDENCE)
                    .with_reasoning(format!("merchant keyword match: {}", input.merchant)),
            ));
        }
        // Nothing matched; defer to manual selection
        Ok(Classification::Unavailable)
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn input(merchant: &str, description: &str) -> ClassificationInput {
        ClassificationInput {
            merchant: merchant.to_string(),
            amount: None,
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 29).unwrap(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn description_keyword_wins_with_higher_confidence() {
        let classifier = KeywordClassifier::new();
        let outcome = classifier
            .categorize(input("Some Shop", "team lunch"))
            .await
            .unwrap();

        match outcome {
            Classification::Suggestion(s) => {
                assert_eq!(s.category, "Food & Dining");
                assert_eq!(s.confidence, DESCRIPTION_CONFIDENCE);
            }
            other => panic!("expected suggestion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn merchant_keyword_is_the_fallback() {
        let classifier = KeywordClassifier::new();
        let outcome = classifier
            .categorize(input("Uber", "airport run"))
            .await
            .unwrap();

        match outcome {
            Classification::Suggestion(s) => {
                assert_eq!(s.category, "Transportation");
                assert_eq!(s.confidence, MERCHANT_CONFIDENCE);
            }
            other => panic!("expected suggestion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_keyword_match_defers_to_manual_selection() {
        let classifier = KeywordClassifier::new();
        let outcome = classifier
            .categorize(input("Acme Corp", "widget calibration"))
            .await
            .unwrap();
        assert_eq!(outcome, Classification::Unavailable);
    }
}
