//! Pure dialogue logic: affirmation detection, draft summaries, targeted
//! prompts, category resolution policy, and single-field edit
//! application. The async collaborator calls live in the application
//! layer; everything here is deterministic.

use chrono::NaiveDate;

use crate::domain::conversation::draft::{
    CategoryAssignment, ExpenseDraft, PaymentMethodAssignment, RequiredField,
};
use crate::domain::conversation::edit::{EditField, EditRequest};
use crate::domain::extraction;
use crate::domain::foundation::Amount;
use crate::domain::taxonomy::{self, TaxonomySnapshot};

const AFFIRMATION_WORDS: &[&str] = &[
    "yes", "yeah", "yep", "yup", "y", "sure", "ok", "okay", "correct", "confirm", "confirmed",
    "right",
];

const AFFIRMATION_PHRASES: &[&str] = &[
    "looks good",
    "that's right",
    "thats right",
    "save it",
    "go ahead",
    "all good",
];

/// Returns true if the utterance affirms the summary.
pub fn is_affirmation(text: &str) -> bool {
    let normalized: String = text
        .trim()
        .to_lowercase()
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string();
    if AFFIRMATION_PHRASES.contains(&normalized.as_str()) {
        return true;
    }
    normalized
        .split_whitespace()
        .next()
        .is_some_and(|first| AFFIRMATION_WORDS.contains(&first.trim_matches(|c: char| c.is_ascii_punctuation())))
}

/// Renders the human-readable draft summary shown in `Confirming`.
pub fn summarize(draft: &ExpenseDraft) -> String {
    let mut lines = vec!["Here's what I have:".to_string()];
    if let Some(merchant) = draft.merchant() {
        lines.push(format!("- Merchant: {merchant}"));
    }
    if let Some(amount) = draft.amount() {
        lines.push(format!("- Amount: {amount}"));
    }
    if let Some(description) = draft.description() {
        lines.push(format!("- Description: {description}"));
    }
    lines.push(format!("- Date: {}", draft.date().format("%Y-%m-%d")));
    if let Some(category) = draft.category() {
        lines.push(format!("- Category: {}", category.name));
    }
    if let Some(method) = draft.payment_method() {
        lines.push(format!("- Payment method: {}", method.name));
    }
    if let Some(notes) = draft.notes() {
        lines.push(format!("- Notes: {notes}"));
    }
    lines.push("Reply \"yes\" to save, or tell me what to change.".to_string());
    lines.join("\n")
}

/// Builds the targeted prompt naming exactly the missing fields.
pub fn missing_fields_prompt(missing: &[RequiredField], snapshot: &TaxonomySnapshot) -> String {
    let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
    let question = match missing.first() {
        Some(RequiredField::Merchant) => "Where did you make this purchase?".to_string(),
        Some(RequiredField::Amount) => "How much did it cost?".to_string(),
        Some(RequiredField::Description) => "What did you buy?".to_string(),
        Some(RequiredField::Category) => category_prompt(snapshot),
        None => String::new(),
    };
    format!("I still need: {}. {}", names.join(", "), question)
}

/// The manual category-selection prompt, listing the workspace's names.
pub fn category_prompt(snapshot: &TaxonomySnapshot) -> String {
    let names: Vec<&str> = snapshot.categories().iter().map(|c| c.name.as_str()).collect();
    if names.is_empty() {
        "Which category should this go under?".to_string()
    } else {
        format!("Which category should this go under? Options: {}.", names.join(", "))
    }
}

/// Outcome of a category resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryResolution {
    /// The label matched a taxonomy entry.
    Resolved(CategoryAssignment),
    /// The label matched nothing; routed to the "Other" bucket.
    FellBackToOther(CategoryAssignment),
    /// No match and the workspace has no "Other" bucket.
    Unresolvable,
}

/// Resolves a candidate label with the "Other" fallback policy.
///
/// Resolution only ever yields entries from the snapshot, so draft
/// references cannot escape it.
pub fn attempt_category(
    label: &str,
    confidence: Option<f32>,
    snapshot: &TaxonomySnapshot,
) -> CategoryResolution {
    if let Some(entry) = taxonomy::resolve_category(label, snapshot) {
        return CategoryResolution::Resolved(CategoryAssignment {
            id: entry.id,
            name: entry.name.clone(),
            confidence,
        });
    }
    match snapshot.other_category() {
        Some(other) => CategoryResolution::FellBackToOther(CategoryAssignment {
            id: other.id,
            name: other.name.clone(),
            confidence: None,
        }),
        None => CategoryResolution::Unresolvable,
    }
}

/// Resolves a payment-method label; a miss simply leaves the field unset.
pub fn attempt_payment_method(
    label: &str,
    snapshot: &TaxonomySnapshot,
) -> Option<PaymentMethodAssignment> {
    taxonomy::resolve_payment_method(label, snapshot).map(|m| PaymentMethodAssignment {
        id: m.id,
        name: m.name.clone(),
    })
}

/// Result of applying a single-field edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The field was updated.
    Applied(EditField),
    /// The value could not be parsed; the message names the expected format.
    Rejected { field: EditField, message: String },
}

/// Applies a detected edit to the draft.
///
/// The value text is preferred; for date and amount the full utterance is
/// also consulted, since phrases like "change date to 3 days ago" parse
/// more reliably in context.
pub fn apply_edit(
    draft: &mut ExpenseDraft,
    snapshot: &TaxonomySnapshot,
    edit: &EditRequest,
    utterance: &str,
    today: NaiveDate,
    default_currency: &str,
) -> EditOutcome {
    let rejected = |field: EditField| EditOutcome::Rejected {
        field,
        message: format!(
            "I couldn't read that {}. Please give me {}.",
            field.label(),
            field.format_hint()
        ),
    };

    match edit.field {
        EditField::Date => {
            let parsed = extraction::extract_date(&edit.value, today)
                .or_else(|| extraction::extract_date(utterance, today));
            match parsed {
                Some(date) => {
                    draft.set_date(date);
                    EditOutcome::Applied(EditField::Date)
                }
                None => rejected(EditField::Date),
            }
        }
        EditField::Amount => {
            let parsed = extraction::parse_amount_value(&edit.value)
                .or_else(|| extraction::extract_amount(utterance));
            match parsed.and_then(|m| {
                Amount::new(m.value, m.currency.unwrap_or(default_currency)).ok()
            }) {
                Some(amount) => {
                    draft.set_amount(amount);
                    EditOutcome::Applied(EditField::Amount)
                }
                None => rejected(EditField::Amount),
            }
        }
        EditField::Merchant => {
            let value = non_blank(&edit.value)
                .or_else(|| extraction::extract_merchant(utterance));
            match value {
                Some(merchant) => {
                    draft.set_merchant(merchant);
                    EditOutcome::Applied(EditField::Merchant)
                }
                None => rejected(EditField::Merchant),
            }
        }
        EditField::Description => {
            let value = non_blank(&edit.value)
                .or_else(|| extraction::extract_description(utterance));
            match value {
                Some(description) => {
                    draft.set_description(description);
                    EditOutcome::Applied(EditField::Description)
                }
                None => rejected(EditField::Description),
            }
        }
        EditField::Category => match attempt_category(&edit.value, None, snapshot) {
            CategoryResolution::Resolved(assignment) => {
                draft.assign_category(assignment);
                EditOutcome::Applied(EditField::Category)
            }
            CategoryResolution::FellBackToOther(assignment) => {
                draft.add_note(format!("category: {}", edit.value.trim()));
                draft.assign_category(assignment);
                EditOutcome::Applied(EditField::Category)
            }
            CategoryResolution::Unresolvable => EditOutcome::Rejected {
                field: EditField::Category,
                message: category_prompt(snapshot),
            },
        },
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::draft::ExpenseSource;
    use crate::domain::taxonomy::{Category, PaymentMethod};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 29).unwrap()
    }

    fn snapshot() -> TaxonomySnapshot {
        TaxonomySnapshot::new(
            vec![
                Category::named("Food & Dining"),
                Category::named("Transportation"),
                Category::named("Other"),
            ],
            vec![PaymentMethod::named("Credit Card")],
        )
    }

    fn draft() -> ExpenseDraft {
        let mut d = ExpenseDraft::new(ExpenseSource::Chat, today());
        d.set_merchant("McDonald's");
        d.set_amount(Amount::new(Decimal::from(12), "USD").unwrap());
        d.set_description("lunch");
        d
    }

    mod affirmation {
        use super::*;

        #[test]
        fn single_word_affirmations_match() {
            for text in ["yes", "Yes", "yep", "y", "OK", "sure", "correct"] {
                assert!(is_affirmation(text), "{text} should affirm");
            }
        }

        #[test]
        fn phrases_match() {
            assert!(is_affirmation("looks good"));
            assert!(is_affirmation("yes, save it"));
            assert!(is_affirmation("Yes!"));
        }

        #[test]
        fn non_affirmations_do_not_match() {
            for text in ["no", "wait", "change the amount", "I spent $5", ""] {
                assert!(!is_affirmation(text), "{text} should not affirm");
            }
        }
    }

    mod summary {
        use super::*;

        #[test]
        fn summary_lists_all_set_fields() {
            let mut d = draft();
            d.assign_category(CategoryAssignment {
                id: snapshot().categories()[0].id,
                name: "Food & Dining".to_string(),
                confidence: Some(0.9),
            });
            let text = summarize(&d);
            assert!(text.contains("McDonald's"));
            assert!(text.contains("12 USD"));
            assert!(text.contains("lunch"));
            assert!(text.contains("2025-09-29"));
            assert!(text.contains("Food & Dining"));
            assert!(text.contains("\"yes\" to save"));
        }

        #[test]
        fn summary_omits_unset_optional_fields() {
            let text = summarize(&draft());
            assert!(!text.contains("Payment method"));
            assert!(!text.contains("Notes"));
        }
    }

    mod prompts {
        use super::*;

        #[test]
        fn missing_prompt_names_exactly_the_missing_fields() {
            let d = ExpenseDraft::new(ExpenseSource::Chat, today());
            let prompt = missing_fields_prompt(&d.missing_fields(), &snapshot());
            assert!(prompt.contains("merchant, amount, description, category"));
            assert!(prompt.contains("Where did you make this purchase?"));
        }

        #[test]
        fn category_prompt_lists_workspace_names() {
            let prompt = category_prompt(&snapshot());
            assert!(prompt.contains("Food & Dining"));
            assert!(prompt.contains("Transportation"));
        }
    }

    mod category_attempts {
        use super::*;

        #[test]
        fn resolvable_label_is_resolved_with_confidence() {
            let resolution = attempt_category("groceries", Some(0.8), &snapshot());
            match resolution {
                CategoryResolution::Resolved(a) => {
                    assert_eq!(a.name, "Food & Dining");
                    assert_eq!(a.confidence, Some(0.8));
                }
                other => panic!("expected resolution, got {other:?}"),
            }
        }

        #[test]
        fn unmatched_label_falls_back_to_other() {
            let resolution = attempt_category("llama grooming", None, &snapshot());
            match resolution {
                CategoryResolution::FellBackToOther(a) => assert_eq!(a.name, "Other"),
                other => panic!("expected fallback, got {other:?}"),
            }
        }

        #[test]
        fn unmatched_label_without_other_bucket_is_unresolvable() {
            let snapshot = TaxonomySnapshot::new(vec![Category::named("Travel")], vec![]);
            assert_eq!(
                attempt_category("llama grooming", None, &snapshot),
                CategoryResolution::Unresolvable
            );
        }
    }

    mod edits {
        use super::*;
        use crate::domain::conversation::edit::detect_edit;

        #[test]
        fn amount_edit_round_trip_preserves_other_fields() {
            let mut d = draft();
            let edit = detect_edit("change amount to $42").unwrap();
            let outcome = apply_edit(&mut d, &snapshot(), &edit, "change amount to $42", today(), "USD");

            assert_eq!(outcome, EditOutcome::Applied(EditField::Amount));
            assert_eq!(d.amount().unwrap().value(), Decimal::from(42));
            assert_eq!(d.merchant(), Some("McDonald's"));
            assert_eq!(d.description(), Some("lunch"));
        }

        #[test]
        fn date_edit_accepts_relative_phrases() {
            let mut d = draft();
            let edit = detect_edit("change date to yesterday").unwrap();
            apply_edit(&mut d, &snapshot(), &edit, "change date to yesterday", today(), "USD");
            assert_eq!(d.date(), NaiveDate::from_ymd_opt(2025, 9, 28).unwrap());
        }

        #[test]
        fn merchant_edit_uses_value_text() {
            let mut d = draft();
            let edit = detect_edit("merchant: Whole Foods Market").unwrap();
            apply_edit(&mut d, &snapshot(), &edit, "merchant: Whole Foods Market", today(), "USD");
            assert_eq!(d.merchant(), Some("Whole Foods Market"));
        }

        #[test]
        fn category_edit_resolves_through_variation_table() {
            let mut d = draft();
            let edit = detect_edit("change category to groceries").unwrap();
            let outcome =
                apply_edit(&mut d, &snapshot(), &edit, "change category to groceries", today(), "USD");
            assert_eq!(outcome, EditOutcome::Applied(EditField::Category));
            assert_eq!(d.category().unwrap().name, "Food & Dining");
        }

        #[test]
        fn category_edit_miss_falls_back_to_other_and_keeps_label() {
            let mut d = draft();
            let edit = detect_edit("change category to llama grooming").unwrap();
            apply_edit(&mut d, &snapshot(), &edit, "change category to llama grooming", today(), "USD");
            assert_eq!(d.category().unwrap().name, "Other");
            assert!(d.notes().unwrap().contains("llama grooming"));
        }

        #[test]
        fn unparseable_amount_is_rejected_with_format_hint() {
            let mut d = draft();
            let edit = detect_edit("change amount to a lot").unwrap();
            let outcome = apply_edit(&mut d, &snapshot(), &edit, "change amount to a lot", today(), "USD");
            match outcome {
                EditOutcome::Rejected { field, message } => {
                    assert_eq!(field, EditField::Amount);
                    assert!(message.contains("$42") || message.contains("amount"));
                }
                other => panic!("expected rejection, got {other:?}"),
            }
            // draft unchanged
            assert_eq!(d.amount().unwrap().value(), Decimal::from(12));
        }

        #[test]
        fn unparseable_date_is_rejected() {
            let mut d = draft();
            let edit = detect_edit("change date to someday").unwrap();
            let outcome = apply_edit(&mut d, &snapshot(), &edit, "change date to someday", today(), "USD");
            assert!(matches!(outcome, EditOutcome::Rejected { field: EditField::Date, .. }));
            assert_eq!(d.date(), today());
        }
    }
}
