//! The accumulating expense draft and the immutable record it finalizes
//! into.
//!
//! A single validation function backs both "is collecting done" and "may
//! finalize", so the two checks cannot drift apart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Amount, CategoryId, DomainError, ErrorCode, PaymentMethodId};

/// Provenance of the utterances driving a draft. Fixed for the draft's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseSource {
    Voice,
    Manual,
    #[default]
    Chat,
}

/// A category resolved against the conversation's taxonomy snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub id: CategoryId,
    pub name: String,
    /// Set only when the classification collaborator proposed the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// A payment method resolved against the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodAssignment {
    pub id: PaymentMethodId,
    pub name: String,
}

/// The fields a draft must carry before it can be finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Merchant,
    Amount,
    Description,
    Category,
}

impl RequiredField {
    /// User-facing name of the field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Merchant => "merchant",
            Self::Amount => "amount",
            Self::Description => "description",
            Self::Category => "category",
        }
    }
}

/// Partial fields extracted from one utterance, ready to merge into a
/// draft. Category and payment method arrive as free-text labels; the
/// conversation logic resolves them against the taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftPatch {
    pub merchant: Option<String>,
    pub amount: Option<Amount>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category_label: Option<String>,
    pub payment_method_label: Option<String>,
    pub notes: Option<String>,
}

impl DraftPatch {
    /// Returns true if the patch carries no usable field at all.
    pub fn is_empty(&self) -> bool {
        fn blank(s: &Option<String>) -> bool {
            s.as_deref().map_or(true, |v| v.trim().is_empty())
        }
        blank(&self.merchant)
            && self.amount.is_none()
            && self.date.is_none()
            && blank(&self.description)
            && blank(&self.category_label)
            && blank(&self.payment_method_label)
            && blank(&self.notes)
    }
}

/// The in-progress expense record for one conversation.
///
/// Mutated field-by-field by extraction and edit operations, then handed
/// to the persistence collaborator exactly once via [`finalize`].
///
/// [`finalize`]: ExpenseDraft::finalize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    date: NaiveDate,
    merchant: Option<String>,
    amount: Option<Amount>,
    description: Option<String>,
    category: Option<CategoryAssignment>,
    payment_method: Option<PaymentMethodAssignment>,
    notes: Option<String>,
    reimbursable: bool,
    source: ExpenseSource,
}

impl ExpenseDraft {
    /// Creates an empty draft dated today.
    pub fn new(source: ExpenseSource, today: NaiveDate) -> Self {
        Self {
            date: today,
            merchant: None,
            amount: None,
            description: None,
            category: None,
            payment_method: None,
            notes: None,
            reimbursable: false,
            source,
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn merchant(&self) -> Option<&str> {
        self.merchant.as_deref()
    }

    pub fn amount(&self) -> Option<&Amount> {
        self.amount.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&CategoryAssignment> {
        self.category.as_ref()
    }

    pub fn payment_method(&self) -> Option<&PaymentMethodAssignment> {
        self.payment_method.as_ref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_reimbursable(&self) -> bool {
        self.reimbursable
    }

    pub fn source(&self) -> ExpenseSource {
        self.source
    }

    // ─────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Sets the merchant; blank input is ignored.
    pub fn set_merchant(&mut self, merchant: impl Into<String>) {
        let merchant = merchant.into();
        if !merchant.trim().is_empty() {
            self.merchant = Some(merchant.trim().to_string());
        }
    }

    pub fn set_amount(&mut self, amount: Amount) {
        self.amount = Some(amount);
    }

    /// Sets the description; blank input is ignored.
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        if !description.trim().is_empty() {
            self.description = Some(description.trim().to_string());
        }
    }

    pub fn assign_category(&mut self, assignment: CategoryAssignment) {
        self.category = Some(assignment);
    }

    pub fn assign_payment_method(&mut self, assignment: PaymentMethodAssignment) {
        self.payment_method = Some(assignment);
    }

    pub fn set_reimbursable(&mut self, reimbursable: bool) {
        self.reimbursable = reimbursable;
    }

    /// Appends a note, joining with any existing note text.
    pub fn add_note(&mut self, note: impl Into<String>) {
        let note = note.into();
        if note.trim().is_empty() {
            return;
        }
        self.notes = Some(match self.notes.take() {
            Some(existing) => format!("{existing}; {}", note.trim()),
            None => note.trim().to_string(),
        });
    }

    /// Merges the raw fields of a patch into the draft.
    ///
    /// Non-empty patch values win; empty or absent values never erase an
    /// already-set field. Category and payment-method labels are not
    /// applied here, since they require taxonomy resolution.
    pub fn apply(&mut self, patch: &DraftPatch) {
        if let Some(merchant) = &patch.merchant {
            self.set_merchant(merchant.clone());
        }
        if let Some(amount) = &patch.amount {
            self.amount = Some(amount.clone());
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = &patch.description {
            self.set_description(description.clone());
        }
        if let Some(note) = &patch.notes {
            self.add_note(note.clone());
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────

    /// The required fields still missing from this draft.
    ///
    /// This single check backs both the collecting loop and the
    /// finalization gate.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.merchant.as_deref().map_or(true, |m| m.trim().is_empty()) {
            missing.push(RequiredField::Merchant);
        }
        if self.amount.is_none() {
            missing.push(RequiredField::Amount);
        }
        if self
            .description
            .as_deref()
            .map_or(true, |d| d.trim().is_empty())
        {
            missing.push(RequiredField::Description);
        }
        if self.category.is_none() {
            missing.push(RequiredField::Category);
        }
        missing
    }

    /// Returns true if every required field is present.
    pub fn is_ready(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Produces the immutable record for persistence.
    ///
    /// # Errors
    ///
    /// - `DraftIncomplete` naming the missing fields when the gate fails
    pub fn finalize(&self) -> Result<ExpenseRecord, DomainError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            return Err(
                DomainError::new(ErrorCode::DraftIncomplete, "Draft is missing required fields")
                    .with_detail("missing", names.join(", ")),
            );
        }
        Ok(ExpenseRecord {
            date: self.date,
            merchant: self.merchant.clone().unwrap_or_default(),
            amount: self.amount.clone().expect("checked by missing_fields"),
            description: self.description.clone().unwrap_or_default(),
            category: self.category.clone().expect("checked by missing_fields"),
            payment_method: self.payment_method.clone(),
            notes: self.notes.clone(),
            reimbursable: self.reimbursable,
            source: self.source,
        })
    }
}

/// A finalized, immutable expense ready for the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: Amount,
    pub description: String,
    pub category: CategoryAssignment,
    pub payment_method: Option<PaymentMethodAssignment>,
    pub notes: Option<String>,
    pub reimbursable: bool,
    pub source: ExpenseSource,
}
