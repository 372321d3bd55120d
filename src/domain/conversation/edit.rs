//! Edit-intent detection for targeted single-field updates.
//!
//! Two syntaxes are recognized: an edit verb ("change"/"edit"/"update")
//! combined with a field keyword anywhere after it, and a direct
//! `field: value` prefix.

/// The draft field an edit instruction names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    Date,
    Amount,
    Merchant,
    Description,
    Category,
}

impl EditField {
    /// User-facing name of the field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Merchant => "merchant",
            Self::Description => "description",
            Self::Category => "category",
        }
    }

    /// The format hint shown when a value for this field cannot be parsed.
    pub fn format_hint(&self) -> &'static str {
        match self {
            Self::Date => "a date like 2025-09-29, 29/09/2025, or \"yesterday\"",
            Self::Amount => "an amount like $42 or 42.50",
            Self::Merchant => "the merchant name, e.g. \"merchant: Starbucks\"",
            Self::Description => "a short description of the purchase",
            Self::Category => "one of your category names",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "date" | "day" => Some(Self::Date),
            "amount" | "price" | "cost" => Some(Self::Amount),
            "merchant" | "store" | "shop" => Some(Self::Merchant),
            "description" | "item" | "product" => Some(Self::Description),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}

/// A detected edit instruction: the field and the raw value text.
///
/// The value may be empty; callers surface a format hint in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub field: EditField,
    pub value: String,
}

const EDIT_VERBS: &[&str] = &["change", "edit", "update"];

/// Detects an edit instruction in the utterance, if present.
pub fn detect_edit(text: &str) -> Option<EditRequest> {
    prefix_syntax(text).or_else(|| verb_syntax(text))
}

/// "amount: 42" / "merchant: Starbucks".
fn prefix_syntax(text: &str) -> Option<EditRequest> {
    let (head, value) = text.split_once(':')?;
    let field = EditField::from_keyword(head.trim().to_lowercase().as_str())?;
    Some(EditRequest {
        field,
        value: value.trim().to_string(),
    })
}

/// "change the amount to $42" / "update merchant to Starbucks".
fn verb_syntax(text: &str) -> Option<EditRequest> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let lowered: Vec<String> = words.iter().map(|w| normalize(w)).collect();

    let verb_at = lowered.iter().position(|w| EDIT_VERBS.contains(&w.as_str()))?;
    let (offset, field) = lowered[verb_at + 1..]
        .iter()
        .enumerate()
        .find_map(|(i, w)| EditField::from_keyword(w).map(|f| (verb_at + 1 + i, f)))?;

    // Value text follows the field keyword, with a leading "to"/"is" dropped
    let mut rest = &words[offset + 1..];
    if rest
        .first()
        .is_some_and(|w| matches!(normalize(w).as_str(), "to" | "is"))
    {
        rest = &rest[1..];
    }
    Some(EditRequest {
        field,
        value: rest.join(" ").trim().to_string(),
    })
}

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}
