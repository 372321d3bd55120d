//! Fuzzy resolution of free-text labels onto taxonomy entries.
//!
//! Categories resolve through three tiers evaluated in order, first
//! success wins: exact name match, bidirectional substring match, then a
//! fixed variation table of synonyms and merchant-brand hints. Payment
//! methods use only the first two tiers; their names are close enough to
//! canonical that a variation table would add nothing.
//!
//! The resolver only ever returns entries drawn from the snapshot it is
//! given, and never creates taxonomy entries. Fallback policy on a miss
//! (the "Other" bucket) belongs to the caller.

use once_cell::sync::Lazy;

use super::entry::{Category, PaymentMethod, TaxonomySnapshot};

/// Canonical category names mapped to the keywords that imply them.
///
/// Keyword containment is tested against the lower-cased candidate label.
static VARIATION_TABLE: Lazy<Vec<(&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            "Food & Dining",
            vec![
                "food", "dining", "meal", "restaurant", "lunch", "dinner", "breakfast", "snack",
                "coffee", "cafe", "pizza", "burger", "grocer", "supermarket", "mcdonald",
                "starbucks", "subway",
            ],
        ),
        (
            "Transportation",
            vec![
                "transport", "uber", "lyft", "taxi", "cab", "bus", "train", "fuel", "gas",
                "parking", "toll", "commute",
            ],
        ),
        (
            "Shopping",
            vec![
                "shopping", "clothes", "clothing", "apparel", "shoes", "amazon", "mall",
                "electronics",
            ],
        ),
        (
            "Entertainment",
            vec![
                "entertainment", "movie", "cinema", "netflix", "spotify", "concert", "game",
                "streaming",
            ],
        ),
        (
            "Utilities",
            vec![
                "utility", "utilities", "electric", "water bill", "internet", "phone bill",
                "broadband",
            ],
        ),
        (
            "Health & Fitness",
            vec![
                "health", "fitness", "gym", "doctor", "pharmacy", "medicine", "dental", "clinic",
            ],
        ),
        (
            "Travel",
            vec!["travel", "flight", "hotel", "airbnb", "vacation", "trip", "airline"],
        ),
        (
            "Office Supplies",
            vec!["office", "supplies", "stationery", "printer", "paper"],
        ),
        ("Other", vec!["other", "misc", "miscellaneous"]),
    ]
});

/// Resolves a free-text category label against the snapshot.
pub fn resolve_category<'a>(label: &str, snapshot: &'a TaxonomySnapshot) -> Option<&'a Category> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    exact_category(label, snapshot)
        .or_else(|| substring_category(label, snapshot))
        .or_else(|| variation_category(label, snapshot))
}

/// Resolves a free-text payment-method label against the snapshot.
pub fn resolve_payment_method<'a>(
    label: &str,
    snapshot: &'a TaxonomySnapshot,
) -> Option<&'a PaymentMethod> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    snapshot
        .payment_methods()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(label))
        .or_else(|| {
            let lower = label.to_lowercase();
            snapshot.payment_methods().iter().find(|p| {
                let name = p.name.to_lowercase();
                name.contains(&lower) || lower.contains(&name)
            })
        })
}

/// Tier 1: case-insensitive name equality.
fn exact_category<'a>(label: &str, snapshot: &'a TaxonomySnapshot) -> Option<&'a Category> {
    snapshot
        .categories()
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(label))
}

/// Tier 2: label contains, or is contained by, an entry name.
fn substring_category<'a>(label: &str, snapshot: &'a TaxonomySnapshot) -> Option<&'a Category> {
    let lower = label.to_lowercase();
    snapshot.categories().iter().find(|c| {
        let name = c.name.to_lowercase();
        name.contains(&lower) || lower.contains(&name)
    })
}

/// Tier 3: fixed synonym/keyword table onto canonical names.
fn variation_category<'a>(label: &str, snapshot: &'a TaxonomySnapshot) -> Option<&'a Category> {
    let lower = label.to_lowercase();
    VARIATION_TABLE.iter().find_map(|(canonical, keywords)| {
        keywords
            .iter()
            .any(|k| lower.contains(k))
            .then(|| snapshot.category_by_name(canonical))
            .flatten()
    })
}

/// The canonical name the variation table maps this label to, if any.
///
/// Shared with the keyword classifier so suggestion and resolution stay
/// consistent.
pub(crate) fn variation_canonical(label: &str) -> Option<&'static str> {
    let lower = label.to_lowercase();
    VARIATION_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(canonical, _)| *canonical)
}
