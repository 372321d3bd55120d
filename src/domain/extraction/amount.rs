//! Amount extraction from free-form utterances.
//!
//! Rules are evaluated in priority order, first match wins: a currency
//! symbol prefix, an ISO code prefix, a number followed by a currency
//! word, a number after a spend verb, then a number before "for"/"on".
//! Thousands separators are stripped before parsing.

use rust_decimal::Decimal;

use super::scan::{self, Word};

/// A successfully extracted amount with the currency the utterance named,
/// if any. Callers supply the workspace default when `currency` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountMatch {
    pub value: Decimal,
    pub currency: Option<&'static str>,
}

const SYMBOLS: &[(char, &str)] = &[
    ('$', "USD"),
    ('€', "EUR"),
    ('£', "GBP"),
    ('₹', "INR"),
    ('¥', "JPY"),
];

const ISO_CODES: &[&str] = &[
    "USD", "EUR", "GBP", "INR", "JPY", "AUD", "CAD", "CHF", "CNY", "NZD", "SGD",
];

const CURRENCY_WORDS: &[(&str, &str)] = &[
    ("dollars", "USD"),
    ("dollar", "USD"),
    ("bucks", "USD"),
    ("euros", "EUR"),
    ("euro", "EUR"),
    ("pounds", "GBP"),
    ("pound", "GBP"),
    ("quid", "GBP"),
    ("rupees", "INR"),
    ("rupee", "INR"),
    ("yen", "JPY"),
];

const SPEND_VERBS: &[&str] = &["cost", "costs", "paid", "spent", "was"];

type AmountRule = fn(&[Word<'_>]) -> Option<AmountMatch>;

/// Ordered rule list; earlier rules shadow later ones.
const RULES: &[AmountRule] = &[
    symbol_prefixed,
    iso_code_prefixed,
    number_then_currency_word,
    number_after_spend_verb,
    number_before_for_or_on,
];

/// Extracts a positive monetary amount from the utterance, if present.
pub fn extract_amount(text: &str) -> Option<AmountMatch> {
    let words = scan::words(text);
    RULES
        .iter()
        .find_map(|rule| rule(&words))
        .filter(|m| m.value > Decimal::ZERO)
}

/// Parses a standalone amount snippet ("42", "$42", "USD 42", "1,234.50").
///
/// Used when a field edit supplies the value directly, where the
/// utterance-level anchor words of [`extract_amount`] are absent.
pub fn parse_value(text: &str) -> Option<AmountMatch> {
    if let Some(m) = extract_amount(text) {
        return Some(m);
    }
    let words = scan::words(text);
    let first = words.first()?;
    symbol_value(first)
        .or_else(|| {
            scan::parse_number(first.core()).map(|value| AmountMatch {
                value,
                currency: None,
            })
        })
        .filter(|m| m.value > Decimal::ZERO)
}

/// Returns true if this token opens an amount ("$25", "25", "USD").
///
/// Used by the merchant/description extractors to stop a text capture
/// where the money part of the utterance begins.
pub(crate) fn is_amount_marker(word: &Word<'_>, next: Option<&Word<'_>>) -> bool {
    if symbol_value(word).is_some() || scan::is_number(word.core()) {
        return true;
    }
    is_iso_code(word) && next.is_some_and(|n| scan::is_number(n.core()))
}

fn is_iso_code(word: &Word<'_>) -> bool {
    ISO_CODES.iter().any(|c| word.is(c))
}

/// Parses "$25" / "€1,200.50" style tokens.
fn symbol_value(word: &Word<'_>) -> Option<AmountMatch> {
    let raw = word.core();
    let first = raw.chars().next()?;
    let (_, currency) = SYMBOLS.iter().find(|(sym, _)| *sym == first)?;
    let rest = &raw[first.len_utf8()..];
    let value = scan::parse_number(rest)?;
    Some(AmountMatch {
        value,
        currency: Some(currency),
    })
}

fn symbol_prefixed(words: &[Word<'_>]) -> Option<AmountMatch> {
    for (i, word) in words.iter().enumerate() {
        if let Some(m) = symbol_value(word) {
            return Some(m);
        }
        // Detached symbol: "$ 25"
        if let Some((_, currency)) = SYMBOLS
            .iter()
            .find(|(sym, _)| word.core().len() == sym.len_utf8() && word.core().starts_with(*sym))
        {
            if let Some(value) = words.get(i + 1).and_then(|w| scan::parse_number(w.core())) {
                return Some(AmountMatch {
                    value,
                    currency: Some(currency),
                });
            }
        }
    }
    None
}

/// "USD 1000", "eur 12.50".
fn iso_code_prefixed(words: &[Word<'_>]) -> Option<AmountMatch> {
    words.windows(2).find_map(|pair| {
        let code = ISO_CODES.iter().find(|c| pair[0].is(c))?;
        let value = scan::parse_number(pair[1].core())?;
        Some(AmountMatch {
            value,
            currency: Some(code),
        })
    })
}

/// "1000 dollars", "20 quid".
fn number_then_currency_word(words: &[Word<'_>]) -> Option<AmountMatch> {
    words.windows(2).find_map(|pair| {
        let value = scan::parse_number(pair[0].core())?;
        let (_, currency) = CURRENCY_WORDS
            .iter()
            .find(|(word, _)| pair[1].is(word))?;
        Some(AmountMatch {
            value,
            currency: Some(currency),
        })
    })
}

/// "cost 25", "paid me 25", "was about 25".
fn number_after_spend_verb(words: &[Word<'_>]) -> Option<AmountMatch> {
    const FILLERS: &[&str] = &["me", "us", "about", "around", "roughly"];
    for (i, word) in words.iter().enumerate() {
        if !SPEND_VERBS.iter().any(|v| word.is(v)) {
            continue;
        }
        let mut j = i + 1;
        if words.get(j).is_some_and(|w| FILLERS.iter().any(|f| w.is(f))) {
            j += 1;
        }
        if let Some(next) = words.get(j) {
            if let Some(m) = symbol_value(next) {
                return Some(m);
            }
            if let Some(value) = scan::parse_number(next.core()) {
                return Some(AmountMatch {
                    value,
                    currency: None,
                });
            }
        }
    }
    None
}

/// "25 for lunch", "12 on coffee".
fn number_before_for_or_on(words: &[Word<'_>]) -> Option<AmountMatch> {
    words.windows(2).find_map(|pair| {
        let value = scan::parse_number(pair[0].core())?;
        (pair[1].is("for") || pair[1].is("on")).then_some(AmountMatch {
            value,
            currency: None,
        })
    })
}
