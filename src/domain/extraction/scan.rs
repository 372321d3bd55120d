//! Lexical helpers shared by the field extractors.
//!
//! The extractors work over a single word-token pass of the utterance
//! rather than a regex engine, so the rule priority and fallback order
//! stay explicit in code.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Punctuation trimmed from the edges of a word token.
///
/// Apostrophes are kept so merchant names like "McDonald's" survive intact.
const EDGE_PUNCT: &[char] = &[',', '.', '!', '?', ';', ':', '(', ')', '"'];

/// A whitespace-delimited token with its position in the utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Word<'a> {
    /// The raw token, punctuation included.
    pub raw: &'a str,
    /// Byte offset of the token start within the utterance.
    pub start: usize,
}

impl<'a> Word<'a> {
    /// Returns the token with edge punctuation trimmed.
    pub fn core(&self) -> &'a str {
        self.raw.trim_matches(EDGE_PUNCT)
    }

    /// Returns the trimmed token lower-cased.
    pub fn lower(&self) -> String {
        self.core().to_lowercase()
    }

    /// Case-insensitive comparison against a keyword.
    pub fn is(&self, keyword: &str) -> bool {
        self.core().eq_ignore_ascii_case(keyword)
    }
}

/// Splits an utterance into word tokens.
pub(crate) fn words(text: &str) -> Vec<Word<'_>> {
    let mut out = Vec::new();
    let mut offset = 0;
    for part in text.split_whitespace() {
        // split_whitespace drops offsets, so recover them by scanning forward
        let start = text[offset..]
            .find(part)
            .map(|p| offset + p)
            .unwrap_or(offset);
        offset = start + part.len();
        out.push(Word { raw: part, start });
    }
    out
}

/// Finds the first word equal (case-insensitively) to any of the keywords.
pub(crate) fn find_any(words: &[Word<'_>], keywords: &[&str]) -> Option<usize> {
    words
        .iter()
        .position(|w| keywords.iter().any(|k| w.is(k)))
}

/// Parses a numeric token, stripping thousands separators.
///
/// Accepts digits with optional `,` separators and at most one decimal
/// point. Anything else (letters, multiple dots, empty) is not a number.
pub(crate) fn parse_number(token: &str) -> Option<Decimal> {
    let token = token.trim_matches(EDGE_PUNCT);
    if token.is_empty() || !token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut dots = 0;
    for c in token.chars() {
        match c {
            '0'..='9' | ',' => {}
            '.' => dots += 1,
            _ => return None,
        }
    }
    if dots > 1 {
        return None;
    }
    let cleaned: String = token.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

/// Returns true if the token is a plain number (thousands separators allowed).
pub(crate) fn is_number(token: &str) -> bool {
    parse_number(token).is_some()
}

/// Parses a day token, stripping an ordinal suffix ("29th" -> 29).
pub(crate) fn parse_day(token: &str) -> Option<u32> {
    let token = token.trim_matches(EDGE_PUNCT);
    let digits = token
        .strip_suffix("st")
        .or_else(|| token.strip_suffix("nd"))
        .or_else(|| token.strip_suffix("rd"))
        .or_else(|| token.strip_suffix("th"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parses a 4-digit year token.
pub(crate) fn parse_year(token: &str) -> Option<i32> {
    let token = token.trim_matches(EDGE_PUNCT);
    if token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// Maps a month name or 3-letter abbreviation to its number.
pub(crate) fn month_from_name(token: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let lower = token.trim_matches(EDGE_PUNCT).to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == lower || (lower.len() >= 3 && m.starts_with(&lower)))
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_reports_offsets() {
        let ws = words("I spent $25 at  McDonald's");
        assert_eq!(ws[0].raw, "I");
        assert_eq!(ws[2].raw, "$25");
        assert_eq!(ws[4].raw, "McDonald's");
        assert_eq!(&"I spent $25 at  McDonald's"[ws[4].start..], "McDonald's");
    }

    #[test]
    fn core_trims_edge_punctuation_but_keeps_apostrophes() {
        let ws = words("McDonald's, (today)");
        assert_eq!(ws[0].core(), "McDonald's");
        assert_eq!(ws[1].core(), "today");
    }

    #[test]
    fn parse_number_strips_thousands_separators() {
        assert_eq!(parse_number("1,234.50"), Some(Decimal::from_str("1234.50").unwrap()));
        assert_eq!(parse_number("1000"), Some(Decimal::from_str("1000").unwrap()));
    }

    #[test]
    fn parse_number_rejects_words_and_double_dots() {
        assert_eq!(parse_number("twelve"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("$25"), None);
    }

    #[test]
    fn parse_day_strips_ordinals() {
        assert_eq!(parse_day("29th"), Some(29));
        assert_eq!(parse_day("1st"), Some(1));
        assert_eq!(parse_day("2nd,"), Some(2));
        assert_eq!(parse_day("3rd"), Some(3));
        assert_eq!(parse_day("third"), None);
    }

    #[test]
    fn parse_year_requires_four_digits() {
        assert_eq!(parse_year("2025"), Some(2025));
        assert_eq!(parse_year("25"), None);
        assert_eq!(parse_year("20251"), None);
    }

    #[test]
    fn month_from_name_accepts_full_and_abbreviated() {
        assert_eq!(month_from_name("Sep"), Some(9));
        assert_eq!(month_from_name("september"), Some(9));
        assert_eq!(month_from_name("Sept"), Some(9));
        assert_eq!(month_from_name("May"), Some(5));
        assert_eq!(month_from_name("Ma"), None);
        assert_eq!(month_from_name("notamonth"), None);
    }

    #[test]
    fn find_any_is_case_insensitive() {
        let ws = words("Paid USD 1000 For supplies");
        assert_eq!(find_any(&ws, &["for"]), Some(3));
        assert_eq!(find_any(&ws, &["at", "from"]), None);
    }
}
