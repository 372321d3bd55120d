//! Description extraction from free-form utterances.
//!
//! Two rules, first match wins: text after a purchase verb
//! ("bought"/"purchased"/"paid for"/"got") up to a location or money
//! marker, then text after "for" up to "at" or end of string.

use super::amount;
use super::date;
use super::scan::{self, Word};

const PURCHASE_VERBS: &[&str] = &["bought", "purchased", "got"];

/// Extracts an expense description from the utterance, if one is present.
pub fn extract_description(text: &str) -> Option<String> {
    let words = scan::words(text);
    after_purchase_verb(&words).or_else(|| after_for(&words))
}

/// "bought lunch at McDonald's" -> "lunch".
fn after_purchase_verb(words: &[Word<'_>]) -> Option<String> {
    let start = verb_end(words)?;
    let mut captured = Vec::new();
    for j in start..words.len() {
        let word = &words[j];
        if word.is("at") || word.is("from") {
            break;
        }
        // "lunch for $12": the money part is not description text
        if word.is("for")
            && words
                .get(j + 1)
                .is_some_and(|n| amount::is_amount_marker(n, words.get(j + 2)))
        {
            break;
        }
        if amount::is_amount_marker(word, words.get(j + 1)) {
            break;
        }
        captured.push(*word);
    }
    date::trim_trailing_date_phrase(&mut captured);
    join(&captured)
}

/// Index just past the first purchase verb, treating "paid for" as one verb.
fn verb_end(words: &[Word<'_>]) -> Option<usize> {
    for (i, word) in words.iter().enumerate() {
        if PURCHASE_VERBS.iter().any(|v| word.is(v)) {
            return Some(i + 1);
        }
        if word.is("paid") && words.get(i + 1).is_some_and(|n| n.is("for")) {
            return Some(i + 2);
        }
    }
    None
}

/// "USD 1000 for office supplies" -> "office supplies".
fn after_for(words: &[Word<'_>]) -> Option<String> {
    for (i, word) in words.iter().enumerate() {
        if !word.is("for") {
            continue;
        }
        let mut captured = Vec::new();
        for j in i + 1..words.len() {
            if words[j].is("at") {
                break;
            }
            captured.push(words[j]);
        }
        // "for $12" is an amount, not a description
        if captured
            .first()
            .is_some_and(|w| amount::is_amount_marker(w, captured.get(1)))
        {
            continue;
        }
        date::trim_trailing_date_phrase(&mut captured);
        if let Some(text) = join(&captured) {
            return Some(text);
        }
    }
    None
}

fn join(words: &[Word<'_>]) -> Option<String> {
    let joined = words
        .iter()
        .map(|w| w.core())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.trim().is_empty()).then(|| joined.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_item_after_bought() {
        assert_eq!(
            extract_description("I bought lunch at McDonald's for $12"),
            Some("lunch".to_string())
        );
    }

    #[test]
    fn captures_item_after_purchased() {
        assert_eq!(
            extract_description("purchased a new keyboard from Best Buy"),
            Some("a new keyboard".to_string())
        );
    }

    #[test]
    fn captures_item_after_paid_for() {
        assert_eq!(
            extract_description("paid for parking at the airport"),
            Some("parking".to_string())
        );
    }

    #[test]
    fn captures_item_after_got() {
        assert_eq!(
            extract_description("got groceries from Aldi"),
            Some("groceries".to_string())
        );
    }

    #[test]
    fn stops_before_money_part() {
        assert_eq!(
            extract_description("bought office chairs for $300"),
            Some("office chairs".to_string())
        );
    }

    #[test]
    fn falls_back_to_text_after_for() {
        assert_eq!(
            extract_description("Paid USD 1000 for office supplies last week"),
            Some("office supplies".to_string())
        );
    }

    #[test]
    fn for_capture_stops_at_at() {
        assert_eq!(
            extract_description("$15 for a sandwich at the deli"),
            Some("a sandwich".to_string())
        );
    }

    #[test]
    fn for_followed_by_amount_is_skipped() {
        // the first "for" leads the amount; the description is elsewhere
        assert_eq!(extract_description("I paid a lot for $12"), None);
    }

    #[test]
    fn trailing_date_phrase_is_trimmed() {
        assert_eq!(
            extract_description("spent $20 for snacks yesterday"),
            Some("snacks".to_string())
        );
    }

    #[test]
    fn no_description_phrase_yields_none() {
        assert_eq!(extract_description("it was $25 at the store"), None);
    }
}
