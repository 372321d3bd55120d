//! Merchant extraction from free-form utterances.
//!
//! Two rules, first match wins: text after a location preposition
//! ("at"/"from"/"to") up to the money part of the sentence, then the
//! clause before a spend verb ("cost $9" style phrasing).

use super::amount;
use super::date;
use super::scan::{self, Word};

const PREPOSITIONS: &[&str] = &["at", "from", "to"];
const SPEND_VERBS: &[&str] = &["cost", "costs", "paid", "spent", "was"];

/// Extracts a merchant name from the utterance, if one is present.
pub fn extract_merchant(text: &str) -> Option<String> {
    let words = scan::words(text);
    after_preposition(&words).or_else(|| clause_before_spend_verb(&words))
}

/// "at McDonald's for $12" -> "McDonald's".
fn after_preposition(words: &[Word<'_>]) -> Option<String> {
    let start = scan::find_any(words, PREPOSITIONS)?;
    let mut captured = Vec::new();
    for j in start + 1..words.len() {
        let word = &words[j];
        if word.is("for")
            || SPEND_VERBS.iter().any(|v| word.is(v))
            || amount::is_amount_marker(word, words.get(j + 1))
        {
            break;
        }
        captured.push(*word);
    }
    date::trim_trailing_date_phrase(&mut captured);
    join(&captured)
}

/// "Starbucks cost $8" -> "Starbucks"; also the clause before "for $...".
fn clause_before_spend_verb(words: &[Word<'_>]) -> Option<String> {
    let marker = words.iter().enumerate().position(|(j, word)| {
        if word.is("cost") || word.is("costs") {
            return true;
        }
        // "for $12" with no preposition earlier in the sentence
        word.is("for")
            && words
                .get(j + 1)
                .is_some_and(|n| amount::is_amount_marker(n, words.get(j + 2)))
    })?;
    let mut captured: Vec<Word<'_>> = words[..marker].to_vec();
    date::trim_trailing_date_phrase(&mut captured);
    join(&captured)
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
