//! Field extractors: pure pattern rules that pull structured values out
//! of a raw utterance.
//!
//! Each extractor is an ordered rule list evaluated short-circuit, so
//! pattern priority and fallback order are explicit. Extractors are
//! independent; the same utterance can yield a date, an amount, a
//! merchant, and a description in one pass. Absence of a match is a
//! `None`, never an error.

mod amount;
mod date;
mod description;
mod merchant;
mod scan;

pub use amount::{extract_amount, parse_value as parse_amount_value, AmountMatch};
pub use date::extract_date;
pub use description::extract_description;
pub use merchant::extract_merchant;
