//! Date extraction from free-form utterances.
//!
//! Rules are evaluated in priority order, first match wins: relative
//! phrases before absolute formats, and among absolute formats
//! day-month-name, month-name-day, day-first numeric, then ISO. Every
//! candidate is validated by constructing a real calendar date; an
//! impossible date (e.g. 31 Feb) is a miss for that rule, never clamped.

use chrono::{Days, NaiveDate};

use super::scan::{self, Word};

type DateRule = fn(&[Word<'_>], NaiveDate) -> Option<NaiveDate>;

/// Ordered rule list; earlier rules shadow later ones.
const RULES: &[DateRule] = &[
    relative_today,
    relative_yesterday,
    relative_days_ago,
    relative_last_week,
    day_month_name_year,
    month_name_day_year,
    numeric_day_first,
    numeric_iso,
];

/// Extracts a calendar date from the utterance, if one is present.
///
/// `today` anchors the relative phrases and supplies the year when an
/// absolute format omits it.
pub fn extract_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let words = scan::words(text);
    RULES.iter().find_map(|rule| rule(&words, today))
}

fn relative_today(words: &[Word<'_>], today: NaiveDate) -> Option<NaiveDate> {
    scan::find_any(words, &["today"]).map(|_| today)
}

fn relative_yesterday(words: &[Word<'_>], today: NaiveDate) -> Option<NaiveDate> {
    scan::find_any(words, &["yesterday"]).and_then(|_| today.checked_sub_days(Days::new(1)))
}

fn relative_days_ago(words: &[Word<'_>], today: NaiveDate) -> Option<NaiveDate> {
    let ago = scan::find_any(words, &["ago"])?;
    if ago < 2 {
        return None;
    }
    let unit = &words[ago - 1];
    if !unit.is("days") && !unit.is("day") {
        return None;
    }
    let n: u64 = words[ago - 2].core().parse().ok()?;
    today.checked_sub_days(Days::new(n))
}

fn relative_last_week(words: &[Word<'_>], today: NaiveDate) -> Option<NaiveDate> {
    words
        .windows(2)
        .any(|pair| pair[0].is("last") && pair[1].is("week"))
        .then(|| today.checked_sub_days(Days::new(7)))
        .flatten()
}

/// "29th Sep 2025", "29 September" (year defaults to the current one).
fn day_month_name_year(words: &[Word<'_>], today: NaiveDate) -> Option<NaiveDate> {
    for (i, word) in words.iter().enumerate() {
        let Some(day) = scan::parse_day(word.core()) else {
            continue;
        };
        let Some(month) = words.get(i + 1).and_then(|w| scan::month_from_name(w.core())) else {
            continue;
        };
        let year = words
            .get(i + 2)
            .and_then(|w| scan::parse_year(w.core()))
            .unwrap_or_else(|| chrono::Datelike::year(&today));
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

/// "Sep 29 2025", "September 29, 2025", "Sep 29" (year defaults).
fn month_name_day_year(words: &[Word<'_>], today: NaiveDate) -> Option<NaiveDate> {
    for (i, word) in words.iter().enumerate() {
        let Some(month) = scan::month_from_name(word.core()) else {
            continue;
        };
        let Some(day) = words.get(i + 1).and_then(|w| scan::parse_day(w.core())) else {
            continue;
        };
        let year = words
            .get(i + 2)
            .and_then(|w| scan::parse_year(w.core()))
            .unwrap_or_else(|| chrono::Datelike::year(&today));
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

/// DD/MM/YYYY or DD-MM-YYYY. Day-first; no locale inference is attempted.
fn numeric_day_first(words: &[Word<'_>], _today: NaiveDate) -> Option<NaiveDate> {
    words
        .iter()
        .find_map(|w| split_numeric(w.core()).and_then(|[d, m, y]| build(y, m, d)))
}

/// ISO YYYY-MM-DD.
fn numeric_iso(words: &[Word<'_>], _today: NaiveDate) -> Option<NaiveDate> {
    words
        .iter()
        .find_map(|w| split_numeric(w.core()).and_then(|[y, m, d]| build(y, m, d)))
}

/// Drops a trailing relative-date phrase ("today", "yesterday",
/// "last week", "3 days ago") from a captured word run, so date words
/// do not leak into merchant or description text.
pub(crate) fn trim_trailing_date_phrase(words: &mut Vec<Word<'_>>) {
    loop {
        let n = words.len();
        if n >= 1 && (words[n - 1].is("today") || words[n - 1].is("yesterday")) {
            words.pop();
            continue;
        }
        if n >= 2 && words[n - 2].is("last") && words[n - 1].is("week") {
            words.truncate(n - 2);
            continue;
        }
        if n >= 3
            && words[n - 1].is("ago")
            && (words[n - 2].is("days") || words[n - 2].is("day"))
            && words[n - 3].core().parse::<u64>().is_ok()
        {
            words.truncate(n - 3);
            continue;
        }
        break;
    }
}

/// Splits a token on a consistent `/` or `-` separator into three
/// numeric parts, returned in token order.
fn split_numeric(token: &str) -> Option<[&str; 3]> {
    let sep = if token.contains('/') {
        '/'
    } else if token.contains('-') {
        '-'
    } else {
        return None;
    };
    let mut parts = token.split(sep);
    let a = parts.next()?;
    let b = parts.next()?;
    let c = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    for p in [a, b, c] {
        if p.is_empty() || !p.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
    }
    Some([a, b, c])
}

/// Validates a (4-digit-year, month, day) triple into a real date.
fn build(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = scan::parse_year(year)?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod relative {
        use super::*;

        #[test]
        fn today_maps_to_anchor_date() {
            let today = date(2025, 9, 29);
            assert_eq!(extract_date("I spent $5 today", today), Some(today));
        }

        #[test]
        fn yesterday_subtracts_one_day() {
            let today = date(2025, 9, 29);
            assert_eq!(extract_date("lunch yesterday", today), Some(date(2025, 9, 28)));
        }

        #[test]
        fn yesterday_crosses_month_boundary() {
            let today = date(2025, 10, 1);
            assert_eq!(extract_date("coffee yesterday", today), Some(date(2025, 9, 30)));
        }

        #[test]
        fn yesterday_crosses_year_boundary() {
            let today = date(2026, 1, 1);
            assert_eq!(extract_date("dinner yesterday", today), Some(date(2025, 12, 31)));
        }

        #[test]
        fn n_days_ago_subtracts_n() {
            let today = date(2025, 9, 29);
            assert_eq!(extract_date("paid 3 days ago", today), Some(date(2025, 9, 26)));
        }

        #[test]
        fn one_day_ago_accepts_singular_unit() {
            let today = date(2025, 9, 29);
            assert_eq!(extract_date("1 day ago", today), Some(date(2025, 9, 28)));
        }

        #[test]
        fn last_week_subtracts_seven_days() {
            let today = date(2025, 9, 29);
            assert_eq!(extract_date("groceries last week", today), Some(date(2025, 9, 22)));
        }

        #[test]
        fn relative_wins_over_absolute() {
            // "today" outranks the ISO token per rule priority
            let today = date(2025, 9, 29);
            assert_eq!(
                extract_date("today, not 2024-01-15", today),
                Some(today)
            );
        }
    }

    mod absolute {
        use super::*;

        #[test]
        fn day_month_name_year_parses() {
            let today = date(2025, 1, 1);
            assert_eq!(
                extract_date("bought it on 29th Sep 2025", today),
                Some(date(2025, 9, 29))
            );
        }

        #[test]
        fn day_month_name_defaults_year() {
            let today = date(2025, 1, 1);
            assert_eq!(extract_date("on 14 February", today), Some(date(2025, 2, 14)));
        }

        #[test]
        fn month_name_day_year_parses() {
            let today = date(2025, 1, 1);
            assert_eq!(
                extract_date("on Sep 29 2025 I paid", today),
                Some(date(2025, 9, 29))
            );
        }

        #[test]
        fn month_name_day_with_comma_parses() {
            let today = date(2025, 1, 1);
            assert_eq!(
                extract_date("September 29, 2025", today),
                Some(date(2025, 9, 29))
            );
        }

        #[test]
        fn slash_numeric_is_day_first() {
            let today = date(2025, 1, 1);
            assert_eq!(extract_date("on 03/04/2025", today), Some(date(2025, 4, 3)));
        }

        #[test]
        fn dash_numeric_is_day_first() {
            let today = date(2025, 1, 1);
            assert_eq!(extract_date("on 29-09-2025", today), Some(date(2025, 9, 29)));
        }

        #[test]
        fn iso_parses_when_day_first_cannot() {
            // 2025 is not a valid day, so the day-first rule misses and
            // the ISO rule picks it up.
            let today = date(2024, 1, 1);
            assert_eq!(extract_date("on 2025-09-29", today), Some(date(2025, 9, 29)));
        }

        #[test]
        fn impossible_date_is_not_found_rather_than_clamped() {
            let today = date(2025, 1, 1);
            assert_eq!(extract_date("on 31/02/2025", today), None);
            assert_eq!(extract_date("on 31st Sep 2025", today), None);
        }

        #[test]
        fn two_digit_years_are_rejected() {
            let today = date(2025, 1, 1);
            assert_eq!(extract_date("on 03/04/25", today), None);
        }
    }

    #[test]
    fn no_date_phrase_yields_none() {
        let today = date(2025, 9, 29);
        assert_eq!(extract_date("I spent $25 at McDonald's", today), None);
    }

    #[test]
    fn iso_round_trip_is_idempotent() {
        let today = date(2025, 6, 15);
        for input in ["29th Sep 2025", "Sep 29 2025", "29/09/2025", "2025-09-29"] {
            let first = extract_date(input, today).unwrap();
            let reparsed = extract_date(&first.format("%Y-%m-%d").to_string(), today).unwrap();
            assert_eq!(first, reparsed, "round-trip failed for {input}");
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Relative phrases track any anchor date, including month
            /// and year boundaries.
            #[test]
            fn relative_phrases_offset_any_anchor(
                offset in 0u64..36_500,
                n in 1u64..60,
            ) {
                let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
                let today = base.checked_add_days(Days::new(offset)).unwrap();

                prop_assert_eq!(extract_date("spent $5 today", today), Some(today));
                prop_assert_eq!(
                    extract_date("spent $5 yesterday", today),
                    today.checked_sub_days(Days::new(1))
                );
                prop_assert_eq!(
                    extract_date("spent $5 last week", today),
                    today.checked_sub_days(Days::new(7))
                );
                let phrase = format!("spent $5 {n} days ago");
                prop_assert_eq!(
                    extract_date(&phrase, today),
                    today.checked_sub_days(Days::new(n))
                );
            }
        }
    }
}
