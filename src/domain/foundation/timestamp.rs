//! UTC timestamps for transcript entries and guard bookkeeping.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// An immutable UTC point in time.
///
/// Transcript entries are stamped with one, and the submission guard
/// measures its trailing window and eviction horizon between two of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// A timestamp at the given Unix second.
    ///
    /// Mainly for clock-injected tests of the guard windows.
    pub fn from_unix_secs(secs: u64) -> Self {
        Self(
            Utc.timestamp_opt(secs as i64, 0)
                .single()
                .expect("u64 seconds are within the chrono range"),
        )
    }

    /// The calendar date (UTC) this moment falls on.
    pub fn date(&self) -> chrono::NaiveDate {
        self.0.date_naive()
    }

    /// Whether this moment precedes `other`.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Whole seconds elapsed since `earlier`.
    ///
    /// Negative when `earlier` is actually later, so callers can detect a
    /// clock that moved backwards instead of treating it as a huge age.
    pub fn secs_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_seconds()
    }

    /// This moment shifted forward by whole seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// This moment shifted forward by milliseconds.
    pub fn plus_millis(&self, millis: u64) -> Self {
        Self(self.0 + Duration::milliseconds(millis as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_tracks_the_real_clock() {
        let before = Timestamp::now();
        let after = Timestamp::now();
        assert!(before.secs_since(&after) <= 0);
    }

    #[test]
    fn secs_since_measures_the_gap_in_whole_seconds() {
        let a = Timestamp::from_unix_secs(1_700_000_000);
        let b = a.plus_secs(42);
        assert_eq!(b.secs_since(&a), 42);
        assert_eq!(a.secs_since(&b), -42);
    }

    #[test]
    fn sub_second_gaps_round_toward_zero() {
        let a = Timestamp::from_unix_secs(1_700_000_000);
        let b = a.plus_millis(900);
        assert_eq!(b.secs_since(&a), 0);
        assert!(a.is_before(&b));
    }

    #[test]
    fn date_reports_the_utc_calendar_day() {
        // 2023-11-14T22:13:20Z
        let ts = Timestamp::from_unix_secs(1_700_000_000);
        assert_eq!(
            ts.date(),
            chrono::NaiveDate::from_ymd_opt(2023, 11, 14).unwrap()
        );
    }

    #[test]
    fn serializes_transparently() {
        let ts = Timestamp::from_unix_secs(1_700_000_000);
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }
}
