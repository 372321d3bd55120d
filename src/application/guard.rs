//! Message deduplication guard.
//!
//! The surrounding UI can re-fire the same logical submission (double
//! click, async double-invocation, re-render races), and the state
//! machine is not idempotent: processing the same utterance twice would
//! double-advance the conversation or double-insert the final record.
//! This guard wraps "process one utterance" with at-most-once admission.
//!
//! ## How It Works
//!
//! 1. A key is derived from the lower-cased, trimmed, whitespace-collapsed
//!    utterance text.
//! 2. A second submission with the same key is rejected while the first
//!    is still in flight.
//! 3. A submission is also rejected if the same key completed within a
//!    short trailing window, absorbing duplicate UI event firing.
//! 4. Keys are always cleared on completion (success or failure), and
//!    completion records older than a fixed horizon are evicted to bound
//!    memory.
//!
//! The guard is an explicit session-scoped object owned by one
//! orchestrator; nothing here is process-global or persisted.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::Timestamp;

/// Result of asking the guard to admit an utterance.
#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    /// Process the utterance; hand the key back via [`SubmissionGuard::complete`].
    Admitted(SubmissionKey),
    /// Duplicate of an in-flight or just-completed submission; drop it.
    Duplicate,
}

/// Opaque in-flight marker returned on admission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionKey(String);

/// Session-scoped duplicate-submission filter.
#[derive(Debug)]
pub struct SubmissionGuard {
    in_flight: HashSet<String>,
    completed: HashMap<String, Timestamp>,
    trailing_window_secs: u64,
    eviction_horizon_secs: u64,
}

impl SubmissionGuard {
    /// Creates a guard with the given trailing window and eviction horizon.
    pub fn new(trailing_window_secs: u64, eviction_horizon_secs: u64) -> Self {
        Self {
            in_flight: HashSet::new(),
            completed: HashMap::new(),
            trailing_window_secs,
            eviction_horizon_secs,
        }
    }

    /// Normalizes utterance text into a dedup key.
    pub fn key_for(text: &str) -> String {
        text.trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Asks to process an utterance now.
    pub fn admit(&mut self, text: &str) -> Admission {
        self.admit_at(text, Timestamp::now())
    }

    /// Clock-injected variant of [`admit`](Self::admit).
    pub fn admit_at(&mut self, text: &str, now: Timestamp) -> Admission {
        self.evict_stale(now);
        let key = Self::key_for(text);

        if self.in_flight.contains(&key) {
            tracing::debug!(key = %key, "duplicate utterance while in flight");
            return Admission::Duplicate;
        }
        if let Some(finished) = self.completed.get(&key) {
            let age = now.secs_since(finished);
            if age >= 0 && (age as u64) < self.trailing_window_secs {
                tracing::debug!(key = %key, "duplicate utterance within trailing window");
                return Admission::Duplicate;
            }
        }

        self.in_flight.insert(key.clone());
        Admission::Admitted(SubmissionKey(key))
    }

    /// Marks a submission finished, success or failure alike.
    pub fn complete(&mut self, key: SubmissionKey) {
        self.complete_at(key, Timestamp::now());
    }

    /// Clock-injected variant of [`complete`](Self::complete).
    pub fn complete_at(&mut self, key: SubmissionKey, now: Timestamp) {
        self.in_flight.remove(&key.0);
        self.completed.insert(key.0, now);
        self.evict_stale(now);
    }

    /// Drops completion records older than the eviction horizon.
    fn evict_stale(&mut self, now: Timestamp) {
        let horizon = self.eviction_horizon_secs;
        self.completed.retain(|_, finished| {
            let age = now.secs_since(finished);
            age < 0 || (age as u64) < horizon
        });
    }

    /// Number of keys currently tracked (in flight + recent completions).
    pub fn tracked_keys(&self) -> usize {
        self.in_flight.len() + self.completed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> SubmissionGuard {
        SubmissionGuard::new(3, 30)
    }

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn admitted(admission: Admission) -> SubmissionKey {
        match admission {
            Admission::Admitted(key) => key,
            Admission::Duplicate => panic!("expected admission"),
        }
    }

    #[test]
    fn first_submission_is_admitted() {
        let mut guard = guard();
        assert!(matches!(guard.admit_at("I spent $5", t0()), Admission::Admitted(_)));
    }

    #[test]
    fn same_text_while_in_flight_is_rejected() {
        let mut guard = guard();
        let _key = admitted(guard.admit_at("I spent $5", t0()));
        assert_eq!(guard.admit_at("I spent $5", t0()), Admission::Duplicate);
    }

    #[test]
    fn normalization_catches_case_and_spacing_variants() {
        let mut guard = guard();
        let _key = admitted(guard.admit_at("I spent $5", t0()));
        assert_eq!(guard.admit_at("  i  SPENT   $5 ", t0()), Admission::Duplicate);
    }

    #[test]
    fn different_text_is_admitted_concurrently() {
        let mut guard = guard();
        let _a = admitted(guard.admit_at("I spent $5", t0()));
        assert!(matches!(
            guard.admit_at("I spent $6", t0()),
            Admission::Admitted(_)
        ));
    }

    #[test]
    fn completed_key_is_rejected_within_trailing_window() {
        let mut guard = guard();
        let key = admitted(guard.admit_at("I spent $5", t0()));
        guard.complete_at(key, t0().plus_millis(200));

        // 2s after completion: inside the 3s window
        assert_eq!(
            guard.admit_at("I spent $5", t0().plus_secs(2)),
            Admission::Duplicate
        );
    }

    #[test]
    fn completed_key_is_admitted_after_trailing_window() {
        let mut guard = guard();
        let key = admitted(guard.admit_at("I spent $5", t0()));
        guard.complete_at(key, t0());

        assert!(matches!(
            guard.admit_at("I spent $5", t0().plus_secs(4)),
            Admission::Admitted(_)
        ));
    }

    #[test]
    fn completion_clears_in_flight_even_on_failure_paths() {
        // The guard has no notion of success; completion always clears.
        let mut guard = guard();
        let key = admitted(guard.admit_at("I spent $5", t0()));
        guard.complete_at(key, t0());
        assert!(!guard.in_flight.contains(&SubmissionGuard::key_for("I spent $5")));
    }

    #[test]
    fn stale_completions_are_evicted_past_the_horizon() {
        let mut guard = guard();
        let key = admitted(guard.admit_at("I spent $5", t0()));
        guard.complete_at(key, t0());
        assert_eq!(guard.tracked_keys(), 1);

        // Any admission after the horizon triggers eviction
        let _other = guard.admit_at("unrelated", t0().plus_secs(31));
        assert!(!guard.completed.contains_key(&SubmissionGuard::key_for("I spent $5")));
    }

    #[test]
    fn key_for_collapses_whitespace() {
        assert_eq!(
            SubmissionGuard::key_for("  Lunch   at  ALDI "),
            "lunch at aldi"
        );
    }
}
