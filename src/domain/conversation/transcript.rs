//! Append-only conversation transcript.
//!
//! Insertion order is the canonical order for replay and audit. Entries
//! are never edited or removed once appended.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    System,
}

/// One turn in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: Timestamp,
}

/// Ordered sequence of user and system turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry stamped now.
    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            speaker,
            text: text.into(),
            timestamp: Timestamp::now(),
        });
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// The most recent user utterances, oldest first, up to `limit`.
    ///
    /// Used to give the understanding collaborator recent context
    /// without shipping the entire transcript.
    pub fn recent_user_turns(&self, limit: usize) -> Vec<&str> {
        let mut turns: Vec<&str> = self
            .entries
            .iter()
            .rev()
            .filter(|e| e.speaker == Speaker::User)
            .take(limit)
            .map(|e| e.text.as_str())
            .collect();
        turns.reverse();
        turns
    }
}
