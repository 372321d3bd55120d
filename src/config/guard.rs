//! Deduplication guard configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Windows for the submission guard.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GuardConfig {
    /// How long after completion an identical utterance is still treated
    /// as a duplicate, in seconds.
    #[serde(default = "default_trailing_window")]
    pub trailing_window_secs: u64,

    /// How long completion records are kept before eviction, in seconds.
    #[serde(default = "default_eviction_horizon")]
    pub eviction_horizon_secs: u64,
}

impl GuardConfig {
    /// Validates the window relationship.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.eviction_horizon_secs == 0 {
            return Err(ValidationError::ZeroHorizon);
        }
        if self.trailing_window_secs > self.eviction_horizon_secs {
            return Err(ValidationError::WindowExceedsHorizon);
        }
        Ok(())
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            trailing_window_secs: default_trailing_window(),
            eviction_horizon_secs: default_eviction_horizon(),
        }
    }
}

fn default_trailing_window() -> u64 {
    3
}

fn default_eviction_horizon() -> u64 {
    30
}
