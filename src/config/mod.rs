//! Engine configuration.
//!
//! Loaded from environment variables with the `CHATLEDGER` prefix and
//! `__` as the nesting separator, e.g.
//! `CHATLEDGER__GUARD__TRAILING_WINDOW_SECS=5`. Every value has a
//! default, so the engine is fully usable with no configuration at all.

mod error;
mod guard;

pub use error::{ConfigError, ValidationError};
pub use guard::GuardConfig;

use serde::Deserialize;

/// Root engine configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Submission guard windows.
    #[serde(default)]
    pub guard: GuardConfig,

    /// ISO currency code applied when an utterance names no currency.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Master switch for the conversational-understanding collaborator.
    /// When off, the engine always uses its direct extractors.
    #[serde(default = "default_assistant_enabled")]
    pub assistant_enabled: bool,
}

impl EngineConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads a `.env` file if present (development), then environment
    /// variables with the `CHATLEDGER` prefix.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHATLEDGER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.guard.validate()?;
        if self.default_currency.len() != 3
            || !self.default_currency.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            guard: GuardConfig::default(),
            default_currency: default_currency(),
            assistant_enabled: default_assistant_enabled(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_assistant_enabled() -> bool {
    true
}
