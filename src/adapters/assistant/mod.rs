//! Assistant adapters.

mod scripted;

pub use scripted::{OfflineAssistant, ScriptedAssistant};
