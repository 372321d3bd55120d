//! Classifier adapters.

mod keyword;
mod scripted;

pub use keyword::KeywordClassifier;
pub use scripted::{OfflineClassifier, ScriptedClassifier};
