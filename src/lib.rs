//! Chatledger - Conversational Expense Extraction Engine
//!
//! Turns free-form utterances ("I spent $25 at McDonald's yesterday for
//! lunch") into structured, validated expense records through a
//! multi-turn dialogue, with incremental field correction, idempotent
//! message handling, and fuzzy category resolution against a workspace
//! taxonomy. Storage, classification, understanding, and taxonomy
//! retrieval are external collaborators behind ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
