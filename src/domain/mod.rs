//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared value objects and their errors
//! - `questionnaire` - Survey steps and answer validation
//! - `assessment` - Feature encoding, model handle and verdicts
//! - `conversation` - The turn-by-turn survey state machine

pub mod assessment;
pub mod conversation;
pub mod foundation;
pub mod questionnaire;
