//! Conversation domain module.
//!
//! Walks a user through the building survey one message at a time and
//! hands the finished answers to the assessment.
//!
//! # Example
//!
//! ```
//! use energy_sherpa::domain::conversation::{ConversationEngine, ConversationState};
//!
//! let engine = ConversationEngine::new(None);
//! let turn = engine.respond(ConversationState::new(), "hola");
//! assert_eq!(turn.state.step_index(), 1);
//! ```

mod engine;
mod state;

pub use engine::{
    CompletionError, ConversationEngine, Turn, TurnOutcome, RESTART_HINT, RETRY_SUFFIX,
};
pub use state::ConversationState;
