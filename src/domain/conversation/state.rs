//! Conversation state.
//!
//! The whole memory of one conversation: which step is pending and what has
//! been answered so far. Hosts hold it between turns as an opaque value and
//! hand it back with the next message.

use serde::{Deserialize, Serialize};

use crate::domain::questionnaire::{Answers, ValidatedValue};

/// Position in the survey plus the answers collected so far.
///
/// `step_index == 0` is both the initial and the post-completion state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    step_index: usize,
    answers: Answers,
}

impl ConversationState {
    /// The entry state: greeting pending, nothing answered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the step whose answer is expected next.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// True when the next input merely opens the survey.
    pub fn is_at_entry(&self) -> bool {
        self.step_index == 0
    }

    /// First data step with no answers.
    pub(crate) fn started() -> Self {
        Self {
            step_index: 1,
            answers: Answers::new(),
        }
    }

    /// Stores an accepted answer and moves to the following step.
    pub(crate) fn record(mut self, key: &str, value: ValidatedValue) -> Self {
        self.answers.insert(key.to_string(), value);
        self.step_index += 1;
        self
    }

    /// Hands over the collected answers.
    pub(crate) fn into_answers(self) -> Answers {
        self.answers
    }
}
