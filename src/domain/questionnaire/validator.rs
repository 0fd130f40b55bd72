//! Answer validation.
//!
//! `validate` is a pure function of the raw text and the step it answers.
//! Accepted answers come back normalized; rejected answers carry the message
//! the user should see.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::ValidationError;
use super::step::{AnswerKind, Step};

/// Earliest accepted year, inclusive.
pub const MIN_YEAR: f64 = 1800.0;

/// Latest accepted year, inclusive.
pub const MAX_YEAR: f64 = 2100.0;

/// Validated answers keyed by step key.
pub type Answers = BTreeMap<String, ValidatedValue>;

/// A normalized answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidatedValue {
    /// Non-negative, finite number.
    Number(f64),
    /// Canonically-cased choice or trimmed free text.
    Text(String),
}

impl ValidatedValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ValidatedValue::Number(n) => Some(*n),
            ValidatedValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ValidatedValue::Text(t) => Some(t),
            ValidatedValue::Number(_) => None,
        }
    }
}

/// Validates `raw` as an answer to `step`.
pub fn validate(raw: &str, step: &Step) -> Result<ValidatedValue, ValidationError> {
    let text = raw.trim();

    match step.answer_kind() {
        AnswerKind::Entry => Ok(ValidatedValue::Text(raw.to_string())),
        AnswerKind::Choice(choices) => match_choice(text, choices),
        AnswerKind::Year => parse_number(text, true),
        AnswerKind::Number => parse_number(text, false),
        AnswerKind::FreeText => Ok(ValidatedValue::Text(text.to_string())),
    }
}

fn match_choice(text: &str, choices: &[String]) -> Result<ValidatedValue, ValidationError> {
    let wanted = text.to_lowercase();

    choices
        .iter()
        .find(|choice| choice.to_lowercase() == wanted)
        .map(|choice| ValidatedValue::Text(choice.clone()))
        .ok_or_else(|| ValidationError::UnknownChoice {
            choices: choices.to_vec(),
        })
}

fn parse_number(text: &str, is_year: bool) -> Result<ValidatedValue, ValidationError> {
    let value: f64 = text.parse().map_err(|_| ValidationError::NotANumber)?;

    // "inf" and "NaN" parse but cannot be encoded for the model.
    if !value.is_finite() {
        return Err(ValidationError::NotANumber);
    }
    if value < 0.0 {
        return Err(ValidationError::Negative);
    }
    if is_year && !(MIN_YEAR..=MAX_YEAR).contains(&value) {
        return Err(ValidationError::YearOutOfRange);
    }

    Ok(ValidatedValue::Number(value))
}
