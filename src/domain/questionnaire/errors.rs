//! Error types for the questionnaire.
//!
//! `ValidationError` messages are shown verbatim to the user, so they carry
//! the assistant's wording rather than a technical description.

use thiserror::Error;

/// A rejected answer. The conversation stays on the same step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("⚠️ Opción no reconocida. Por favor elige una de: {}", .choices.join(", "))]
    UnknownChoice { choices: Vec<String> },

    #[error("⚠️ El número no puede ser negativo.")]
    Negative,

    #[error("⚠️ El año no parece válido.")]
    YearOutOfRange,

    #[error("⚠️ Por favor ingresa un número válido (usa punto '.' para decimales).")]
    NotANumber,
}

/// Registry lookup and construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Step index {index} out of range (registry has {count} steps)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Registry must contain at least the entry step")]
    Empty,

    #[error("Duplicate step key: {0}")]
    DuplicateKey(String),
}
