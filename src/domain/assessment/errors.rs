//! Error types for the assessment domain

use crate::ports::ClassifierError;

/// Encoding errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum EncodingError {
    #[error("Missing required answer: {0}")]
    MissingField(String),

    #[error("Answer for {field} is not a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Unknown category {value:?} for {field}")]
    UnknownCategory { field: String, value: String },
}

/// Prediction errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PredictionError {
    #[error("Model not loaded")]
    ModelUnavailable,

    #[error(transparent)]
    Inference(#[from] ClassifierError),

    #[error("Classifier returned unknown class {0}")]
    UnexpectedClass(u8),
}

/// Raised when a classifier does not honor the feature contract
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ModelContractError {
    #[error("Feature columns mismatch: expected {expected:?}, model declares {actual:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Model must ignore unknown categorical values at inference time")]
    UnknownCategoriesNotIgnored,
}
