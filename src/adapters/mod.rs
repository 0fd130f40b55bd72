//! Adapters - Implementations of port interfaces.
//!
//! - `model` - Classifier implementations

pub mod model;

pub use model::{MockClassifier, MockPrediction};
