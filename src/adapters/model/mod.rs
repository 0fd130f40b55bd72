//! Classifier Adapters.
//!
//! ## Available Adapters
//!
//! - `MockClassifier` - Configurable classifier for tests and demos

mod mock_classifier;

pub use mock_classifier::{MockClassifier, MockPrediction};
