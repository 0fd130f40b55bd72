//! Mock classifier for testing.
//!
//! Provides a configurable implementation of the Classifier port so the
//! conversation can be exercised without a trained model.
//!
//! # Features
//!
//! - Pre-configured predictions, consumed in order
//! - Optional class probabilities per prediction
//! - Error injection for failure handling
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let classifier = MockClassifier::new()
//!     .with_prediction(1, Some(ClassProbabilities::new(0.1, 0.9)));
//!
//! let handle = ModelHandle::new(Arc::new(classifier))?;
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::assessment::FeatureRecord;
use crate::ports::{
    ClassProbabilities, Classifier, ClassifierError, ClassifierSchema, UnknownCategoryPolicy,
};

/// Mock classifier for testing.
///
/// Clones share the prediction queue and call history.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    /// Pre-configured predictions (consumed in order).
    predictions: Arc<Mutex<VecDeque<MockPrediction>>>,
    /// Probabilities belonging to the most recent prediction.
    last_probabilities: Arc<Mutex<Option<ClassProbabilities>>>,
    /// Declared input contract.
    schema: ClassifierSchema,
    /// Records passed to `predict`.
    calls: Arc<Mutex<Vec<FeatureRecord>>>,
}

/// A configured mock prediction.
#[derive(Debug, Clone)]
pub enum MockPrediction {
    /// Return a class label, optionally with probabilities.
    Class {
        label: u8,
        probabilities: Option<ClassProbabilities>,
    },
    /// Fail the prediction.
    Error(String),
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClassifier {
    /// Creates a mock honoring the feature contract that predicts
    /// "efficient" without probabilities once the queue is empty.
    pub fn new() -> Self {
        Self {
            predictions: Arc::new(Mutex::new(VecDeque::new())),
            last_probabilities: Arc::new(Mutex::new(None)),
            schema: ClassifierSchema::new(FeatureRecord::schema(), UnknownCategoryPolicy::Ignore),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a prediction to the queue.
    pub fn with_prediction(self, label: u8, probabilities: Option<ClassProbabilities>) -> Self {
        lock(&self.predictions).push_back(MockPrediction::Class {
            label,
            probabilities,
        });
        self
    }

    /// Adds a failing prediction to the queue.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        lock(&self.predictions).push_back(MockPrediction::Error(message.into()));
        self
    }

    /// Overrides the declared schema.
    pub fn with_schema(mut self, schema: ClassifierSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Returns the number of predictions requested.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded inputs.
    pub fn get_calls(&self) -> Vec<FeatureRecord> {
        lock(&self.calls).clone()
    }

    fn next_prediction(&self) -> MockPrediction {
        lock(&self.predictions)
            .pop_front()
            .unwrap_or(MockPrediction::Class {
                label: 0,
                probabilities: None,
            })
    }
}

impl Classifier for MockClassifier {
    fn schema(&self) -> ClassifierSchema {
        self.schema.clone()
    }

    fn predict(&self, record: &FeatureRecord) -> Result<u8, ClassifierError> {
        lock(&self.calls).push(record.clone());

        match self.next_prediction() {
            MockPrediction::Class {
                label,
                probabilities,
            } => {
                *lock(&self.last_probabilities) = probabilities;
                Ok(label)
            }
            MockPrediction::Error(message) => {
                *lock(&self.last_probabilities) = None;
                Err(ClassifierError::Inference(message))
            }
        }
    }

    fn predict_probability(
        &self,
        _record: &FeatureRecord,
    ) -> Result<Option<ClassProbabilities>, ClassifierError> {
        Ok(lock(&self.last_probabilities).take())
    }
}

/// A poisoned lock only means another test thread panicked; the data is
/// still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
