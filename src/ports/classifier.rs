//! Classifier Port - Interface for the pre-trained efficiency model.
//!
//! The assistant never loads or trains the model itself. Whatever hosts the
//! model implements this trait and declares the input contract it was fit
//! on; [`ModelHandle`](crate::domain::assessment::ModelHandle) checks that
//! contract once, when the handle is built.
//!
//! # Design
//!
//! - Synchronous: one prediction per completed conversation, no streaming
//! - Called through `&self` only; implementations must not mutate during
//!   prediction so one handle can serve many conversations
//! - Probabilities are optional; models without them still produce a verdict
//!
//! # Example
//!
//! ```ignore
//! struct AlwaysEfficient;
//!
//! impl Classifier for AlwaysEfficient {
//!     fn schema(&self) -> ClassifierSchema {
//!         ClassifierSchema::new(FeatureRecord::schema(), UnknownCategoryPolicy::Ignore)
//!     }
//!
//!     fn predict(&self, _record: &FeatureRecord) -> Result<u8, ClassifierError> {
//!         Ok(0)
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{ColumnSpec, FeatureRecord};

/// Port for the binary efficiency classifier.
pub trait Classifier: Send + Sync {
    /// Input contract the model was fit on.
    fn schema(&self) -> ClassifierSchema;

    /// Predicts the class: 0 for efficient, 1 for inefficient.
    fn predict(&self, record: &FeatureRecord) -> Result<u8, ClassifierError>;

    /// Per-class probabilities, or `None` when the model cannot produce them.
    fn predict_probability(
        &self,
        record: &FeatureRecord,
    ) -> Result<Option<ClassProbabilities>, ClassifierError> {
        let _ = record;
        Ok(None)
    }
}

/// Columns and categorical handling declared by a classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierSchema {
    pub columns: Vec<ColumnSpec>,
    pub unknown_categories: UnknownCategoryPolicy,
}

impl ClassifierSchema {
    pub fn new(columns: Vec<ColumnSpec>, unknown_categories: UnknownCategoryPolicy) -> Self {
        Self {
            columns,
            unknown_categories,
        }
    }
}

/// How the model's categorical encoder treats values it never saw in training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Unseen values are encoded as all-zero and prediction proceeds.
    Ignore,
    /// Unseen values make prediction fail.
    Error,
}

/// Probability of each class, indexed by class label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities([f64; 2]);

impl ClassProbabilities {
    pub fn new(efficient: f64, inefficient: f64) -> Self {
        Self([efficient, inefficient])
    }

    /// Probability of the class with the given label.
    pub fn for_class(&self, class: u8) -> Option<f64> {
        self.0.get(usize::from(class)).copied()
    }
}

/// Errors raised by a classifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Inference failed: {0}")]
    Inference(String),
}
