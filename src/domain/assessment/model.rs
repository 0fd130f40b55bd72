//! ModelHandle - the verified, shared entry point to the classifier.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::Percentage;
use crate::ports::{Classifier, UnknownCategoryPolicy};

use super::errors::{ModelContractError, PredictionError};
use super::features::{ColumnSpec, FeatureRecord};
use super::verdict::EfficiencyLabel;

/// A classifier whose input contract has been checked.
///
/// Cloning shares the underlying classifier.
#[derive(Clone)]
pub struct ModelHandle {
    classifier: Arc<dyn Classifier>,
}

/// Predicted label and, when available, its probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: EfficiencyLabel,
    pub confidence: Option<Percentage>,
}

impl ModelHandle {
    /// Wraps a classifier after verifying its declared schema.
    ///
    /// # Errors
    ///
    /// Returns `ModelContractError` if the classifier's columns differ from
    /// [`FeatureRecord::schema`] in name, order or kind, or if it does not
    /// ignore unknown categorical values.
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self, ModelContractError> {
        let schema = classifier.schema();
        let expected = FeatureRecord::schema();

        if schema.columns != expected {
            return Err(ModelContractError::ColumnMismatch {
                expected: describe(&expected),
                actual: describe(&schema.columns),
            });
        }

        if schema.unknown_categories != UnknownCategoryPolicy::Ignore {
            return Err(ModelContractError::UnknownCategoriesNotIgnored);
        }

        Ok(Self { classifier })
    }

    /// Runs the classifier on one record.
    ///
    /// Probability failures only cost the confidence figure; a failed or
    /// out-of-range prediction is an error.
    pub fn classify(&self, record: &FeatureRecord) -> Result<Classification, PredictionError> {
        let class = self.classifier.predict(record)?;
        let label =
            EfficiencyLabel::from_class(class).ok_or(PredictionError::UnexpectedClass(class))?;

        let confidence = match self.classifier.predict_probability(record) {
            Ok(Some(probabilities)) => probabilities
                .for_class(label.class())
                .and_then(|p| match Percentage::from_probability(p) {
                    Ok(pct) => Some(pct),
                    Err(err) => {
                        warn!(error = %err, "discarding invalid class probability");
                        None
                    }
                }),
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "class probabilities unavailable");
                None
            }
        };

        debug!(?label, ?confidence, "classified building");
        Ok(Classification { label, confidence })
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle").finish_non_exhaustive()
    }
}

fn describe(columns: &[ColumnSpec]) -> Vec<String> {
    columns
        .iter()
        .map(|c| format!("{}:{:?}", c.name, c.kind))
        .collect()
}
