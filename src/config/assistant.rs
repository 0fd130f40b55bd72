//! Assistant behavior configuration

use serde::Deserialize;

use crate::domain::assessment::{CategoryPolicy, ModelHandle, DEFAULT_REFERENCE_YEAR};
use crate::domain::conversation::ConversationEngine;
use crate::domain::questionnaire::{MAX_YEAR, MIN_YEAR};

use super::error::ValidationError;

/// Assistant configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Year building age is computed against
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,

    /// Encoding of categorical answers outside the known options
    #[serde(default)]
    pub unknown_category: CategoryPolicy,
}

impl AssistantConfig {
    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&f64::from(self.reference_year)) {
            return Err(ValidationError::InvalidReferenceYear(self.reference_year));
        }
        Ok(())
    }

    /// Build a conversation engine with these settings
    pub fn build_engine(&self, model: Option<ModelHandle>) -> ConversationEngine {
        ConversationEngine::new(model)
            .with_reference_year(self.reference_year)
            .with_category_policy(self.unknown_category)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reference_year: default_reference_year(),
            unknown_category: CategoryPolicy::default(),
        }
    }
}

fn default_reference_year() -> i32 {
    DEFAULT_REFERENCE_YEAR
}
