//! Feature encoding.
//!
//! Maps validated answers onto the classifier's input columns:
//!
//! - building type and province become their position in the option list
//! - the A–G certificate letter collapses to 1 for F/G and 0 otherwise
//! - surface and emission keep only their integer part, as text

use serde::Deserialize;
use tracing::warn;

use crate::domain::questionnaire::{keys, Answers, BUILDING_TYPES, PROVINCES};

use super::errors::EncodingError;
use super::features::FeatureRecord;

/// What to do with a categorical answer outside the known options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// Encode as index 0 and log a warning.
    #[default]
    Fallback,
    /// Fail with [`EncodingError::UnknownCategory`].
    Reject,
}

/// Builds [`FeatureRecord`]s from collected answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder {
    policy: CategoryPolicy,
}

impl FeatureEncoder {
    pub fn new(policy: CategoryPolicy) -> Self {
        Self { policy }
    }

    /// Encodes a complete set of answers.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if a required answer is missing or has the
    /// wrong type, or if a category is unknown under [`CategoryPolicy::Reject`].
    pub fn encode(&self, answers: &Answers) -> Result<FeatureRecord, EncodingError> {
        let building_type = self.category_index(
            keys::BUILDING_TYPE,
            text_answer(answers, keys::BUILDING_TYPE)?,
            &BUILDING_TYPES,
        )?;
        let province = self.category_index(
            keys::PROVINCE,
            text_answer(answers, keys::PROVINCE)?,
            &PROVINCES,
        )?;
        let consumption_class =
            binarize_consumption_class(text_answer(answers, keys::CONSUMPTION_CLASS)?);

        Ok(FeatureRecord {
            consumption_class,
            consumption_kwh: number_answer(answers, keys::CONSUMPTION_KWH)?,
            building_type,
            province,
            emission_year: number_answer(answers, keys::EMISSION_YEAR)?,
            construction_year: number_answer(answers, keys::CONSTRUCTION_YEAR)?,
            surface_m2: integer_text(number_answer(answers, keys::SURFACE_M2)?),
            co2_emission: integer_text(number_answer(answers, keys::CO2_EMISSION)?),
        })
    }

    fn category_index(
        &self,
        field: &str,
        value: &str,
        options: &[&str],
    ) -> Result<usize, EncodingError> {
        if let Some(index) = options.iter().position(|option| *option == value) {
            return Ok(index);
        }

        match self.policy {
            CategoryPolicy::Fallback => {
                warn!(field = %field, value = %value, "unknown category, encoding as index 0");
                Ok(0)
            }
            CategoryPolicy::Reject => Err(EncodingError::UnknownCategory {
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// F and G are the poor letters; everything else counts as good.
pub(crate) fn binarize_consumption_class(letter: &str) -> u8 {
    u8::from(matches!(letter, "F" | "G"))
}

/// Integer part of a non-negative number, as text: `120.7` becomes `"120"`.
///
/// Every digit is kept, however large the value. `-0` prints as `"0"`.
pub(crate) fn integer_text(value: f64) -> String {
    format!("{:.0}", value.trunc().abs())
}

pub(crate) fn number_answer(answers: &Answers, key: &str) -> Result<f64, EncodingError> {
    let value = answers
        .get(key)
        .ok_or_else(|| EncodingError::MissingField(key.to_string()))?;

    value.as_number().ok_or_else(|| EncodingError::WrongType {
        field: key.to_string(),
        expected: "number",
    })
}

fn text_answer<'a>(answers: &'a Answers, key: &str) -> Result<&'a str, EncodingError> {
    let value = answers
        .get(key)
        .ok_or_else(|| EncodingError::MissingField(key.to_string()))?;

    value.as_text().ok_or_else(|| EncodingError::WrongType {
        field: key.to_string(),
        expected: "text",
    })
}
