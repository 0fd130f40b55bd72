//! Verdict value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Percentage;

/// Outcome of the efficiency classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EfficiencyLabel {
    Efficient,
    Inefficient,
}

impl EfficiencyLabel {
    /// Maps the classifier's class label; anything but 0 or 1 is unknown.
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(EfficiencyLabel::Efficient),
            1 => Some(EfficiencyLabel::Inefficient),
            _ => None,
        }
    }

    /// The classifier's class label for this outcome.
    pub fn class(&self) -> u8 {
        match self {
            EfficiencyLabel::Efficient => 0,
            EfficiencyLabel::Inefficient => 1,
        }
    }

    /// Fixed advice given with each outcome.
    pub fn recommendation(&self) -> &'static str {
        match self {
            EfficiencyLabel::Efficient => "Mantener revisiones periódicas cada 5 años.",
            EfficiencyLabel::Inefficient => {
                "Contactar a un auditor energético para evaluar reformas de aislamiento."
            }
        }
    }

    pub fn needs_inspection(&self) -> bool {
        matches!(self, EfficiencyLabel::Inefficient)
    }
}

impl fmt::Display for EfficiencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyLabel::Efficient => write!(f, "EFICIENTE"),
            EfficiencyLabel::Inefficient => write!(f, "INEFICIENTE"),
        }
    }
}

/// Final determination plus the figures shown alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: EfficiencyLabel,
    /// Probability of `label`, when the model provides probabilities.
    pub confidence: Option<Percentage>,
    /// Years between construction and the reference year.
    pub derived_age: i32,
    /// kWh/m²/year as answered.
    pub consumption_kwh: f64,
    /// kgCO₂/m²/year as answered.
    pub co2_emission: f64,
    pub recommendation: String,
}
