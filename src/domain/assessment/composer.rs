//! Result composition.
//!
//! Builds the [`Verdict`] from a classification and the collected answers,
//! and renders it as the markdown message the user receives.

use crate::domain::questionnaire::{keys, Answers};

use super::encoder::number_answer;
use super::errors::EncodingError;
use super::model::Classification;
use super::verdict::{EfficiencyLabel, Verdict};

/// Year building age is measured against unless configured otherwise.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

/// Formats verdicts. Holds no state beyond the reference year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultComposer {
    reference_year: i32,
}

impl Default for ResultComposer {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_YEAR)
    }
}

impl ResultComposer {
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    /// Assembles the verdict for a classified building.
    pub fn verdict(
        &self,
        classification: Classification,
        answers: &Answers,
    ) -> Result<Verdict, EncodingError> {
        let construction_year = number_answer(answers, keys::CONSTRUCTION_YEAR)?;

        Ok(Verdict {
            label: classification.label,
            confidence: classification.confidence,
            derived_age: self.reference_year - construction_year.trunc() as i32,
            consumption_kwh: number_answer(answers, keys::CONSUMPTION_KWH)?,
            co2_emission: number_answer(answers, keys::CO2_EMISSION)?,
            recommendation: classification.label.recommendation().to_string(),
        })
    }

    /// Renders a verdict as markdown.
    ///
    /// Confidence is left out entirely when unavailable rather than shown
    /// as 0%.
    pub fn compose(&self, verdict: &Verdict) -> String {
        let mut message = String::new();
        let consumption = figure(verdict.consumption_kwh);

        match verdict.label {
            EfficiencyLabel::Inefficient => {
                message.push_str("### 🔴 RESULTADO: INEFICIENTE\n\n");
                message.push_str("⚠️ **Este edificio requiere inspección urgente.**\n");
                if let Some(confidence) = verdict.confidence {
                    message.push_str(&format!(
                        "La probabilidad de ineficiencia es del **{confidence}**.\n"
                    ));
                }
                message.push_str("\n**Resumen del análisis:**\n");
                message.push_str(&format!("- Antigüedad: {} años\n", verdict.derived_age));
                message.push_str(&format!("- Consumo: {consumption} kWh/m²\n"));
                message.push_str(&format!(
                    "- Emisiones: {} kgCO₂/m²\n",
                    figure(verdict.co2_emission)
                ));
            }
            EfficiencyLabel::Efficient => {
                message.push_str("### 🟢 RESULTADO: EFICIENTE\n\n");
                message.push_str("✅ **El edificio se encuentra en buen estado.**\n");
                message.push_str("No se detecta necesidad de intervención inmediata.\n");
                if let Some(confidence) = verdict.confidence {
                    message.push_str(&format!(
                        "La confianza del modelo es del **{confidence}**.\n"
                    ));
                }
                message.push_str("\n**Resumen del análisis:**\n");
                message.push_str(&format!("- Antigüedad: {} años\n", verdict.derived_age));
                message.push_str(&format!("- Consumo: {consumption} kWh/m²\n"));
            }
        }

        message.push_str(&format!("\n💡 **Recomendación:** {}", verdict.recommendation));
        message
    }
}

/// Whole figures keep one decimal: `35.0` prints as `35.0`, not `35`.
fn figure(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
