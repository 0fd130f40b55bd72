//! QuestionRegistry - the ordered catalog of survey steps.
//!
//! # Step Order
//!
//! 0. Greeting → 1. Building type → 2. Surface → 3. Construction year →
//! 4. Province → 5. Consumption class → 6. Consumption → 7. CO₂ emission →
//! 8. Certificate year
//!
//! Index 0 only opens the conversation; every later index collects one
//! attribute. The catalog is built once per process and never mutated.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::errors::RegistryError;
use super::step::{keys, Step, BUILDING_TYPES, CONSUMPTION_CLASSES, PROVINCES};

static BUILDING_SURVEY: Lazy<QuestionRegistry> = Lazy::new(QuestionRegistry::building_survey);

/// Immutable, ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRegistry {
    steps: Vec<Step>,
}

impl QuestionRegistry {
    /// The process-wide building survey.
    pub fn global() -> &'static QuestionRegistry {
        &BUILDING_SURVEY
    }

    /// Builds a registry from arbitrary steps.
    ///
    /// The first step is the entry step. Keys must be unique because answers
    /// are stored by key.
    pub fn new(steps: Vec<Step>) -> Result<Self, RegistryError> {
        if steps.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.key()) {
                return Err(RegistryError::DuplicateKey(step.key().to_string()));
            }
        }

        Ok(Self { steps })
    }

    /// The nine-step building survey.
    pub fn building_survey() -> Self {
        let steps = vec![
            Step::new(
                keys::GREETING,
                "¡Hola! 👋 Soy tu Asistente de Eficiencia Energética.\n\n\
                 Voy a hacerte unas preguntas breves para evaluar si tu edificio necesita inspección urgente.\n\n\
                 👉 Para empezar, escribe: **'hola'**.",
            ),
            Step::new(
                keys::BUILDING_TYPE,
                format!(
                    "1️⃣ ¿Qué **tipo de edificio** es?\n\nOpciones válidas:\n- {}",
                    BUILDING_TYPES.join(", ")
                ),
            )
            .with_choices(BUILDING_TYPES),
            Step::new(
                keys::SURFACE_M2,
                "2️⃣ ¿Cuál es la **superficie** aproximada en metros cuadrados (m²)?\n\
                 (Escribe solo el número, ej: 120)",
            ),
            Step::new(
                keys::CONSTRUCTION_YEAR,
                "3️⃣ ¿En qué **año** se construyó el edificio?\n(Ej: 1990)",
            ),
            Step::new(
                keys::PROVINCE,
                format!(
                    "4️⃣ ¿En qué **provincia** se encuentra?\n\nOpciones: {}",
                    PROVINCES.join(", ")
                ),
            )
            .with_choices(PROVINCES),
            Step::new(
                keys::CONSUMPTION_CLASS,
                format!(
                    "5️⃣ ¿Cuál es su **Clasificación de Consumo** actual?\n(Opciones: {})",
                    CONSUMPTION_CLASSES.join(", ")
                ),
            )
            .with_choices(CONSUMPTION_CLASSES),
            Step::new(
                keys::CONSUMPTION_KWH,
                "6️⃣ ¿Cuál es el **Consumo** en kWh/m²/año?\n(Ej: 150.5)",
            ),
            Step::new(
                keys::CO2_EMISSION,
                "7️⃣ ¿Cuál es la **Emisión de CO₂** en kg/m²/año?\n(Ej: 35)",
            ),
            Step::new(
                keys::EMISSION_YEAR,
                "8️⃣ Por último, ¿En qué **año** se emitió el certificado energético?\n(Ej: 2020)",
            ),
        ];

        Self { steps }
    }

    /// Returns the step at `index`.
    pub fn get(&self, index: usize) -> Result<&Step, RegistryError> {
        self.steps.get(index).ok_or(RegistryError::IndexOutOfRange {
            index,
            count: self.steps.len(),
        })
    }

    /// Number of steps, including the entry step.
    pub fn count(&self) -> usize {
        self.steps.len()
    }

    /// The greeting step at index 0.
    pub fn entry_step(&self) -> &Step {
        // Non-empty by construction.
        &self.steps[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Position of the step stored under `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.key() == key)
    }

    pub fn find(&self, key: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.key() == key)
    }
}
