//! Step definitions for the building survey.

use serde::{Deserialize, Serialize};

/// Keys under which each answer is stored.
pub mod keys {
    pub const GREETING: &str = "inicio";
    pub const BUILDING_TYPE: &str = "tipo_edificio";
    pub const SURFACE_M2: &str = "superficie_m2";
    pub const CONSTRUCTION_YEAR: &str = "anio_construccion";
    pub const PROVINCE: &str = "provincia";
    pub const CONSUMPTION_CLASS: &str = "clasificacion_consumo";
    pub const CONSUMPTION_KWH: &str = "consumo_kwh";
    pub const CO2_EMISSION: &str = "emision_co2";
    pub const EMISSION_YEAR: &str = "anio_emision";

    /// Keys whose answers are parsed as non-negative numbers.
    pub const NUMERIC: [&str; 5] = [
        SURFACE_M2,
        CONSTRUCTION_YEAR,
        CONSUMPTION_KWH,
        CO2_EMISSION,
        EMISSION_YEAR,
    ];

    /// Numeric keys additionally bounded to a plausible calendar year.
    pub const YEAR: [&str; 2] = [CONSTRUCTION_YEAR, EMISSION_YEAR];
}

/// Building types, in the order the model's ordinal encoding expects.
pub const BUILDING_TYPES: [&str; 5] = [
    "Vivienda individual",
    "Bloque completo",
    "Local",
    "Unifamiliar",
    "Edificio completo",
];

/// Provinces, in the order the model's ordinal encoding expects.
pub const PROVINCES: [&str; 3] = ["ZARAGOZA", "HUESCA", "TERUEL"];

/// Energy consumption certificate letters.
pub const CONSUMPTION_CLASSES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

/// One question in the fixed conversation sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    key: String,
    prompt: String,
    choices: Option<Vec<String>>,
}

/// How an answer to a step is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind<'a> {
    /// The greeting step; any input is accepted.
    Entry,
    /// Closed set of options, matched case-insensitively.
    Choice(&'a [String]),
    /// Non-negative number bounded to a calendar year.
    Year,
    /// Non-negative number.
    Number,
    /// Anything else is kept as trimmed text.
    FreeText,
}

impl Step {
    /// Creates an open-ended step.
    pub fn new(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
            choices: None,
        }
    }

    /// Restricts the step to a closed set of options.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    /// Classifies the step by the kind of answer it expects.
    ///
    /// Precedence: entry step, then declared choices, then the numeric key
    /// sets, then free text.
    pub fn answer_kind(&self) -> AnswerKind<'_> {
        if self.key == keys::GREETING {
            AnswerKind::Entry
        } else if let Some(choices) = self.choices.as_deref() {
            AnswerKind::Choice(choices)
        } else if keys::YEAR.contains(&self.key.as_str()) {
            AnswerKind::Year
        } else if keys::NUMERIC.contains(&self.key.as_str()) {
            AnswerKind::Number
        } else {
            AnswerKind::FreeText
        }
    }
}
