//! The feature record consumed by the efficiency classifier.
//!
//! Column names, order and kinds are fixed by how the classifier was
//! trained. Surface area and CO₂ emission were learned as categorical text
//! columns, so they travel as integer strings even though they are answered
//! as numbers.

use serde::{Deserialize, Serialize};

/// How the classifier treats a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Name and kind of one model input column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

const COLUMNS: [(&str, ColumnKind); 8] = [
    ("clasificacion_consumo", ColumnKind::Numeric),
    ("consumokwhm2anio", ColumnKind::Numeric),
    ("tipo_edificio", ColumnKind::Numeric),
    ("provincia", ColumnKind::Numeric),
    ("anio_emision", ColumnKind::Numeric),
    ("anio_construccion", ColumnKind::Numeric),
    ("superficie_m2", ColumnKind::Categorical),
    ("emision_co2", ColumnKind::Categorical),
];

/// One row of model input.
///
/// Serializes with the training column names, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// 1 for certificate letters F and G, 0 otherwise.
    #[serde(rename = "clasificacion_consumo")]
    pub consumption_class: u8,

    /// kWh/m²/year.
    #[serde(rename = "consumokwhm2anio")]
    pub consumption_kwh: f64,

    /// Position in the building type list.
    #[serde(rename = "tipo_edificio")]
    pub building_type: usize,

    /// Position in the province list.
    #[serde(rename = "provincia")]
    pub province: usize,

    #[serde(rename = "anio_emision")]
    pub emission_year: f64,

    #[serde(rename = "anio_construccion")]
    pub construction_year: f64,

    /// Integer part of the surface, as text.
    #[serde(rename = "superficie_m2")]
    pub surface_m2: String,

    /// Integer part of the emission, as text.
    #[serde(rename = "emision_co2")]
    pub co2_emission: String,
}

impl FeatureRecord {
    /// The columns a compatible classifier must declare, in order.
    pub fn schema() -> Vec<ColumnSpec> {
        COLUMNS
            .iter()
            .map(|(name, kind)| ColumnSpec::new(*name, *kind))
            .collect()
    }
}
