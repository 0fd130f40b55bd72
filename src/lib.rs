//! Energy Sherpa - Conversational Building Energy-Efficiency Screening
//!
//! This crate asks a fixed sequence of questions about a building, validates
//! each answer, encodes the answers for a pre-trained classifier, and reports
//! whether the building needs an energy inspection.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
