//! Questionnaire domain module.
//!
//! The fixed sequence of questions the assistant asks about a building, and
//! the rules each answer must satisfy before it is stored.
//!
//! # Example
//!
//! ```
//! use energy_sherpa::domain::questionnaire::{validate, QuestionRegistry, ValidatedValue};
//!
//! let registry = QuestionRegistry::global();
//! let step = registry.get(2).unwrap();
//! assert_eq!(validate(" 120 ", step).unwrap(), ValidatedValue::Number(120.0));
//! ```

mod errors;
mod registry;
mod step;
mod validator;

pub use errors::{RegistryError, ValidationError};
pub use registry::QuestionRegistry;
pub use step::{keys, AnswerKind, Step, BUILDING_TYPES, CONSUMPTION_CLASSES, PROVINCES};
pub use validator::{validate, Answers, ValidatedValue, MAX_YEAR, MIN_YEAR};
