//! Assessment domain module.
//!
//! Turns a completed questionnaire into the feature record the efficiency
//! classifier was trained on, runs the classifier through a verified
//! [`ModelHandle`], and phrases the outcome for the user.
//!
//! # Flow
//!
//! ```text
//! Answers ─► FeatureEncoder ─► FeatureRecord ─► ModelHandle ─► Classification
//!                                                                   │
//!                         String ◄─ ResultComposer ◄─ Verdict ◄─────┘
//! ```

mod composer;
mod encoder;
mod errors;
mod features;
mod model;
mod verdict;

pub use composer::{ResultComposer, DEFAULT_REFERENCE_YEAR};
pub use encoder::{CategoryPolicy, FeatureEncoder};
pub use errors::{EncodingError, ModelContractError, PredictionError};
pub use features::{ColumnKind, ColumnSpec, FeatureRecord};
pub use model::{Classification, ModelHandle};
pub use verdict::{EfficiencyLabel, Verdict};
