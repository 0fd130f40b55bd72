//! Foundation module - Shared domain primitives.

mod errors;
mod percentage;

pub use errors::ValueError;
pub use percentage::Percentage;
