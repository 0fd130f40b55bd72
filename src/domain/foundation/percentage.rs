//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValueError;

/// A value between 0 and 100 inclusive.
///
/// Displayed with one decimal place, which is how model confidence is shown
/// to the user.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100.0);

    /// Creates a Percentage from a probability in `[0, 1]`.
    pub fn from_probability(probability: f64) -> Result<Self, ValueError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ValueError::out_of_range("probability", 0.0, 1.0, probability));
        }
        Ok(Self(probability * 100.0))
    }

    /// Returns the value on the 0-100 scale.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
