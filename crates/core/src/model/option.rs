use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionError {
    #[error("option index must be between 1 and 4, got {0}")]
    OutOfRange(u8),
}

/// 1-based index of an answer option (1..=4).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OptionIndex(u8);

impl OptionIndex {
    /// Converts a raw 1-based index.
    ///
    /// # Errors
    ///
    /// Returns `OptionError::OutOfRange` if `value` is not in 1..=4.
    pub fn new(value: u8) -> Result<Self, OptionError> {
        if (1..=OPTION_COUNT as u8).contains(&value) {
            Ok(Self(value))
        } else {
            Err(OptionError::OutOfRange(value))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Position of this option in a zero-based array.
    #[must_use]
    pub fn zero_based(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// All four options in display order.
    pub fn all() -> impl Iterator<Item = OptionIndex> {
        (1..=OPTION_COUNT as u8).map(OptionIndex)
    }
}

impl TryFrom<u8> for OptionIndex {
    type Error = OptionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OptionIndex> for u8 {
    fn from(value: OptionIndex) -> Self {
        value.0
    }
}

impl fmt::Debug for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionIndex({})", self.0)
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
