use crate::{MAX_LEVEL, MIN_LEVEL};

/// Error type for constructing a [`SkipMap`](crate::sync::SkipMap).
///
/// Lookups and removals of absent keys are not errors, they return `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
  /// Indicates that the configured maximum level is outside `[1, 64]`.
  InvalidMaxLevel(u8),

  /// Indicates that the configured promotion probability is not strictly between `0` and `1`.
  InvalidProbability(f64),
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::InvalidMaxLevel(level) => write!(
        f,
        "max level {level} is out of range, must be between [{MIN_LEVEL}, {MAX_LEVEL}]"
      ),
      Self::InvalidProbability(p) => {
        write!(f, "probability {p} is out of range, must be within (0, 1)")
      }
    }
  }
}

impl std::error::Error for Error {}
