use rand::{rngs::StdRng, SeedableRng};

use crate::{Error, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL, MIN_LEVEL};

/// Options for `SkipMap`.
///
/// Options are plain values: nothing is checked until they are handed to a
/// constructor, which rejects out-of-range settings instead of clamping them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
  max_level: u8,
  probability: f64,
  seed: Option<u64>,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Options {
    Options {
      max_level: DEFAULT_MAX_LEVEL,
      probability: DEFAULT_PROBABILITY,
      seed: None,
    }
  }

  /// Sets the maximum level of the skiplist.
  ///
  /// Default is `17`. Valid values are `1..=64`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use rwskl::Options;
  ///
  /// let options = Options::new().with_max_level(12);
  /// assert_eq!(options.max_level(), 12);
  /// ```
  #[inline]
  pub const fn with_max_level(mut self, level: u8) -> Options {
    self.max_level = level;
    self
  }

  /// Sets the probability that a node on level `k` is promoted to level `k + 1`.
  ///
  /// Default is `0.5`. Valid values are within `(0, 1)`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use rwskl::Options;
  ///
  /// let options = Options::new().with_probability(1.0 / std::f64::consts::E);
  /// ```
  #[inline]
  pub const fn with_probability(mut self, probability: f64) -> Options {
    self.probability = probability;
    self
  }

  /// Seeds the default random source, making level sampling deterministic.
  ///
  /// Without a seed, the random source is seeded from the operating system.
  /// This option is ignored by constructors that take an explicit random source.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use rwskl::Options;
  ///
  /// let options = Options::new().with_seed(42);
  /// assert_eq!(options.seed(), Some(42));
  /// ```
  #[inline]
  pub const fn with_seed(mut self, seed: u64) -> Options {
    self.seed = Some(seed);
    self
  }

  /// Returns the maximum level.
  #[inline]
  pub const fn max_level(&self) -> u8 {
    self.max_level
  }

  /// Returns the promotion probability.
  #[inline]
  pub const fn probability(&self) -> f64 {
    self.probability
  }

  /// Returns the seed of the default random source, if any.
  #[inline]
  pub const fn seed(&self) -> Option<u64> {
    self.seed
  }

  /// Checks that every option is within its valid range.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use rwskl::{Error, Options};
  ///
  /// assert!(Options::new().validate().is_ok());
  /// assert_eq!(
  ///   Options::new().with_max_level(65).validate(),
  ///   Err(Error::InvalidMaxLevel(65)),
  /// );
  /// ```
  pub fn validate(&self) -> Result<(), Error> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.max_level) {
      return Err(Error::InvalidMaxLevel(self.max_level));
    }

    // NaN fails both comparisons.
    if !(self.probability > 0.0 && self.probability < 1.0) {
      return Err(Error::InvalidProbability(self.probability));
    }

    Ok(())
  }

  pub(crate) fn rng(&self) -> StdRng {
    match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    }
  }
}
