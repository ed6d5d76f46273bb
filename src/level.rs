use rand::RngCore;

/// `2^64` as a float, the scale that maps a probability onto the `u64` draw range.
const SCALE: f64 = 18_446_744_073_709_551_616.0;

/// Precomputed promotion thresholds, so that sampling a level needs a single
/// random number and no exponentiation.
///
/// `thresholds[i]` is `p^i` scaled to the `u64` range. A draw `r` reaches level
/// `i + 1` from level `i` while `r < thresholds[i]`.
#[derive(Debug, Clone)]
pub(crate) struct Probabilities {
  thresholds: Box<[u64]>,
  probability: f64,
}

impl Probabilities {
  pub(crate) fn new(max_level: usize, probability: f64) -> Self {
    let mut thresholds = vec![0; max_level];
    let mut p = 1f64;

    for threshold in thresholds.iter_mut() {
      // saturating cast, p^0 maps to u64::MAX
      *threshold = (p * SCALE) as u64;
      p *= probability;
    }

    Self {
      thresholds: thresholds.into_boxed_slice(),
      probability,
    }
  }

  #[inline]
  pub(crate) fn max_level(&self) -> usize {
    self.thresholds.len()
  }

  #[inline]
  pub(crate) fn probability(&self) -> f64 {
    self.probability
  }

  /// Draws a level in `[1, max_level]`, where level `k` has likelihood
  /// proportional to `p^(k - 1)`.
  pub(crate) fn random_level<R: RngCore + ?Sized>(&self, rng: &mut R) -> usize {
    let rnd = rng.next_u64();
    let mut level = 1;

    while level < self.max_level() && rnd < self.thresholds[level] {
      level += 1;
    }
    level
  }
}
