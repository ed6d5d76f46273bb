use rand::RngCore;

/// A random source that replays a fixed list of draws, then keeps returning
/// `u64::MAX` (which always samples level 1).
///
/// Only used for testing
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRng {
  draws: Vec<u64>,
  pos: usize,
}

impl ScriptedRng {
  pub(crate) fn new(draws: Vec<u64>) -> Self {
    Self { draws, pos: 0 }
  }

  /// Scripts draws that sample exactly `levels`, in order, for a list built
  /// with probability `0.5`.
  pub(crate) fn with_levels(levels: &[usize]) -> Self {
    Self::new(levels.iter().map(|&l| level_draw(l)).collect())
  }
}

/// The draw that samples `level` when `p = 0.5`: the threshold to reach level
/// `k + 1` is `2^(64 - k)`.
fn level_draw(level: usize) -> u64 {
  match level {
    0 | 1 => u64::MAX,
    l => 1 << (64 - l),
  }
}

impl RngCore for ScriptedRng {
  fn next_u32(&mut self) -> u32 {
    (self.next_u64() >> 32) as u32
  }

  fn next_u64(&mut self) -> u64 {
    let draw = self.draws.get(self.pos).copied().unwrap_or(u64::MAX);
    self.pos += 1;
    draw
  }

  fn fill_bytes(&mut self, dst: &mut [u8]) {
    for chunk in dst.chunks_mut(8) {
      let bytes = self.next_u64().to_le_bytes();
      chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
  }
}

/// Keys `1, 2, 3` inserted with sampled levels `3, 2, 5`.
pub(crate) const SCRIPTED_LEVELS: [usize; 3] = [3, 2, 5];
