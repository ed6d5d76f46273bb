use core::{borrow::Borrow, fmt, mem};

use rand::RngCore;

use super::{level::Probabilities, Error, Options, MAX_LEVEL};

mod arena;
use arena::Arena;

mod node;
use node::{Link, Node, NodeId};

/// Predecessor of a search position on every level, `None` being the head.
///
/// Always sized to the largest configurable level, because a freshly sampled
/// level may exceed the current height of the list.
type Splice = [Link; MAX_LEVEL as usize];

/// The skiplist core shared by the [`sync`](crate::sync) and
/// [`unsync`](crate::unsync) maps.
///
/// Nodes live in an [`Arena`] and link to each other by [`NodeId`]. The head
/// sentinel is not a node, it is the `head` tower, one link per configurable
/// level.
#[derive(Debug)]
pub(crate) struct SkipList<K, V, R> {
  head: Box<[Link]>,
  arena: Arena<K, V>,
  /// Current height. 1 <= height <= max_level.
  height: usize,
  len: usize,
  probs: Probabilities,
  rng: R,
}

impl<K, V, R> SkipList<K, V, R> {
  /// Validates the options and builds an empty list.
  pub(crate) fn with_options_and_rng(opts: Options, rng: R) -> Result<Self, Error> {
    if let Err(e) = opts.validate() {
      #[cfg(feature = "tracing")]
      tracing::warn!(err = %e, "rejected skiplist options");
      return Err(e);
    }

    Ok(Self::construct(opts, rng))
  }

  /// Builds an empty list from options that are known to be valid.
  pub(crate) fn construct(opts: Options, rng: R) -> Self {
    let max_level = opts.max_level() as usize;

    #[cfg(feature = "tracing")]
    tracing::debug!(
      max_level,
      probability = opts.probability(),
      "creating skiplist"
    );

    Self {
      head: vec![None; max_level].into_boxed_slice(),
      arena: Arena::new(),
      height: 1,
      len: 0,
      probs: Probabilities::new(max_level, opts.probability()),
      rng,
    }
  }

  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub(crate) fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  pub(crate) fn height(&self) -> usize {
    self.height
  }

  #[inline]
  pub(crate) fn max_level(&self) -> usize {
    self.probs.max_level()
  }

  #[inline]
  pub(crate) fn probability(&self) -> f64 {
    self.probs.probability()
  }

  /// Drops every node and resets the list to its freshly constructed state.
  /// The head tower keeps its size.
  pub(crate) fn clear(&mut self) {
    self.head.fill(None);
    self.arena.clear();
    self.height = 1;
    self.len = 0;
  }

  #[inline]
  fn next(&self, prev: Link, level: usize) -> Link {
    match prev {
      None => self.head[level],
      Some(id) => self.arena[id].tower[level],
    }
  }

  #[inline]
  fn set_next(&mut self, prev: Link, level: usize, next: Link) {
    match prev {
      None => self.head[level] = next,
      Some(id) => self.arena[id].tower[level] = next,
    }
  }
}

impl<K, V, R> SkipList<K, V, R> {
  /// Moves right on `level` from `prev` while the next key is less than `key`,
  /// returning the last node before `key`.
  #[inline]
  fn walk<Q>(&self, mut prev: Link, level: usize, key: &Q) -> Link
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    while let Some(next) = self.next(prev, level) {
      if self.arena[next].key.borrow() >= key {
        break;
      }
      prev = Some(next);
    }
    prev
  }

  /// Returns the level 0 successor of `prev` if it holds `key`.
  #[inline]
  fn matching<Q>(&self, prev: Link, key: &Q) -> Option<NodeId>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self
      .next(prev, 0)
      .filter(|&id| self.arena[id].key.borrow() == key)
  }

  /// Finds the node holding `key`.
  fn find<Q>(&self, key: &Q) -> Option<NodeId>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let mut prev = None;
    for level in (0..self.height).rev() {
      // The cursor carries over to the level below.
      prev = self.walk(prev, level, key);
    }
    self.matching(prev, key)
  }

  /// Like [`find`](Self::find), but also records the predecessor of `key` on
  /// every level below the current height into `spl`. Entries at or above the
  /// height are left as `None`, i.e. the head.
  fn find_splice<Q>(&self, key: &Q, spl: &mut Splice) -> Option<NodeId>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let mut prev = None;
    for level in (0..self.height).rev() {
      prev = self.walk(prev, level, key);
      spl[level] = prev;
    }
    self.matching(prev, key)
  }

  pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.find(key).map(|id| &self.arena[id].value)
  }

  pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let id = self.find(key)?;
    Some(&mut self.arena[id].value)
  }

  #[inline]
  pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.find(key).is_some()
  }

  /// Removes `key` and returns its value.
  pub(crate) fn pop<Q>(&mut self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let mut spl: Splice = [None; MAX_LEVEL as usize];
    let id = self.find_splice(key, &mut spl)?;

    let level = self.arena[id].level();
    for i in (0..level).rev() {
      let next = self.arena[id].tower[i];
      self.set_next(spl[i], i, next);
    }

    if level == self.height {
      self.shrink(level);
    }

    self.len -= 1;
    Some(self.arena.dealloc(id).value)
  }

  /// Lowers the height past every empty level, starting at `top` and never
  /// going below level 1. Emptiness is read from the head, which is the only
  /// reliable view after an unlink.
  fn shrink(&mut self, top: usize) {
    for level in (1..top).rev() {
      if self.head[level].is_some() {
        break;
      }
      self.height -= 1;
    }

    #[cfg(feature = "tracing")]
    if self.height < top {
      tracing::trace!(from = top, to = self.height, "skiplist height decreased");
    }
  }
}

impl<K, V, R> SkipList<K, V, R>
where
  K: Ord,
  R: RngCore,
{
  /// Inserts `key`, or replaces the value if the key is already present.
  ///
  /// Returns the replaced value. Replacing never changes the structure.
  pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
    let mut spl: Splice = [None; MAX_LEVEL as usize];
    if let Some(id) = self.find_splice(&key, &mut spl) {
      return Some(mem::replace(&mut self.arena[id].value, value));
    }

    let level = self.random_level();
    let id = self.arena.alloc(Node::new(key, value, level));
    for i in (0..level).rev() {
      let next = self.next(spl[i], i);
      self.arena[id].tower[i] = next;
      self.set_next(spl[i], i, Some(id));
    }

    if level > self.height {
      #[cfg(feature = "tracing")]
      tracing::trace!(from = self.height, to = level, "skiplist height increased");
      self.height = level;
    }

    self.len += 1;
    None
  }

  #[inline]
  fn random_level(&mut self) -> usize {
    self.probs.random_level(&mut self.rng)
  }
}

/// Renders every active level, bottom level first, as
/// `level  1 --> k(v) <--> k(v) --> nil`.
pub(crate) struct Dump<'a, K, V, R>(pub(crate) &'a SkipList<K, V, R>);

impl<K, V, R> fmt::Display for Dump<'_, K, V, R>
where
  K: fmt::Display,
  V: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let list = self.0;
    for level in 0..list.height {
      write!(f, "level {:2}", level + 1)?;

      let mut curr = list.head[level];
      let mut sep = " --> ";
      while let Some(id) = curr {
        let node = &list.arena[id];
        write!(f, "{sep}{}({})", node.key, node.value)?;
        sep = " <--> ";
        curr = node.tower[level];
      }

      writeln!(f, " --> nil")?;
    }
    Ok(())
  }
}

#[cfg(test)]
impl<K: Ord, V, R> SkipList<K, V, R> {
  /// Returns the level of every node in key order.
  pub(crate) fn levels(&self) -> Vec<usize> {
    let mut levels = Vec::with_capacity(self.len);
    let mut curr = self.head[0];
    while let Some(id) = curr {
      levels.push(self.arena[id].level());
      curr = self.arena[id].tower[0];
    }
    levels
  }

  /// Panics if any structural invariant is broken.
  pub(crate) fn check_invariants(&self) {
    let levels = self.levels();
    assert_eq!(levels.len(), self.len, "len does not match level 0");
    assert_eq!(self.arena.len(), self.len, "arena holds unreachable nodes");

    for level in 0..self.max_level() {
      let mut curr = self.head[level];
      let mut prev: Option<&K> = None;
      let mut count = 0;

      while let Some(id) = curr {
        let node = &self.arena[id];
        assert!(node.level() > level, "node linked above its own level");
        if let Some(prev) = prev {
          assert!(prev < &node.key, "keys out of order on level {level}");
        }
        prev = Some(&node.key);
        curr = node.tower[level];
        count += 1;
      }

      // Every node tall enough for this level is linked on it.
      let expected = levels.iter().filter(|&&l| l > level).count();
      assert_eq!(count, expected, "level {level} misses nodes");
    }

    let top = levels.iter().copied().max().unwrap_or(1);
    assert_eq!(self.height, top, "height is not the tallest node");
  }
}
