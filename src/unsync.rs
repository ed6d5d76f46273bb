use core::{borrow::Borrow, fmt};

use rand::{rngs::StdRng, RngCore};

use crate::{
  base::{Dump, SkipList},
  Error, Options,
};

/// An ordered map based on skiplist, without internal locking.
///
/// Mutation takes `&mut self`, so the borrow checker provides the exclusion
/// that [`sync::SkipMap`](crate::sync::SkipMap) gets from its lock. Use this
/// map when it is owned by a single thread, or wrap it in a lock of your own.
///
/// ## Example
///
/// ```rust
/// use rwskl::{unsync::SkipMap, Options};
///
/// let mut map = SkipMap::with_options(Options::new().with_seed(2)).unwrap();
/// map.insert(3, "c");
/// map.insert(1, "a");
///
/// assert_eq!(map.search(&1), Some(&"a"));
/// assert_eq!(map.pop(&3), Some("c"));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Debug)]
pub struct SkipMap<K, V, R = StdRng>(SkipList<K, V, R>);

impl<K, V> SkipMap<K, V> {
  /// Creates a new empty map with the default [`Options`], seeded from the
  /// operating system.
  #[inline]
  pub fn new() -> Self {
    let opts = Options::new();
    Self(SkipList::construct(opts, opts.rng()))
  }

  /// Creates a new empty map with the given [`Options`].
  ///
  /// Returns an error if any option is out of range.
  #[inline]
  pub fn with_options(opts: Options) -> Result<Self, Error> {
    Self::with_options_and_rng(opts, opts.rng())
  }
}

impl<K, V> Default for SkipMap<K, V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V, R> SkipMap<K, V, R> {
  /// Like [`SkipMap::new`], but with a custom random source.
  #[inline]
  pub fn with_rng(rng: R) -> Self {
    Self(SkipList::construct(Options::new(), rng))
  }

  /// Like [`SkipMap::with_options`], but with a custom random source. The
  /// seed in `opts` is ignored.
  #[inline]
  pub fn with_options_and_rng(opts: Options, rng: R) -> Result<Self, Error> {
    SkipList::with_options_and_rng(opts, rng).map(Self)
  }

  /// Returns the number of entries in the map.
  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns `true` if the map contains no entries.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Returns the current height, the highest level any entry reaches, or `1`
  /// if the map is empty.
  #[inline]
  pub fn height(&self) -> usize {
    self.0.height()
  }

  /// Returns the maximum level this map was configured with.
  #[inline]
  pub fn max_level(&self) -> usize {
    self.0.max_level()
  }

  /// Returns the promotion probability this map was configured with.
  #[inline]
  pub fn probability(&self) -> f64 {
    self.0.probability()
  }

  /// Returns a reference to the value of `key`.
  #[inline]
  pub fn search<Q>(&self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.0.get(key)
  }

  /// Returns a mutable reference to the value of `key`.
  #[inline]
  pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.0.get_mut(key)
  }

  /// Returns `true` if the map contains `key`.
  #[inline]
  pub fn contains_key<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.0.contains_key(key)
  }

  /// Removes `key` from the map, returning its value.
  #[inline]
  pub fn pop<Q>(&mut self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.0.pop(key)
  }

  /// Removes `key` from the map, returning `true` if it was present.
  #[inline]
  pub fn delete<Q>(&mut self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.0.pop(key).is_some()
  }

  /// Removes every entry.
  #[inline]
  pub fn clear(&mut self) {
    self.0.clear()
  }

  /// Renders every level of the map, bottom level first. Same text as the
  /// [`Display`](fmt::Display) implementation.
  #[inline]
  pub fn dump(&self) -> String
  where
    K: fmt::Display,
    V: fmt::Display,
  {
    self.to_string()
  }
}

impl<K, V, R> SkipMap<K, V, R>
where
  K: Ord,
  R: RngCore,
{
  /// Inserts a key-value pair. If the key already exists, its value is
  /// replaced and the old value returned.
  #[inline]
  pub fn insert(&mut self, key: K, value: V) -> Option<V> {
    self.0.insert(key, value)
  }
}

impl<K, V, R> fmt::Display for SkipMap<K, V, R>
where
  K: fmt::Display,
  V: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&Dump(&self.0), f)
  }
}
