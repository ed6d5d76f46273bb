use core::{borrow::Borrow, fmt};

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use rand::{rngs::StdRng, RngCore};

use crate::{
  base::{Dump, SkipList},
  Error, Options,
};

/// A reference to a value in a [`SkipMap`].
///
/// The map stays read-locked while the reference is alive, so writers wait
/// until it is dropped.
pub type ValueRef<'a, V> = MappedRwLockReadGuard<'a, V>;

/// An ordered map based on skiplist, safe to share between threads.
///
/// The whole map is guarded by one reader/writer lock: lookups run in
/// parallel, while [`insert`](SkipMap::insert), [`pop`](SkipMap::pop),
/// [`delete`](SkipMap::delete) and [`clear`](SkipMap::clear) are exclusive.
///
/// ## Example
///
/// ```rust
/// use rwskl::sync::SkipMap;
///
/// let map = SkipMap::new();
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// assert_eq!(*map.search(&1).unwrap(), "one");
/// assert_eq!(map.pop(&2), Some("two"));
/// assert_eq!(map.len(), 1);
/// ```
pub struct SkipMap<K, V, R = StdRng> {
  inner: RwLock<SkipList<K, V, R>>,
}

impl<K, V> SkipMap<K, V> {
  /// Creates a new empty map with the default [`Options`], seeded from the
  /// operating system.
  #[inline]
  pub fn new() -> Self {
    let opts = Options::new();
    Self::from_list(SkipList::construct(opts, opts.rng()))
  }

  /// Creates a new empty map with the given [`Options`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use rwskl::{sync::SkipMap, Error, Options};
  ///
  /// let map = SkipMap::<u64, u64>::with_options(Options::new().with_max_level(8)).unwrap();
  /// assert_eq!(map.max_level(), 8);
  ///
  /// let err = SkipMap::<u64, u64>::with_options(Options::new().with_max_level(65)).unwrap_err();
  /// assert_eq!(err, Error::InvalidMaxLevel(65));
  /// ```
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
    Self::from_list(SkipList::construct(Options::new(), rng))
  }

  /// Like [`SkipMap::with_options`], but with a custom random source. The
  /// seed in `opts` is ignored.
  #[inline]
  pub fn with_options_and_rng(opts: Options, rng: R) -> Result<Self, Error> {
    SkipList::with_options_and_rng(opts, rng).map(Self::from_list)
  }

  #[inline]
  fn from_list(list: SkipList<K, V, R>) -> Self {
    Self {
      inner: RwLock::new(list),
    }
  }

  /// Returns the number of entries in the map.
  #[inline]
  pub fn len(&self) -> usize {
    self.inner.read().len()
  }

  /// Returns `true` if the map contains no entries.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.inner.read().is_empty()
  }

  /// Returns the current height, the highest level any entry reaches, or `1`
  /// if the map is empty.
  #[inline]
  pub fn height(&self) -> usize {
    self.inner.read().height()
  }

  /// Returns the maximum level this map was configured with.
  #[inline]
  pub fn max_level(&self) -> usize {
    self.inner.read().max_level()
  }

  /// Returns the promotion probability this map was configured with.
  #[inline]
  pub fn probability(&self) -> f64 {
    self.inner.read().probability()
  }

  /// Returns a reference to the value of `key`.
  ///
  /// The returned guard holds the read lock, see [`ValueRef`].
  pub fn search<Q>(&self, key: &Q) -> Option<ValueRef<'_, V>>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    RwLockReadGuard::try_map(self.inner.read(), |list| list.get(key)).ok()
  }

  /// Returns a copy of the value of `key`, releasing the lock before returning.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use rwskl::sync::SkipMap;
  ///
  /// let map = SkipMap::new();
  /// map.insert("a".to_string(), 1);
  ///
  /// assert_eq!(map.get("a"), Some(1));
  /// assert_eq!(map.get("b"), None);
  /// ```
  pub fn get<Q>(&self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
    V: Clone,
  {
    self.inner.read().get(key).cloned()
  }

  /// Returns `true` if the map contains `key`.
  #[inline]
  pub fn contains_key<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.inner.read().contains_key(key)
  }

  /// Removes `key` from the map, returning its value.
  ///
  /// Popping an absent key returns `None` and leaves the map untouched.
  pub fn pop<Q>(&self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.inner.write().pop(key)
  }

  /// Removes `key` from the map, returning `true` if it was present.
  #[inline]
  pub fn delete<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.pop(key).is_some()
  }

  /// Removes every entry.
  #[inline]
  pub fn clear(&self) {
    self.inner.write().clear()
  }

  /// Renders every level of the map, bottom level first, one line per level.
  ///
  /// For diagnostics only, the format is not stable.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use rwskl::sync::SkipMap;
  ///
  /// let map = SkipMap::<u8, u8>::new();
  /// assert_eq!(map.dump(), "level  1 --> nil\n");
  /// ```
  pub fn dump(&self) -> String
  where
    K: fmt::Display,
    V: fmt::Display,
  {
    Dump(&*self.inner.read()).to_string()
  }
}

impl<K, V, R> SkipMap<K, V, R>
where
  K: Ord,
  R: RngCore,
{
  /// Inserts a key-value pair. If the key already exists, its value is
  /// replaced and the old value returned.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use rwskl::sync::SkipMap;
  ///
  /// let map = SkipMap::new();
  /// assert_eq!(map.insert(1, "a"), None);
  /// assert_eq!(map.insert(1, "b"), Some("a"));
  /// assert_eq!(map.len(), 1);
  /// ```
  pub fn insert(&self, key: K, value: V) -> Option<V> {
    self.inner.write().insert(key, value)
  }
}

impl<K, V, R> fmt::Debug for SkipMap<K, V, R>
where
  K: fmt::Debug,
  V: fmt::Debug,
  R: fmt::Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SkipMap")
      .field("inner", &self.inner)
      .finish()
  }
}
