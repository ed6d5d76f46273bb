/// Index of a node in the [`Arena`](super::arena::Arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
  #[inline]
  pub(super) const fn new(index: usize) -> Self {
    Self(index)
  }

  #[inline]
  pub(super) const fn index(self) -> usize {
    self.0
  }
}

/// Link to the next node on one level, `None` terminates the level.
pub(crate) type Link = Option<NodeId>;

/// A stored key/value pair with one forward link per level it participates in.
///
/// The tower is sized to the sampled level when the node is created and is
/// never resized.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
  pub(crate) key: K,
  pub(crate) value: V,
  pub(crate) tower: Box<[Link]>,
}

impl<K, V> Node<K, V> {
  #[inline]
  pub(crate) fn new(key: K, value: V, level: usize) -> Self {
    Self {
      key,
      value,
      tower: vec![None; level].into_boxed_slice(),
    }
  }

  /// Returns the number of levels this node participates in.
  #[inline]
  pub(crate) fn level(&self) -> usize {
    self.tower.len()
  }
}
