use core::ops::{Index, IndexMut};

use super::node::{Node, NodeId};

/// Slot table that owns every node of a skiplist.
///
/// Links between nodes are [`NodeId`]s into this table. Vacated slots are
/// recycled through a free list, so ids stay stable for the lifetime of the
/// node they were handed out for.
#[derive(Debug)]
pub(crate) struct Arena<K, V> {
  slots: Vec<Option<Node<K, V>>>,
  free: Vec<NodeId>,
}

impl<K, V> Default for Arena<K, V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> Arena<K, V> {
  #[inline]
  pub(crate) const fn new() -> Self {
    Self {
      slots: Vec::new(),
      free: Vec::new(),
    }
  }

  /// Returns the number of live nodes.
  #[cfg(test)]
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.slots.len() - self.free.len()
  }

  pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
    match self.free.pop() {
      Some(id) => {
        self.slots[id.index()] = Some(node);
        id
      }
      None => {
        let id = NodeId::new(self.slots.len());
        self.slots.push(Some(node));
        id
      }
    }
  }

  /// Takes the node out of its slot and marks the slot reusable.
  ///
  /// The node must already be unlinked from every level.
  pub(crate) fn dealloc(&mut self, id: NodeId) -> Node<K, V> {
    match self.slots[id.index()].take() {
      Some(node) => {
        self.free.push(id);
        node
      }
      None => vacant(id),
    }
  }

  /// Drops every node.
  #[inline]
  pub(crate) fn clear(&mut self) {
    self.slots.clear();
    self.free.clear();
  }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
  type Output = Node<K, V>;

  #[inline]
  fn index(&self, id: NodeId) -> &Self::Output {
    match &self.slots[id.index()] {
      Some(node) => node,
      None => vacant(id),
    }
  }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
  #[inline]
  fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
    match &mut self.slots[id.index()] {
      Some(node) => node,
      None => vacant(id),
    }
  }
}

#[cold]
#[inline(never)]
fn vacant(id: NodeId) -> ! {
  panic!("skiplist link points to vacant slot {}", id.index())
}
