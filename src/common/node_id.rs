//! Handles for B-tree nodes.

use std::fmt;

/// A slot in a tree's node arena.
///
/// Parent nodes hold their children as `NodeId`s instead of owning pointers,
/// and the arena resolves an id to its node by position. An id is only
/// meaningful for the tree that allocated it.
///
/// Ids are not generations: once a node is released its slot goes on the
/// arena's free list, and the next allocation may hand the same id out for
/// an unrelated node. Tree code drops every copy of an id before releasing
/// its slot.
///
/// # Example
/// ```
/// use btindex::NodeId;
///
/// let slot = NodeId::new(3);
/// assert_eq!(slot.0, 3);
/// assert_eq!(slot.to_string(), "Node(3)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Wrap an arena slot position.
    #[inline]
    pub fn new(slot: usize) -> Self {
        NodeId(slot)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::index::btree::arena::NodeArena;
    use crate::index::btree::node::Node;

    #[test]
    fn test_node_id_is_arena_position() {
        let mut arena: NodeArena<u8, ()> = NodeArena::new();
        let ids: Vec<NodeId> = (0..3).map(|_| arena.alloc(Node::new_leaf())).collect();
        assert_eq!(ids, vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)]);
    }

    #[test]
    fn test_released_id_is_handed_out_again() {
        let mut arena: NodeArena<u8, ()> = NodeArena::new();
        let first = arena.alloc(Node::new_leaf());
        arena.alloc(Node::new_leaf());

        arena.release(first);
        assert_eq!(arena.alloc(Node::new_leaf()), first);
    }

    #[test]
    fn test_node_id_tracks_visits() {
        // validate() relies on ids hashing by slot
        let mut seen = HashSet::new();
        assert!(seen.insert(NodeId::new(7)));
        assert!(!seen.insert(NodeId::new(7)));
        assert!(seen.insert(NodeId::new(8)));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(format!("{}", NodeId::new(42)), "Node(42)");
    }
}
