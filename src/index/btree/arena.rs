//! Node arena - slot storage for B-tree nodes.
//!
//! Nodes refer to each other by [`NodeId`] rather than by pointer. Every
//! node has exactly one parent id pointing at it, so the tree shape stays
//! exclusively owned even though the storage is flat.

use crate::common::NodeId;
use crate::index::btree::node::Node;

/// Flat storage for the nodes of one tree.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────────┐
/// │                     NodeArena                     │
/// │  ┌───────────────────────────────────────────┐    │
/// │  │        nodes: Vec<Node<K, V>>             │    │
/// │  │  [Node0] [Node1] [Node2] [Node3] ...      │    │
/// │  └───────────────────────────────────────────┘    │
/// │  ┌──────────────┐  ┌──────────────────────────┐   │
/// │  │  free_list   │  │   released: Vec<bool>    │   │
/// │  │ Vec<NodeId>  │  │   one flag per slot      │   │
/// │  └──────────────┘  └──────────────────────────┘   │
/// └───────────────────────────────────────────────────┘
/// ```
///
/// Released slots are reset to an empty leaf and pushed on the free list.
/// The next allocation pops from the free list before growing `nodes`.
#[derive(Debug)]
pub struct NodeArena<K, V> {
    /// All node slots, live or free.
    nodes: Vec<Node<K, V>>,

    /// Stack of released slot ids (LIFO).
    free_list: Vec<NodeId>,

    /// `released[i]` is true while slot `i` sits on the free list.
    released: Vec<bool>,
}

impl<K, V> NodeArena<K, V> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            released: Vec::new(),
        }
    }

    /// Store `node` and return its id, reusing a free slot if one exists.
    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(node_id) = self.free_list.pop() {
            self.nodes[node_id.0] = node;
            self.released[node_id.0] = false;
            return node_id;
        }

        let node_id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        self.released.push(false);
        node_id
    }

    /// Release the slot at `node_id` and return the node it held.
    ///
    /// The id must not be used again until `alloc` hands it back out.
    pub fn release(&mut self, node_id: NodeId) -> Node<K, V> {
        let node = std::mem::take(&mut self.nodes[node_id.0]);
        self.released[node_id.0] = true;
        self.free_list.push(node_id);
        node
    }

    /// Borrow a node. Panics on an id that was never allocated.
    #[inline]
    pub fn get(&self, node_id: NodeId) -> &Node<K, V> {
        &self.nodes[node_id.0]
    }

    /// Mutably borrow a node. Panics on an id that was never allocated.
    #[inline]
    pub fn get_mut(&mut self, node_id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[node_id.0]
    }

    /// Drop every node and forget all slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.released.clear();
    }

    /// Number of live (allocated, not released) nodes.
    pub fn live_count(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Number of released slots waiting for reuse.
    #[cfg(test)]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// True if `node_id` is currently on the free list.
    pub fn is_free(&self, node_id: NodeId) -> bool {
        self.released.get(node_id.0).copied().unwrap_or(false)
    }
}

impl<K, V> Default for NodeArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_sequential_ids() {
        let mut arena: NodeArena<i32, i32> = NodeArena::new();

        assert_eq!(arena.alloc(Node::new_leaf()), NodeId::new(0));
        assert_eq!(arena.alloc(Node::new_leaf()), NodeId::new(1));
        assert_eq!(arena.live_count(), 2);
        assert_eq!(arena.free_count(), 0);
    }

    #[test]
    fn test_release_and_reuse() {
        let mut arena: NodeArena<i32, i32> = NodeArena::new();
        let a = arena.alloc(Node::new_leaf());
        let b = arena.alloc(Node::new_leaf());

        arena.get_mut(a).insert_entry(0, 1, 100);
        let released = arena.release(a);
        assert_eq!(released.keys(), &[1]);
        assert_eq!(arena.live_count(), 1);
        assert_eq!(arena.free_count(), 1);
        assert!(arena.is_free(a));
        assert!(!arena.is_free(b));

        // Slot is reset and handed back out
        assert!(arena.get(a).is_empty());
        let c = arena.alloc(Node::new_leaf());
        assert_eq!(c, a);
        assert_eq!(arena.free_count(), 0);
        assert_eq!(arena.live_count(), 2);
        assert!(!arena.is_free(c));
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut arena: NodeArena<i32, i32> = NodeArena::new();
        let ids: Vec<NodeId> = (0..3).map(|_| arena.alloc(Node::new_leaf())).collect();

        arena.release(ids[0]);
        arena.release(ids[2]);

        assert_eq!(arena.alloc(Node::new_leaf()), ids[2]);
        assert_eq!(arena.alloc(Node::new_leaf()), ids[0]);
        assert_eq!(arena.alloc(Node::new_leaf()), NodeId::new(3));
    }

    #[test]
    fn test_clear() {
        let mut arena: NodeArena<i32, i32> = NodeArena::new();
        let a = arena.alloc(Node::new_leaf());
        arena.alloc(Node::new_leaf());
        arena.release(a);

        arena.clear();

        assert_eq!(arena.live_count(), 0);
        assert_eq!(arena.free_count(), 0);
        assert!(!arena.is_free(a));
        assert_eq!(arena.alloc(Node::new_leaf()), NodeId::new(0));
    }

    #[test]
    fn test_free_flags_follow_churn() {
        let mut arena: NodeArena<i32, i32> = NodeArena::new();
        let ids: Vec<NodeId> = (0..64).map(|_| arena.alloc(Node::new_leaf())).collect();

        for id in ids.iter().step_by(2) {
            arena.release(*id);
        }
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(arena.is_free(*id), i % 2 == 0, "{}", id);
        }

        // Reallocate half of the released slots
        for _ in 0..16 {
            let id = arena.alloc(Node::new_leaf());
            assert!(!arena.is_free(id));
        }
        let free = ids.iter().filter(|id| arena.is_free(**id)).count();
        assert_eq!(free, 16);
        assert_eq!(free, arena.free_count());

        // Ids past the end were never allocated
        assert!(!arena.is_free(NodeId::new(1000)));
    }
}
