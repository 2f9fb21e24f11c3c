//! BTreeIndex - the ordered index.
//!
//! The [`BTreeIndex`] provides:
//! - Logarithmic search, insert and delete over a totally ordered key
//! - Proactive top-down splitting on insert
//! - Borrow / merge rebalancing on delete, before descending
//! - Root growth and root shrinkage as the only height changes

use std::mem;

use tracing::{debug, trace};

use crate::common::{Degree, Error, NodeId, Result};
use crate::index::btree::arena::NodeArena;
use crate::index::btree::node::Node;
use crate::index::btree::stats::IndexStats;

/// An in-memory B-tree mapping unique keys to opaque values.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                        BTreeIndex                           │
/// │  ┌──────────────┐  ┌───────────────────────────────────┐   │
/// │  │    root      │  │       arena: NodeArena<K, V>      │   │
/// │  │   NodeId     │─▶│  [Node0] [Node1] [Node2] ...      │   │
/// │  └──────────────┘  └───────────────────────────────────┘   │
/// │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐      │
/// │  │   degree     │  │     len      │  │    stats     │      │
/// │  │   Degree     │  │    usize     │  │  IndexStats  │      │
/// │  └──────────────┘  └──────────────┘  └──────────────┘      │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Duplicate keys
/// [`insert`](Self::insert) rejects a key that is already present with
/// `Error::DuplicateKey` and leaves the tree untouched.
/// [`upsert`](Self::upsert) overwrites the value in place instead.
///
/// # Usage
/// ```
/// use btindex::BTreeIndex;
///
/// let mut index = BTreeIndex::new(2)?;
/// index.insert(10, "ten")?;
/// index.insert(20, "twenty")?;
///
/// assert_eq!(index.search(&10), Some(&"ten"));
/// assert!(index.delete(&10));
/// assert_eq!(index.search(&10), None);
/// # Ok::<(), btindex::Error>(())
/// ```
#[derive(Debug)]
pub struct BTreeIndex<K, V> {
    /// Storage for every node in the tree.
    pub(crate) arena: NodeArena<K, V>,

    /// The root node. Always allocated; an empty leaf when the tree is empty.
    pub(crate) root: NodeId,

    /// Minimum degree `t` (immutable after construction).
    pub(crate) degree: Degree,

    /// Number of entries in the tree.
    pub(crate) len: usize,

    /// Restructuring counters.
    stats: IndexStats,
}

impl<K: Ord, V> BTreeIndex<K, V> {
    /// Create an empty index with minimum degree `t`.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `t < 2` or `2t - 1` overflows `usize`
    pub fn new(t: usize) -> Result<Self> {
        Ok(Self::with_degree(Degree::new(t)?))
    }

    /// Create an empty index with an already validated degree.
    pub fn with_degree(degree: Degree) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::new_leaf());

        Self {
            arena,
            root,
            degree,
            len: 0,
            stats: IndexStats::new(),
        }
    }

    // ========================================================================
    // Public API: Info
    // ========================================================================

    /// The minimum degree this tree was built with.
    pub fn degree(&self) -> Degree {
        self.degree
    }

    /// Number of entries in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels. An empty tree (a lone empty leaf) has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self.arena.get(self.root);
        while !node.is_leaf() {
            node = self.arena.get(node.child(0));
            height += 1;
        }
        height
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.arena.live_count()
    }

    /// Restructuring counters since construction or the last reset.
    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Remove every entry, leaving a single empty leaf root.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = self.arena.alloc(Node::new_leaf());
        self.len = 0;
    }

    // ========================================================================
    // Public API: Search
    // ========================================================================

    /// Look up the value stored under `key`.
    pub fn search(&self, key: &K) -> Option<&V> {
        let (node_id, idx) = self.locate(key)?;
        Some(&self.arena.get(node_id).values[idx])
    }

    /// Look up the value stored under `key` for in-place modification.
    pub fn search_mut(&mut self, key: &K) -> Option<&mut V> {
        let (node_id, idx) = self.locate(key)?;
        Some(&mut self.arena.get_mut(node_id).values[idx])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// The smallest entry, found by following first children to a leaf.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.arena.get(self.root);
        while !node.is_leaf() {
            node = self.arena.get(node.child(0));
        }
        Some((node.keys.first()?, node.values.first()?))
    }

    /// The largest entry, found by following last children to a leaf.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.arena.get(self.root);
        while !node.is_leaf() {
            node = self.arena.get(node.child(node.children.len() - 1));
        }
        Some((node.keys.last()?, node.values.last()?))
    }

    /// Find the node and slot holding `key`.
    fn locate(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut node_id = self.root;
        loop {
            let node = self.arena.get(node_id);
            match node.find(key) {
                Ok(idx) => return Some((node_id, idx)),
                Err(_) if node.is_leaf() => return None,
                Err(idx) => node_id = node.child(idx),
            }
        }
    }

    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert a new entry.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if `key` is already present. The tree is not
    ///   modified in that case.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }
        self.insert_absent(key, value);
        Ok(())
    }

    /// Insert an entry, overwriting the value if the key already exists.
    ///
    /// Returns the previous value, if any. An overwrite never changes the
    /// tree's shape.
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.search_mut(&key) {
            return Some(mem::replace(slot, value));
        }
        self.insert_absent(key, value);
        None
    }

    /// Insert a key known not to be in the tree.
    fn insert_absent(&mut self, key: K, value: V) {
        if self.arena.get(self.root).is_full(self.degree) {
            self.grow_root();
        }
        self.insert_non_full(self.root, key, value);
        self.len += 1;
    }

    /// Wrap the full root in a new empty root and split it.
    ///
    /// This is the only place the tree gets taller.
    fn grow_root(&mut self) {
        let old_root = self.root;
        let new_root = self.arena.alloc(Node::new_root_above(old_root));
        self.split_child(new_root, 0);
        self.root = new_root;
        self.stats.root_grows += 1;

        debug!(root = %new_root, height = self.height(), "root split, tree grew");
    }

    /// Descend from `node_id` (which has room) to a leaf, splitting any full
    /// child before stepping into it.
    fn insert_non_full(&mut self, mut node_id: NodeId, key: K, value: V) {
        loop {
            let node = self.arena.get(node_id);
            let mut idx = match node.find(&key) {
                Ok(idx) | Err(idx) => idx,
            };

            if node.is_leaf() {
                self.arena.get_mut(node_id).insert_entry(idx, key, value);
                return;
            }

            if self.arena.get(node.child(idx)).is_full(self.degree) {
                self.split_child(node_id, idx);
                // The promoted median now sits at idx
                if self.arena.get(node_id).keys[idx] < key {
                    idx += 1;
                }
            }

            node_id = self.arena.get(node_id).child(idx);
        }
    }

    /// Split the full child at `children[idx]` of `parent_id`.
    ///
    /// The child's median moves up into the parent at `idx`; the new right
    /// half is linked at `children[idx + 1]`.
    fn split_child(&mut self, parent_id: NodeId, idx: usize) {
        let degree = self.degree;
        let child_id = self.arena.get(parent_id).child(idx);

        let (median_key, median_value, upper) = self.arena.get_mut(child_id).split_upper(degree);
        let upper_id = self.arena.alloc(upper);

        let parent = self.arena.get_mut(parent_id);
        parent.insert_entry(idx, median_key, median_value);
        parent.children.insert(idx + 1, upper_id);

        self.stats.splits += 1;
        trace!(parent = %parent_id, child = %child_id, sibling = %upper_id, "split full child");
    }

    // ========================================================================
    // Public API: Delete
    // ========================================================================

    /// Delete `key`. Returns whether it was present.
    ///
    /// Deleting an absent key leaves the tree unchanged.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Delete `key` and return its value, if it was present.
    ///
    /// An absent key returns `None` before any rebalancing happens, so a miss
    /// never reshapes the tree.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }

        let removed = self.remove_from(self.root, key)?;
        self.len -= 1;
        self.shrink_root();

        Some(removed)
    }

    /// Replace an empty internal root with its only child.
    ///
    /// This is the only place the tree gets shorter.
    fn shrink_root(&mut self) {
        let root = self.arena.get(self.root);
        if !root.is_empty() || root.is_leaf() {
            return;
        }

        let old_root = self.root;
        self.root = root.child(0);
        self.arena.release(old_root);
        self.stats.root_shrinks += 1;

        debug!(root = %self.root, height = self.height(), "empty root removed, tree shrank");
    }

    /// Remove `key` from the subtree at `node_id`.
    ///
    /// Precondition: `node_id` is the root or holds at least `t` keys, so one
    /// removal inside it cannot underflow it.
    fn remove_from(&mut self, node_id: NodeId, key: &K) -> Option<V> {
        let node = self.arena.get(node_id);
        match node.find(key) {
            Ok(idx) if node.is_leaf() => {
                let (_, value) = self.arena.get_mut(node_id).remove_entry(idx);
                Some(value)
            }
            Ok(idx) => self.remove_from_internal(node_id, idx, key),
            Err(_) if node.is_leaf() => None,
            Err(idx) => {
                let target = self.ensure_child_can_lend(node_id, idx);
                let child_id = self.arena.get(node_id).child(target);
                self.remove_from(child_id, key)
            }
        }
    }

    /// Remove the key stored at `keys[idx]` of the internal node `node_id`.
    fn remove_from_internal(&mut self, node_id: NodeId, idx: usize, key: &K) -> Option<V> {
        let node = self.arena.get(node_id);
        let left_id = node.child(idx);
        let right_id = node.child(idx + 1);

        if self.arena.get(left_id).can_lend(self.degree) {
            let (pred_key, pred_value) = self.pop_max(left_id);
            let (_, value) = self.arena.get_mut(node_id).replace_entry(idx, pred_key, pred_value);
            return Some(value);
        }

        if self.arena.get(right_id).can_lend(self.degree) {
            let (succ_key, succ_value) = self.pop_min(right_id);
            let (_, value) = self.arena.get_mut(node_id).replace_entry(idx, succ_key, succ_value);
            return Some(value);
        }

        // Both neighbours are minimal: pull the key down into a merged node
        self.merge_children(node_id, idx);
        self.remove_from(left_id, key)
    }

    /// Remove and return the largest entry in the subtree at `node_id`
    /// (the in-order predecessor of its parent separator).
    ///
    /// Same precondition as [`remove_from`](Self::remove_from).
    fn pop_max(&mut self, mut node_id: NodeId) -> (K, V) {
        loop {
            let node = self.arena.get(node_id);
            if node.is_leaf() {
                let (key, value, _) = self.arena.get_mut(node_id).pop_back();
                return (key, value);
            }
            let last = node.children.len() - 1;
            let target = self.ensure_child_can_lend(node_id, last);
            node_id = self.arena.get(node_id).child(target);
        }
    }

    /// Remove and return the smallest entry in the subtree at `node_id`
    /// (the in-order successor of its parent separator).
    fn pop_min(&mut self, mut node_id: NodeId) -> (K, V) {
        loop {
            let node = self.arena.get(node_id);
            if node.is_leaf() {
                let (key, value, _) = self.arena.get_mut(node_id).pop_front();
                return (key, value);
            }
            let target = self.ensure_child_can_lend(node_id, 0);
            node_id = self.arena.get(node_id).child(target);
        }
    }

    // ========================================================================
    // Internal: Rebalancing
    // ========================================================================

    /// Make sure `children[idx]` of `parent_id` has at least `t` keys before
    /// the caller descends into it.
    ///
    /// Returns the index of the child to descend into. This is `idx` unless
    /// the child was merged into its left sibling, in which case it is
    /// `idx - 1`.
    fn ensure_child_can_lend(&mut self, parent_id: NodeId, idx: usize) -> usize {
        let parent = self.arena.get(parent_id);
        if self.arena.get(parent.child(idx)).can_lend(self.degree) {
            return idx;
        }

        let has_left = idx > 0;
        let has_right = idx + 1 < parent.children.len();

        if has_left && self.arena.get(parent.child(idx - 1)).can_lend(self.degree) {
            self.borrow_from_left(parent_id, idx);
            idx
        } else if has_right && self.arena.get(parent.child(idx + 1)).can_lend(self.degree) {
            self.borrow_from_right(parent_id, idx);
            idx
        } else if has_left {
            self.merge_children(parent_id, idx - 1);
            idx - 1
        } else {
            self.merge_children(parent_id, idx);
            idx
        }
    }

    /// Rotate one entry from `children[idx - 1]` through the parent into
    /// `children[idx]`.
    ///
    /// The parent separator moves down to the front of the child; the left
    /// sibling's last entry moves up to replace it; the sibling's last child
    /// (if any) becomes the child's first child.
    fn borrow_from_left(&mut self, parent_id: NodeId, idx: usize) {
        let parent = self.arena.get(parent_id);
        let child_id = parent.child(idx);
        let left_id = parent.child(idx - 1);

        let (up_key, up_value, moved_child) = self.arena.get_mut(left_id).pop_back();
        let (down_key, down_value) = self
            .arena
            .get_mut(parent_id)
            .replace_entry(idx - 1, up_key, up_value);
        self.arena
            .get_mut(child_id)
            .push_front(down_key, down_value, moved_child);

        self.stats.borrows_left += 1;
        trace!(parent = %parent_id, child = %child_id, sibling = %left_id, "borrowed from left sibling");
    }

    /// Rotate one entry from `children[idx + 1]` through the parent into
    /// `children[idx]`.
    fn borrow_from_right(&mut self, parent_id: NodeId, idx: usize) {
        let parent = self.arena.get(parent_id);
        let child_id = parent.child(idx);
        let right_id = parent.child(idx + 1);

        let (up_key, up_value, moved_child) = self.arena.get_mut(right_id).pop_front();
        let (down_key, down_value) = self
            .arena
            .get_mut(parent_id)
            .replace_entry(idx, up_key, up_value);
        self.arena
            .get_mut(child_id)
            .push_back(down_key, down_value, moved_child);

        self.stats.borrows_right += 1;
        trace!(parent = %parent_id, child = %child_id, sibling = %right_id, "borrowed from right sibling");
    }

    /// Merge `children[idx + 1]` and the separator `keys[idx]` into
    /// `children[idx]`.
    ///
    /// The parent loses one key and one child; the right node's slot is
    /// released.
    fn merge_children(&mut self, parent_id: NodeId, idx: usize) {
        let parent = self.arena.get_mut(parent_id);
        let left_id = parent.child(idx);
        let right_id = parent.children.remove(idx + 1);
        let (separator_key, separator_value) = parent.remove_entry(idx);

        let right = self.arena.release(right_id);
        self.arena
            .get_mut(left_id)
            .merge_with(separator_key, separator_value, right);

        self.stats.merges += 1;
        trace!(parent = %parent_id, child = %left_id, absorbed = %right_id, "merged siblings");
    }
}

impl<K: Ord, V> Default for BTreeIndex<K, V> {
    fn default() -> Self {
        Self::with_degree(Degree::DEFAULT)
    }
}
