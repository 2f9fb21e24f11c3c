//! Node - a single B-tree node.
//!
//! A [`Node`] holds a sorted run of keys, their values, and (for internal
//! nodes) the ids of its children. Everything here is node-local: operations
//! that touch a parent and its children together live in the tree module and
//! are built from the pieces below.

use crate::common::{Degree, NodeId};

/// A node in the B-tree.
///
/// # Layout
/// ```text
///            keys:     [ k0 | k1 | k2 ]
///            values:   [ v0 | v1 | v2 ]
///   children:       c0   c1   c2   c3
/// ```
/// `children[i]` holds keys strictly between `keys[i-1]` and `keys[i]`.
/// A node is a leaf iff it has no children.
#[derive(Debug)]
pub struct Node<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) children: Vec<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Create an empty leaf.
    pub fn new_leaf() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty internal node whose only child is `child`.
    ///
    /// Used when the root is full and the tree grows a level.
    pub fn new_root_above(child: NodeId) -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children: vec![child],
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of keys stored in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True if the node holds `2t - 1` keys and must be split before an
    /// insert may descend into it.
    #[inline]
    pub fn is_full(&self, degree: Degree) -> bool {
        self.keys.len() >= degree.max_keys()
    }

    /// True if the node holds more than the minimum, so one key can be taken
    /// from it without underflow.
    #[inline]
    pub fn can_lend(&self, degree: Degree) -> bool {
        self.keys.len() >= degree.get()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Child id at `idx`. Panics if `idx` is out of range.
    #[inline]
    pub fn child(&self, idx: usize) -> NodeId {
        self.children[idx]
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Binary-search this node for `key`.
    ///
    /// Returns `Ok(i)` if `keys[i] == key`, otherwise `Err(i)` where `i` is
    /// the smallest index with `keys[i] > key` (the child to descend into).
    #[inline]
    pub fn find(&self, key: &K) -> Result<usize, usize>
    where
        K: Ord,
    {
        self.keys.binary_search_by(|probe| probe.cmp(key))
    }

    // ========================================================================
    // Entry insert / remove
    // ========================================================================

    /// Insert an entry at `idx`, shifting later entries right.
    pub fn insert_entry(&mut self, idx: usize, key: K, value: V) {
        self.keys.insert(idx, key);
        self.values.insert(idx, value);
    }

    /// Remove and return the entry at `idx`.
    pub fn remove_entry(&mut self, idx: usize) -> (K, V) {
        (self.keys.remove(idx), self.values.remove(idx))
    }

    /// Swap the entry at `idx` for a new one, returning the old entry.
    pub fn replace_entry(&mut self, idx: usize, key: K, value: V) -> (K, V) {
        (
            std::mem::replace(&mut self.keys[idx], key),
            std::mem::replace(&mut self.values[idx], value),
        )
    }

    /// Remove the first entry and, for internal nodes, the first child.
    ///
    /// The caller guarantees the node is non-empty.
    pub fn pop_front(&mut self) -> (K, V, Option<NodeId>) {
        let (key, value) = self.remove_entry(0);
        let child = if self.is_leaf() {
            None
        } else {
            Some(self.children.remove(0))
        };
        (key, value, child)
    }

    /// Remove the last entry and, for internal nodes, the last child.
    ///
    /// The caller guarantees the node is non-empty.
    pub fn pop_back(&mut self) -> (K, V, Option<NodeId>) {
        let last = self.keys.len() - 1;
        let (key, value) = self.remove_entry(last);
        let child = if self.is_leaf() {
            None
        } else {
            let last_child = self.children.len() - 1;
            Some(self.children.remove(last_child))
        };
        (key, value, child)
    }

    /// Prepend an entry and (if given) a leading child.
    pub fn push_front(&mut self, key: K, value: V, child: Option<NodeId>) {
        self.insert_entry(0, key, value);
        if let Some(child) = child {
            self.children.insert(0, child);
        }
    }

    /// Append an entry and (if given) a trailing child.
    pub fn push_back(&mut self, key: K, value: V, child: Option<NodeId>) {
        self.keys.push(key);
        self.values.push(value);
        if let Some(child) = child {
            self.children.push(child);
        }
    }

    // ========================================================================
    // Split / merge
    // ========================================================================

    /// Split a full node around its median.
    ///
    /// `self` keeps entries `[0, t-1)` and children `[0, t)`. The returned node
    /// takes entries `[t, 2t-1)` and children `[t, 2t)`. The median entry at
    /// `t-1` is returned for promotion into the parent. Both halves end up
    /// with exactly `t - 1` keys.
    pub fn split_upper(&mut self, degree: Degree) -> (K, V, Node<K, V>) {
        let t = degree.get();
        debug_assert_eq!(self.keys.len(), degree.max_keys());

        let upper = Node {
            keys: self.keys.split_off(t),
            values: self.values.split_off(t),
            children: if self.is_leaf() {
                Vec::new()
            } else {
                self.children.split_off(t)
            },
        };
        let (median_key, median_value) = self.remove_entry(t - 1);

        (median_key, median_value, upper)
    }

    /// Absorb a separator entry and the whole right sibling into this node.
    ///
    /// After the call `self` holds `self ++ [separator] ++ right`.
    pub fn merge_with(&mut self, separator_key: K, separator_value: V, right: Node<K, V>) {
        self.keys.push(separator_key);
        self.values.push(separator_value);
        self.keys.extend(right.keys);
        self.values.extend(right.values);
        self.children.extend(right.children);
    }
}

impl<K, V> Default for Node<K, V> {
    fn default() -> Self {
        Self::new_leaf()
    }
}
