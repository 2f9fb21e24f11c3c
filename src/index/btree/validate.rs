//! Structural invariant checking.
//!
//! [`BTreeIndex::validate`] walks the whole tree and reports the first broken
//! invariant as `Error::InvariantViolation`. It exists for tests and
//! debugging; correct tree code never trips it.

use std::collections::HashSet;

use crate::common::{Error, NodeId, Result};
use crate::index::btree::tree::BTreeIndex;

/// Exclusive key bounds inherited from ancestors while walking down.
struct Bounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

impl<K: Ord, V> BTreeIndex<K, V> {
    /// Check every structural invariant of the tree.
    ///
    /// - keys within a node are strictly ascending
    /// - every key in `children[i]` lies strictly between `keys[i-1]` and
    ///   `keys[i]` (which also makes keys globally unique)
    /// - all leaves sit at the same depth
    /// - non-root nodes hold `t-1 ..= 2t-1` keys, the root `0 ..= 2t-1`, and
    ///   only an empty tree has an empty root
    /// - `values` match `keys` in length and internal nodes have one more
    ///   child than keys
    /// - every live node is reachable from the root exactly once
    /// - the cached entry count matches the keys in the tree
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first failure found
    pub fn validate(&self) -> Result<()> {
        let mut visited = HashSet::new();
        let mut leaf_depth = None;
        let bounds = Bounds {
            lower: None,
            upper: None,
        };

        let count = self.validate_node(self.root, 0, bounds, &mut visited, &mut leaf_depth)?;

        if count != self.len {
            return Err(violation(format!(
                "tree holds {} keys but len is {}",
                count, self.len
            )));
        }
        if visited.len() != self.arena.live_count() {
            return Err(violation(format!(
                "{} nodes reachable from root but {} live in arena",
                visited.len(),
                self.arena.live_count()
            )));
        }

        Ok(())
    }

    /// Validate the subtree at `node_id`, returning how many keys it holds.
    fn validate_node<'a>(
        &'a self,
        node_id: NodeId,
        depth: usize,
        bounds: Bounds<'a, K>,
        visited: &mut HashSet<NodeId>,
        leaf_depth: &mut Option<usize>,
    ) -> Result<usize> {
        if !visited.insert(node_id) {
            return Err(violation(format!("{} is reachable twice", node_id)));
        }
        if self.arena.is_free(node_id) {
            return Err(violation(format!("{} is linked but was released", node_id)));
        }

        let node = self.arena.get(node_id);
        let is_root = node_id == self.root;

        // Shape
        if node.values().len() != node.len() {
            return Err(violation(format!(
                "{} has {} keys but {} values",
                node_id,
                node.len(),
                node.values().len()
            )));
        }
        if !node.is_leaf() && node.children().len() != node.len() + 1 {
            return Err(violation(format!(
                "{} has {} keys but {} children",
                node_id,
                node.len(),
                node.children().len()
            )));
        }

        // Occupancy
        let max = self.degree.max_keys();
        let min = if is_root { 0 } else { self.degree.min_keys() };
        if node.len() < min || node.len() > max {
            return Err(violation(format!(
                "{} at depth {} has {} keys, allowed {}..={}",
                node_id,
                depth,
                node.len(),
                min,
                max
            )));
        }
        if is_root && node.is_empty() && !node.is_leaf() {
            return Err(violation(format!("internal root {} has no keys", node_id)));
        }

        // Ordering within the node and against ancestor bounds
        if node.keys().windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(violation(format!("{} keys are not strictly ascending", node_id)));
        }
        if let (Some(lower), Some(first)) = (bounds.lower, node.keys().first()) {
            if first <= lower {
                return Err(violation(format!(
                    "{} holds a key not above its left separator",
                    node_id
                )));
            }
        }
        if let (Some(upper), Some(last)) = (bounds.upper, node.keys().last()) {
            if last >= upper {
                return Err(violation(format!(
                    "{} holds a key not below its right separator",
                    node_id
                )));
            }
        }

        if node.is_leaf() {
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(violation(format!(
                        "leaf {} at depth {} but other leaves at depth {}",
                        node_id, depth, expected
                    )));
                }
                Some(_) => {}
            }
            return Ok(node.len());
        }

        let mut count = node.len();
        for (i, &child) in node.children().iter().enumerate() {
            let child_bounds = Bounds {
                lower: if i == 0 { bounds.lower } else { node.keys().get(i - 1) },
                upper: node.keys().get(i).or(bounds.upper),
            };
            count += self.validate_node(child, depth + 1, child_bounds, visited, leaf_depth)?;
        }

        Ok(count)
    }
}

fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}
