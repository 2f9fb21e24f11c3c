//! Traversal and diagnostics.
//!
//! Not performance critical. These walks back the ordering checks in tests
//! and give a readable picture of the tree's shape while debugging.

use std::collections::VecDeque;
use std::fmt::{Debug, Write};

use crate::common::NodeId;
use crate::index::btree::tree::BTreeIndex;

/// One node as seen by a level-order walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView<'a, K> {
    /// Distance from the root (root is 0).
    pub depth: usize,

    /// The node's keys, in order.
    pub keys: &'a [K],

    pub is_leaf: bool,
}

impl<K: Ord, V> BTreeIndex<K, V> {
    /// All entries in ascending key order.
    pub fn in_order(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        self.collect_in_order(self.root, &mut out);
        out
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        self.in_order().into_iter().map(|(k, _)| k).collect()
    }

    fn collect_in_order<'a>(&'a self, node_id: NodeId, out: &mut Vec<(&'a K, &'a V)>) {
        let node = self.arena.get(node_id);
        for (i, (key, value)) in node.keys().iter().zip(node.values()).enumerate() {
            if !node.is_leaf() {
                self.collect_in_order(node.child(i), out);
            }
            out.push((key, value));
        }
        if !node.is_leaf() {
            self.collect_in_order(node.child(node.len()), out);
        }
    }

    /// Every node in level order (root first, then each level left to right).
    ///
    /// An empty tree yields a single view of the empty root leaf.
    pub fn traverse(&self) -> Vec<NodeView<'_, K>> {
        let mut views = Vec::new();
        let mut queue = VecDeque::from([(self.root, 0)]);

        while let Some((node_id, depth)) = queue.pop_front() {
            let node = self.arena.get(node_id);
            views.push(NodeView {
                depth,
                keys: node.keys(),
                is_leaf: node.is_leaf(),
            });
            queue.extend(node.children().iter().map(|&child| (child, depth + 1)));
        }

        views
    }

    /// Indented rendering of the tree, one node per line.
    ///
    /// ```text
    /// R: [20] L:false
    ///   C0: [10] L:true
    ///   C1: [30, 40] L:true
    /// ```
    pub fn dump(&self) -> String
    where
        K: Debug,
    {
        if self.is_empty() {
            return "<empty>\n".to_string();
        }

        let mut out = String::new();
        self.dump_node(self.root, 0, "R:", &mut out);
        out
    }

    fn dump_node(&self, node_id: NodeId, level: usize, prefix: &str, out: &mut String)
    where
        K: Debug,
    {
        let node = self.arena.get(node_id);
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{}{} {:?} L:{}",
            "  ".repeat(level),
            prefix,
            node.keys(),
            node.is_leaf()
        );
        for (i, &child) in node.children().iter().enumerate() {
            self.dump_node(child, level + 1, &format!("C{}:", i), out);
        }
    }
}
