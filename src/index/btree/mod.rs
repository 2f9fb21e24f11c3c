//! B-tree index implementation.
//!
//! # Components
//! - [`BTreeIndex`] - The ordered index: search, insert, delete
//! - [`IndexStats`] - Counters for splits, merges, borrows and height changes
//! - [`NodeView`] - One node as reported by a level-order walk
//!
//! Nodes and the arena that stores them are internal; callers only ever see
//! keys, values and [`NodeView`]s.

pub(crate) mod arena;
pub(crate) mod node;
mod stats;
mod traverse;
mod tree;
mod validate;

pub use stats::IndexStats;
pub use traverse::NodeView;
pub use tree::BTreeIndex;
