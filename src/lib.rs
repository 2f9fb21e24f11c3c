//! btindex - an in-memory B-tree ordered index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            btindex                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              BTreeIndex (index/btree/tree)               │   │
//! │  │    search │ insert / upsert │ delete / remove            │   │
//! │  │      root grow on full root │ root shrink on empty root  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Node operations (index/btree/node)             │   │
//! │  │   find │ split │ merge │ borrow-left │ borrow-right        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             NodeArena (index/btree/arena)                │   │
//! │  │        Vec<Node> slots addressed by NodeId + free list   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                                                                 │
//! │  Diagnostics: traverse / in_order / dump / validate / stats     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Degree, NodeId, Error)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use btindex::BTreeIndex;
//!
//! // t = 2: every node holds 1 to 3 keys
//! let mut index = BTreeIndex::new(2)?;
//! for (id, name) in [(10, "Priya"), (20, "Rohan"), (30, "Aisha"), (40, "Vikram")] {
//!     index.insert(id, name)?;
//! }
//!
//! assert_eq!(index.search(&30), Some(&"Aisha"));
//! assert_eq!(index.search(&18), None);
//! assert!(index.delete(&30));
//! index.validate()?;
//! # Ok::<(), btindex::Error>(())
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};
pub use common::{Degree, Error, NodeId, Result};

pub use index::btree::{BTreeIndex, IndexStats, NodeView};
