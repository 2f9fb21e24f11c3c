//! Index structures.
//!
//! - [`btree`] - In-memory B-tree keyed by any totally ordered type

pub mod btree;
