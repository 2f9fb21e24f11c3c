//! Common types and utilities shared across btindex.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration (minimum degree)
//! - Error types
//! - Identifiers (NodeId)

pub mod config;
pub mod error;
mod node_id;

pub use config::Degree;
pub use error::{Error, Result};
pub use node_id::NodeId;
