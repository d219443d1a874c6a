//! Core systems for Horizon Trellis.
//!
//! This crate provides the foundational pieces of the Horizon Trellis UI
//! runtime that do not depend on any widget behavior:
//!
//! - **Node Arena**: Generation-checked node IDs, single-parent ownership,
//!   ordered children and cascading destruction ([`NodeArena`])
//! - **Errors**: Structural failures as a `thiserror` enum ([`TreeError`])
//! - **Logging**: `tracing` target names and tree dumps ([`logging`])
//!
//! # Example
//!
//! ```
//! use horizon_trellis_core::{NodeArena, TreeError};
//!
//! let mut arena = NodeArena::new();
//! let window = arena.insert("window");
//! let button = arena.insert("button");
//! let other = arena.insert("other");
//!
//! arena.add_child(window, button)?;
//! assert_eq!(arena.parent(button)?, Some(window));
//!
//! // Nodes are never silently reparented.
//! assert!(matches!(
//!     arena.add_child(other, button),
//!     Err(TreeError::AlreadyParented { .. })
//! ));
//! # Ok::<(), TreeError>(())
//! ```

mod error;
pub mod logging;
mod tree;

pub use error::{TreeError, TreeResult};
pub use tree::{NodeArena, NodeId};
