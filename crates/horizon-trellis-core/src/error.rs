//! Error types for Horizon Trellis tree operations.

use crate::tree::NodeId;

/// Errors raised by structural operations on a [`NodeArena`](crate::NodeArena).
///
/// A failed operation never leaves the arena partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The child already has a parent. Nodes are never silently reparented;
    /// detach with `remove_child` first.
    #[error("node {child:?} is already a child of {parent:?}")]
    AlreadyParented {
        /// The node that was being attached.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },
    /// The node ID is invalid or the node has been destroyed.
    #[error("invalid or destroyed node id {0:?}")]
    InvalidNode(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CircularParentage {
        /// The node that was being attached.
        child: NodeId,
        /// The requested parent.
        parent: NodeId,
    },
}

/// Result type for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
