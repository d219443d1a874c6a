//! Modal overlay management.
//!
//! This module provides [`ModalStack`], which tracks the modal overlays open
//! under one [`Ui`](super::Ui) root. The most recently opened modal is on top
//! and takes precedence. A modal configured to block background input traps
//! focus traversal and hit testing inside its own subtree.
//!
//! # Usage
//!
//! ```
//! use horizon_trellis::widget::{Container, ModalStack, Ui};
//!
//! let mut ui = Ui::default();
//! let dialog = ui.insert(Container::new("dialog"));
//! ui.add_child(ui.root(), dialog).unwrap();
//!
//! // Open the dialog as a blocking modal
//! ui.open_modal(dialog, true);
//! assert_eq!(ui.active_modal(), Some(dialog));
//!
//! // Close it again when the dialog is dismissed
//! ui.close_modal(dialog);
//! assert_eq!(ui.active_modal(), None);
//! ```

use horizon_trellis_core::NodeId;
use horizon_trellis_core::logging::targets;

/// Information about an open modal overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalEntry {
    /// The modal's root node.
    pub node: NodeId,
    /// Whether background widgets are cut off from focus and pointer input.
    pub blocks_input: bool,
}

/// Stack of open modal overlays for one root.
#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    entries: Vec<ModalEntry>,
}

impl ModalStack {
    /// Create an empty modal stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a modal onto the stack.
    ///
    /// Returns `false` if the node is already open; its entry is left as is.
    pub fn open_modal(&mut self, node: NodeId, blocks_input: bool) -> bool {
        if self.is_open(node) {
            return false;
        }
        self.entries.push(ModalEntry { node, blocks_input });
        tracing::debug!(target: targets::MODAL, ?node, blocks_input, depth = self.entries.len(), "modal opened");
        true
    }

    /// Remove a modal from the stack, wherever it is.
    ///
    /// Returns `true` if the modal was open.
    pub fn close_modal(&mut self, node: NodeId) -> bool {
        let Some(pos) = self.entries.iter().position(|entry| entry.node == node) else {
            return false;
        };
        self.entries.remove(pos);
        tracing::debug!(target: targets::MODAL, ?node, depth = self.entries.len(), "modal closed");
        true
    }

    /// Whether `node` is an open modal.
    pub fn is_open(&self, node: NodeId) -> bool {
        self.entries.iter().any(|entry| entry.node == node)
    }

    /// The most recently opened modal, blocking or not.
    pub fn top(&self) -> Option<NodeId> {
        self.entries.last().map(|entry| entry.node)
    }

    /// The most recently opened blocking modal for which `reachable` holds.
    ///
    /// Modals that are hidden, disabled or detached stop trapping input
    /// without having to be closed explicitly.
    pub fn top_blocking<F>(&self, mut reachable: F) -> Option<NodeId>
    where
        F: FnMut(NodeId) -> bool,
    {
        self.entries
            .iter()
            .rev()
            .filter(|entry| entry.blocks_input)
            .map(|entry| entry.node)
            .find(|&node| reachable(node))
    }

    /// Drop entries whose node no longer satisfies `live`.
    pub fn retain<F>(&mut self, mut live: F)
    where
        F: FnMut(NodeId) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|entry| live(entry.node));
        if self.entries.len() != before {
            tracing::debug!(target: targets::MODAL, removed = before - self.entries.len(), "stale modals dropped");
        }
    }

    /// Open modals, bottom first.
    pub fn entries(&self) -> &[ModalEntry] {
        &self.entries
    }

    /// Number of open modals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no modal is open.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
