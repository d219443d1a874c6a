//! Widget storage access.
//!
//! [`WidgetAccess`] is the seam between the managers (focus, tab order, hit
//! testing) and wherever widgets are actually stored. [`WidgetTree`] is the
//! arena the [`Ui`](super::Ui) root uses.

use horizon_trellis_core::logging::DebugNode;
use horizon_trellis_core::{NodeArena, NodeId};

use super::traits::Widget;

/// Arena of boxed widgets.
pub type WidgetTree = NodeArena<Box<dyn Widget>>;

/// Trait for accessing widgets by their NodeId.
///
/// Implement this trait for your widget storage mechanism to use the
/// [`FocusManager`](super::FocusManager).
pub trait WidgetAccess {
    /// Get an immutable reference to a widget by its ID.
    fn get_widget(&self, id: NodeId) -> Option<&dyn Widget>;

    /// Get a mutable reference to a widget by its ID.
    fn get_widget_mut(&mut self, id: NodeId) -> Option<&mut dyn Widget>;

    /// Get the children of a widget in z-order (back to front).
    fn get_children(&self, id: NodeId) -> Vec<NodeId>;

    /// Get the parent of a widget.
    fn get_parent(&self, id: NodeId) -> Option<NodeId>;

    /// Whether `id` is live, attached under `root` (or is `root`), and it and
    /// every ancestor up to `root` are visible and enabled.
    fn is_reachable(&self, root: NodeId, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let Some(widget) = self.get_widget(current) else {
                return false;
            };
            if !widget.is_visible() || !widget.is_enabled() {
                return false;
            }
            if current == root {
                return true;
            }
            match self.get_parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

impl WidgetAccess for WidgetTree {
    fn get_widget(&self, id: NodeId) -> Option<&dyn Widget> {
        self.get(id).map(|widget| widget.as_ref())
    }

    fn get_widget_mut(&mut self, id: NodeId) -> Option<&mut dyn Widget> {
        let widget = self.get_mut(id)?;
        Some(widget.as_mut())
    }

    fn get_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(<[NodeId]>::to_vec).unwrap_or_default()
    }

    fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).ok().flatten()
    }
}

impl DebugNode for Box<dyn Widget> {
    fn debug_name(&self) -> &str {
        self.id()
    }

    fn debug_type(&self) -> &'static str {
        self.as_ref().type_name()
    }

    fn debug_flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if !self.is_visible() {
            flags.push("hidden");
        }
        if !self.is_enabled() {
            flags.push("disabled");
        }
        if self.is_focusable() {
            flags.push("focusable");
        }
        if self.has_focus() {
            flags.push("focused");
        }
        if self.clips_children() {
            flags.push("clips");
        }
        if !self.is_hit_target() {
            flags.push("no-hit");
        }
        flags
    }
}
