//! Focus management for widget trees.
//!
//! This module provides [`FocusManager`], which coordinates keyboard focus
//! across a widget tree. Each [`Ui`](super::Ui) root owns its own focus
//! manager that tracks which widget has focus and handles focus navigation
//! via Tab/Shift+Tab.
//!
//! # Tab Order
//!
//! Tab order is a depth-first pre-order walk of the widget tree, the same
//! order widgets are painted in (parents before children, siblings in
//! z-order). The walk is gated, in order:
//!
//! 1. Invisible or disabled widgets are skipped with their subtree.
//! 2. [`TabTraversal::SkipSubtree`] widgets (inactive pages) are skipped with
//!    their subtree.
//! 3. While a blocking modal is open the walk starts at that modal, so
//!    background widgets are never reached.
//! 4. [`TabTraversal::SkipChildren`] widgets (closed popups, collapsed
//!    headers) contribute themselves but not their children.
//!
//! A widget contributes itself if it declares itself focusable, whether or
//! not it has focusable descendants.
//!
//! # Usage
//!
//! ```ignore
//! use horizon_trellis::widget::{FocusManager, FocusReason};
//!
//! let mut focus_manager = FocusManager::new();
//!
//! // Set focus to a specific widget
//! focus_manager.request_focus(&mut tree, widget_id, FocusReason::Programmatic);
//!
//! // Navigate to next focusable widget (Tab key)
//! focus_manager.focus_next(&mut tree, root_id);
//!
//! // Navigate to previous focusable widget (Shift+Tab)
//! focus_manager.focus_previous(&mut tree, root_id);
//! ```

use horizon_trellis_core::NodeId;
use horizon_trellis_core::logging::targets;

use super::access::WidgetAccess;
use super::traits::TabTraversal;

/// Why focus changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusReason {
    /// Tab key navigation.
    Tab,
    /// Shift+Tab navigation.
    Backtab,
    /// A pointer press on the widget.
    Pointer,
    /// Requested by application code.
    Programmatic,
    /// The focused widget became hidden, disabled, detached or destroyed.
    Unreachable,
}

/// Manages keyboard focus for a widget tree.
///
/// The focus manager tracks which widget currently has focus and provides
/// methods to change focus and navigate through focusable widgets.
///
/// # Focus Change Notifications
///
/// When focus changes, the focus manager:
/// 1. Calls [`Widget::focus_out`](super::Widget::focus_out) on the widget
///    losing focus (if any)
/// 2. Updates the internal focus state
/// 3. Calls [`Widget::focus_in`](super::Widget::focus_in) on the widget
///    gaining focus
#[derive(Debug, Default)]
pub struct FocusManager {
    /// The currently focused widget, if any.
    focused_widget: Option<NodeId>,
}

impl FocusManager {
    /// Create a new focus manager.
    pub fn new() -> Self {
        Self {
            focused_widget: None,
        }
    }

    /// Get the currently focused widget.
    #[inline]
    pub fn focused_widget(&self) -> Option<NodeId> {
        self.focused_widget
    }

    /// Check if a specific widget has focus.
    #[inline]
    pub fn has_focus(&self, widget_id: NodeId) -> bool {
        self.focused_widget == Some(widget_id)
    }

    /// Move focus to a specific widget.
    ///
    /// A widget can receive focus when it declares itself focusable and is
    /// itself visible and enabled. Ancestor state is not checked here; a
    /// widget hidden through an ancestor loses focus at the next
    /// [`validate`](Self::validate).
    ///
    /// # Returns
    ///
    /// `true` if focus changed. Requesting focus for the widget that already
    /// has it, or for a widget that cannot take focus, returns `false`.
    pub fn request_focus<S: WidgetAccess>(
        &mut self,
        storage: &mut S,
        widget_id: NodeId,
        reason: FocusReason,
    ) -> bool {
        if self.focused_widget == Some(widget_id) {
            return false;
        }

        let can_focus = storage.get_widget(widget_id).is_some_and(|widget| {
            widget.is_focusable() && widget.is_visible() && widget.is_enabled()
        });
        if !can_focus {
            tracing::debug!(target: targets::FOCUS, ?widget_id, ?reason, "focus request ignored");
            return false;
        }

        if let Some(old_id) = self.focused_widget.take() {
            Self::unfocus_widget(storage, old_id, reason);
        }
        Self::focus_widget(storage, widget_id, reason);
        self.focused_widget = Some(widget_id);

        tracing::debug!(target: targets::FOCUS, ?widget_id, ?reason, "focus changed");
        true
    }

    /// Clear focus from the currently focused widget.
    ///
    /// Returns `true` if a widget lost focus.
    pub fn clear_focus<S: WidgetAccess>(&mut self, storage: &mut S, reason: FocusReason) -> bool {
        let Some(old_id) = self.focused_widget.take() else {
            return false;
        };
        Self::unfocus_widget(storage, old_id, reason);
        tracing::debug!(target: targets::FOCUS, ?old_id, ?reason, "focus cleared");
        true
    }

    /// Clear focus if the focused widget can no longer hold it.
    ///
    /// Focus is dropped when the widget was destroyed, detached from `root`,
    /// or is hidden or disabled, directly or through an ancestor.
    ///
    /// Returns `true` if focus was cleared.
    pub fn validate<S: WidgetAccess>(&mut self, storage: &mut S, root: NodeId) -> bool {
        match self.focused_widget {
            Some(id) if !storage.is_reachable(root, id) => {
                self.clear_focus(storage, FocusReason::Unreachable)
            }
            _ => false,
        }
    }

    /// Move focus to the next focusable widget in tab order.
    ///
    /// With nothing focused (or the focused widget outside the tab order),
    /// focuses the first entry. Wraps from the last entry to the first. An
    /// empty tab order clears focus.
    ///
    /// # Arguments
    ///
    /// * `storage` - Widget storage implementing `WidgetAccess`
    /// * `start` - Where the walk starts: the root, or the blocking modal
    ///
    /// # Returns
    ///
    /// `true` if focus changed.
    pub fn focus_next<S: WidgetAccess>(&mut self, storage: &mut S, start: NodeId) -> bool {
        self.step(storage, start, false)
    }

    /// Move focus to the previous focusable widget in tab order.
    ///
    /// Mirrors [`focus_next`](Self::focus_next): with nothing focused the
    /// last entry is chosen, and the first entry wraps to the last.
    pub fn focus_previous<S: WidgetAccess>(&mut self, storage: &mut S, start: NodeId) -> bool {
        self.step(storage, start, true)
    }

    fn step<S: WidgetAccess>(&mut self, storage: &mut S, start: NodeId, backward: bool) -> bool {
        let tab_order = self.tab_order(storage, start);
        let reason = if backward {
            FocusReason::Backtab
        } else {
            FocusReason::Tab
        };

        if tab_order.is_empty() {
            return self.clear_focus(storage, reason);
        }

        let len = tab_order.len();
        let current = self
            .focused_widget
            .and_then(|focused| tab_order.iter().position(|&id| id == focused));
        let target = match (current, backward) {
            (Some(pos), false) => (pos + 1) % len,
            (Some(pos), true) => (pos + len - 1) % len,
            (None, false) => 0,
            (None, true) => len - 1,
        };
        tracing::trace!(target: targets::FOCUS, len, ?current, target, backward, "tab step");

        self.request_focus(storage, tab_order[target], reason)
    }

    /// Build the tab order starting at `start`.
    ///
    /// Returns the focusable widgets in depth-first pre-order, honouring the
    /// gating rules described in the [module docs](self).
    pub fn tab_order<S: WidgetAccess>(&self, storage: &S, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        Self::collect_tab_order_recursive(storage, start, &mut order);
        order
    }

    fn collect_tab_order_recursive<S: WidgetAccess>(
        storage: &S,
        widget_id: NodeId,
        order: &mut Vec<NodeId>,
    ) {
        let Some(widget) = storage.get_widget(widget_id) else {
            return;
        };

        if !widget.is_visible() || !widget.is_enabled() {
            return;
        }

        let traversal = widget.tab_traversal();
        if traversal == TabTraversal::SkipSubtree {
            return;
        }

        if widget.is_focusable() {
            order.push(widget_id);
        }

        if traversal == TabTraversal::SkipChildren {
            return;
        }

        for child_id in storage.get_children(widget_id) {
            Self::collect_tab_order_recursive(storage, child_id, order);
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn unfocus_widget<S: WidgetAccess>(storage: &mut S, widget_id: NodeId, reason: FocusReason) {
        if let Some(widget) = storage.get_widget_mut(widget_id) {
            widget.widget_base_mut().set_focused(false);
            widget.focus_out(reason);
        }
    }

    fn focus_widget<S: WidgetAccess>(storage: &mut S, widget_id: NodeId, reason: FocusReason) {
        if let Some(widget) = storage.get_widget_mut(widget_id) {
            widget.widget_base_mut().set_focused(true);
            widget.focus_in(reason);
        }
    }
}
