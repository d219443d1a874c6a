//! Core widget trait definitions.
//!
//! This module defines the [`Widget`] trait, the capability interface every
//! node of the composition tree implements, plus the contexts handed to it
//! during a frame.
//!
//! # Key Types
//!
//! - [`Widget`] - Base trait for all UI elements
//! - [`UpdateContext`] - Per-node view of the tick, passed to [`Widget::update`]
//! - [`PaintContext`] - Rendering context passed to [`Widget::render`]
//! - [`TabTraversal`] - How the tab-order walk treats a node's subtree
//!
//! # Related Types
//!
//! - [`super::WidgetBase`] - Common state for widgets
//! - [`super::Ui`] - Drives the traversal and owns the tree

use std::any::Any;

use horizon_trellis_core::NodeId;
use horizon_trellis_render::{Color, Point, Rect, Renderer};

use super::base::WidgetBase;
use super::drag_drop::{DragDropManager, DragError, DragPayload};
use super::focus::FocusReason;
use super::input::InputSnapshot;
use super::modal::ModalStack;

/// Context provided during widget painting.
///
/// Wraps the backend and the widget's absolute bounds. Passed to
/// [`Widget::render`] and [`Widget::render_overlay`].
pub struct PaintContext<'a> {
    renderer: &'a mut dyn Renderer,
    bounds: Rect,
    show_focus: bool,
    drag: &'a DragDropManager,
}

impl<'a> PaintContext<'a> {
    /// Create a new paint context.
    pub fn new(renderer: &'a mut dyn Renderer, bounds: Rect, drag: &'a DragDropManager) -> Self {
        Self {
            renderer,
            bounds,
            show_focus: false,
            drag,
        }
    }

    /// Set whether to show the focus indicator (builder pattern).
    #[inline]
    pub fn with_show_focus(mut self, show_focus: bool) -> Self {
        self.show_focus = show_focus;
        self
    }

    /// Check if the focus indicator should be shown.
    ///
    /// Returns `true` when the widget being painted holds focus.
    #[inline]
    pub fn should_show_focus(&self) -> bool {
        self.show_focus
    }

    /// Get the renderer.
    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// The widget's absolute bounds.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The drag coordinator, for drawing drop highlights and drag previews.
    #[inline]
    pub fn drag(&self) -> &DragDropManager {
        self.drag
    }

    /// Fill the whole widget area.
    pub fn fill_background(&mut self, color: Color) {
        let bounds = self.bounds;
        self.renderer.fill_rect(bounds, color);
    }

    /// Draw a focus indicator around the widget if it has focus.
    ///
    /// The outline is drawn `inset` pixels inside the bounds.
    pub fn draw_focus_indicator(&mut self, inset: i32) {
        self.draw_focus_indicator_styled(inset, Color::from_rgb(51, 153, 255), 2);
    }

    /// Draw a focus indicator with a custom color and thickness.
    pub fn draw_focus_indicator_styled(&mut self, inset: i32, color: Color, thickness: i32) {
        if !self.show_focus {
            return;
        }
        let rect = self.bounds.deflate(inset);
        if !rect.is_empty() {
            self.renderer.stroke_rect(rect, color, thickness);
        }
    }
}

/// A focus change asked for from inside [`Widget::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FocusRequest {
    Focus(NodeId, FocusReason),
    Clear(FocusReason),
}

/// Per-node view of the current tick.
///
/// Passed to [`Widget::update`]. Everything a widget may touch during update
/// is reachable from here: the shared input snapshot, elapsed time, the
/// focus manager (through deferred requests), the drag coordinator and the
/// modal stack of the root.
pub struct UpdateContext<'a> {
    node: NodeId,
    bounds: Rect,
    input: &'a InputSnapshot,
    dt: f32,
    focused: Option<NodeId>,
    blocked: bool,
    focus_requests: &'a mut Vec<FocusRequest>,
    drag: &'a mut DragDropManager,
    modals: &'a mut ModalStack,
}

impl<'a> UpdateContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        node: NodeId,
        bounds: Rect,
        input: &'a InputSnapshot,
        dt: f32,
        focused: Option<NodeId>,
        blocked: bool,
        focus_requests: &'a mut Vec<FocusRequest>,
        drag: &'a mut DragDropManager,
        modals: &'a mut ModalStack,
    ) -> Self {
        Self {
            node,
            bounds,
            input,
            dt,
            focused,
            blocked,
            focus_requests,
            drag,
            modals,
        }
    }

    /// The node being updated.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The node's bounds at the start of its update.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The input snapshot for this tick.
    #[inline]
    pub fn input(&self) -> &InputSnapshot {
        self.input
    }

    /// Seconds elapsed since the previous tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Whether the pointer is over this node's bounds.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.bounds.contains(self.input.pointer)
    }

    /// Whether this node was pressed this tick.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.input.pointer_pressed && self.is_hovered()
    }

    /// Whether a blocking modal outside this node's ancestry is open.
    ///
    /// Background widgets should ignore pointer and keyboard input while
    /// this is `true`.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether this node holds focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused == Some(self.node)
    }

    /// The focused node as of the start of this node's update.
    #[inline]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Ask for focus on this node.
    ///
    /// Applied as soon as this node's update returns, so nodes visited later
    /// in the same tick observe the change.
    pub fn request_focus(&mut self, reason: FocusReason) {
        self.focus_requests
            .push(FocusRequest::Focus(self.node, reason));
    }

    /// Ask for focus on another node.
    pub fn request_focus_for(&mut self, node: NodeId, reason: FocusReason) {
        self.focus_requests.push(FocusRequest::Focus(node, reason));
    }

    /// Ask for focus to be cleared.
    pub fn clear_focus(&mut self, reason: FocusReason) {
        self.focus_requests.push(FocusRequest::Clear(reason));
    }

    // =========================================================================
    // Drag & Drop
    // =========================================================================

    /// The drag coordinator of this root.
    #[inline]
    pub fn drag(&mut self) -> &mut DragDropManager {
        self.drag
    }

    /// Start a drag from this node at the current pointer position.
    pub fn begin_drag(&mut self, payload: DragPayload) -> Result<(), DragError> {
        let start = self.input.pointer;
        self.drag.begin_drag(self.node, payload, start)
    }

    /// Report this node as the hovered drop target for this tick.
    pub fn hover_drop_target(&mut self) {
        self.drag.set_hovered_target(Some(self.node));
    }

    /// Take the dragged payload if it is being dropped this tick and its
    /// kind matches `kind` (case-insensitive; empty accepts anything).
    pub fn accept_drop(&mut self, kind: &str) -> Option<DragPayload> {
        self.drag.accept_payload(self.node, kind)
    }

    /// Pointer position of the in-flight drag relative to its start.
    pub fn drag_offset(&self) -> Option<Point> {
        self.drag.drag_delta()
    }

    // =========================================================================
    // Modals
    // =========================================================================

    /// The modal stack of this root.
    #[inline]
    pub fn modals(&mut self) -> &mut ModalStack {
        self.modals
    }
}

/// How the tab-order walk treats a node and its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabTraversal {
    /// Contribute the node (if focusable) and walk its children.
    #[default]
    Descend,
    /// Contribute the node (if focusable) but not its children. Used by
    /// closed popups, collapsed tree nodes and collapsible headers.
    SkipChildren,
    /// Contribute nothing from this subtree. Used by inactive pages.
    SkipSubtree,
}

/// The base trait for all UI elements.
///
/// Implementors embed a [`WidgetBase`] and return it from
/// [`widget_base`](Self::widget_base); every other method has a default, so
/// a widget overrides only the hooks it needs.
///
/// The set of widget kinds is open: hosts define their own widgets and store
/// them as `Box<dyn Widget>`. Concrete types are recovered with
/// `downcast_ref`/`downcast_mut` on `dyn Widget`.
///
/// # Example
///
/// ```
/// use horizon_trellis::render::Color;
/// use horizon_trellis::widget::{FocusReason, PaintContext, UpdateContext, Widget, WidgetBase};
///
/// struct Button {
///     base: WidgetBase,
///     clicks: u32,
/// }
///
/// impl Widget for Button {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///
///     fn update(&mut self, ctx: &mut UpdateContext<'_>) {
///         if ctx.is_pressed() && !ctx.is_blocked() {
///             self.clicks += 1;
///             ctx.request_focus(FocusReason::Pointer);
///         }
///     }
///
///     fn render(&self, ctx: &mut PaintContext<'_>) {
///         ctx.fill_background(Color::GRAY);
///         ctx.draw_focus_indicator(1);
///     }
/// }
/// ```
pub trait Widget: Any + Send + Sync {
    /// Get a reference to the widget's base.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Advance local state for one tick.
    ///
    /// Only called when the widget and all its ancestors are visible and
    /// enabled.
    fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}

    /// Draw the widget. Children are drawn afterwards, on top.
    fn render(&self, _ctx: &mut PaintContext<'_>) {}

    /// Draw content that must appear above the whole tree, such as tooltips
    /// or drag previews. Runs in a second pass after every primary draw.
    fn render_overlay(&self, _ctx: &mut PaintContext<'_>) {}

    /// A human-readable type name for tree dumps and persistence.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    // =========================================================================
    // Identity & Geometry
    // =========================================================================

    /// The widget's string id.
    fn id(&self) -> &str {
        self.widget_base().id()
    }

    /// Absolute bounds.
    fn bounds(&self) -> Rect {
        self.widget_base().bounds()
    }

    /// Set the absolute bounds.
    fn set_bounds(&mut self, bounds: Rect) {
        self.widget_base_mut().set_bounds(bounds);
    }

    /// The rectangle children are clipped to when
    /// [`clips_children`](Self::clips_children) is set. Defaults to the bounds.
    fn clip_bounds(&self) -> Rect {
        self.bounds()
    }

    /// Whether children are clipped to [`clip_bounds`](Self::clip_bounds).
    fn clips_children(&self) -> bool {
        self.widget_base().clips_children()
    }

    // =========================================================================
    // Visibility & Enabled State
    // =========================================================================

    /// Check if the widget itself is visible.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Set visibility.
    fn set_visible(&mut self, visible: bool) {
        self.widget_base_mut().set_visible(visible);
    }

    /// Check if the widget itself is enabled.
    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    /// Set enabled state.
    fn set_enabled(&mut self, enabled: bool) {
        self.widget_base_mut().set_enabled(enabled);
    }

    // =========================================================================
    // Hit Testing
    // =========================================================================

    /// Whether the widget and its subtree take part in hit testing.
    ///
    /// Returning `false` keeps the widget drawn but lets the pointer fall
    /// through to whatever lies beneath it.
    fn is_hit_target(&self) -> bool {
        true
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether the widget declares itself focusable.
    fn is_focusable(&self) -> bool {
        self.widget_base().is_focusable()
    }

    /// Check if the widget has focus.
    fn has_focus(&self) -> bool {
        self.widget_base().has_focus()
    }

    /// Whether the widget handles Tab itself (e.g. to insert a tab
    /// character) while focused, suppressing focus traversal.
    fn consumes_tab(&self) -> bool {
        false
    }

    /// How the tab-order walk treats this widget's subtree.
    fn tab_traversal(&self) -> TabTraversal {
        TabTraversal::Descend
    }

    /// Called after the widget gains focus.
    fn focus_in(&mut self, _reason: FocusReason) {}

    /// Called after the widget loses focus.
    fn focus_out(&mut self, _reason: FocusReason) {}
}

impl dyn Widget {
    /// Downcast to a concrete widget type.
    pub fn downcast_ref<T: Widget>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Mutably downcast to a concrete widget type.
    pub fn downcast_mut<T: Widget>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Check the concrete widget type.
    pub fn is<T: Widget>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }
}
