//! The composition root.
//!
//! [`Ui`] owns one widget tree together with the state that belongs to it:
//! the focus manager, the drag coordinator and the modal stack. A host
//! drives it once per frame:
//!
//! ```
//! use horizon_trellis::render::{RecordingRenderer, Size};
//! use horizon_trellis::widget::{Container, InputSnapshot, Ui};
//! use horizon_trellis::UiConfig;
//!
//! let mut ui = Ui::new(UiConfig::default().with_viewport(Size::new(320, 240)));
//! let panel = ui.insert(Container::new("panel"));
//! ui.add_child(ui.root(), panel).unwrap();
//!
//! let mut renderer = RecordingRenderer::new(Size::new(320, 240)).unwrap();
//! ui.update(&InputSnapshot::hover(10, 10), 1.0 / 60.0);
//! let stats = ui.render(&mut renderer).unwrap();
//! assert_eq!(stats.nodes_painted, 2);
//! ```
//!
//! # Frame Order
//!
//! [`Ui::update`] runs, in order:
//!
//! 1. Drag frame start (pointer, drop request, evidence check)
//! 2. Focus validation (hidden, disabled, detached or destroyed holders lose focus)
//! 3. Tab traversal, which strips the Tab key from the snapshot it used
//! 4. The pre-order update pass, skipping invisible or disabled subtrees
//! 5. Drag frame end (unresolved drops are cleared)
//!
//! [`Ui::render`] then draws the tree in pre-order with clip stacking and
//! finishes with an overlay pass over the whole tree.

use horizon_trellis_core::logging::{TreeDebug, TreeFormatOptions, targets};
use horizon_trellis_core::{NodeId, TreeResult};
use horizon_trellis_render::{FrameStats, Point, Rect, RenderResult, Renderer, Size};

use super::access::{WidgetAccess, WidgetTree};
use super::container::Container;
use super::drag_drop::DragDropManager;
use super::focus::{FocusManager, FocusReason};
use super::input::{InputSnapshot, NavKeys};
use super::modal::ModalStack;
use super::traits::{FocusRequest, PaintContext, UpdateContext, Widget};
use crate::config::UiConfig;

/// A widget tree and the interaction state of its root.
pub struct Ui {
    tree: WidgetTree,
    root: NodeId,
    focus: FocusManager,
    drag: DragDropManager,
    modals: ModalStack,
    config: UiConfig,
    frame: u64,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

impl Ui {
    /// Create a root with a transparent [`Container`] covering the viewport.
    pub fn new(config: UiConfig) -> Self {
        let root = Container::new("root")
            .with_bounds(Rect::from_origin_size(Point::ZERO, config.viewport));
        Self::with_root(root, config)
    }

    /// Create a root around a custom root widget.
    pub fn with_root<W: Widget>(root: W, config: UiConfig) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Box::new(root));
        Self {
            tree,
            root,
            focus: FocusManager::new(),
            drag: DragDropManager::with_config(config.drag),
            modals: ModalStack::new(),
            config,
            frame: 0,
        }
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The configuration this root was created with.
    #[inline]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Number of completed update calls.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Resize the root node to a new viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.config.viewport = viewport;
        if let Some(root) = self.tree.get_widget_mut(self.root) {
            root.set_bounds(Rect::from_origin_size(Point::ZERO, viewport));
        }
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// The widget arena.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable access to the widget arena.
    ///
    /// Structural changes made here are picked up at the next update: focus
    /// on a widget that became unreachable is cleared then.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Insert a detached widget.
    pub fn insert<W: Widget>(&mut self, widget: W) -> NodeId {
        self.tree.insert(Box::new(widget))
    }

    /// Insert a detached, already boxed widget.
    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        self.tree.insert(widget)
    }

    /// Append `child` to `parent`. See [`NodeArena::add_child`](horizon_trellis_core::NodeArena::add_child).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.tree.add_child(parent, child)
    }

    /// Detach `child` from `parent`, returning whether it was found.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.tree.remove_child(parent, child)
    }

    /// Destroy a widget and its subtree, returning how many widgets were
    /// removed.
    ///
    /// Focus held inside the subtree is cleared first, so the holder still
    /// receives [`Widget::focus_out`]. Destroying the root destroys its
    /// children and keeps the root itself.
    pub fn destroy(&mut self, id: NodeId) -> TreeResult<usize> {
        if id == self.root {
            let mut count = 0;
            for child in self.tree.children(id)?.to_vec() {
                count += self.destroy(child)?;
            }
            return Ok(count);
        }

        let holds_focus = self
            .focus
            .focused_widget()
            .is_some_and(|focused| self.tree.is_ancestor_of(id, focused));
        if holds_focus && self.tree.contains(id) {
            self.focus.clear_focus(&mut self.tree, FocusReason::Unreachable);
        }

        let removed = self.tree.destroy(id)?;
        let tree = &self.tree;
        self.modals.retain(|node| tree.contains(node));
        Ok(removed.len())
    }

    /// Whether `id` is a live node.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.contains(id)
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        self.tree.parent(id)
    }

    /// Get the children of a node in z-order.
    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        self.tree.children(id)
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        self.tree.ancestors(id)
    }

    /// Descendants of a node in pre-order.
    pub fn descendants(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        self.tree.descendants(id)
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.tree.is_ancestor_of(ancestor, id)
    }

    /// Find the first widget under the root (pre-order) with string id `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .find(self.root, |widget| widget.id() == id)
            .ok()
            .flatten()
    }

    /// Borrow a widget.
    pub fn widget(&self, id: NodeId) -> Option<&dyn Widget> {
        self.tree.get_widget(id)
    }

    /// Mutably borrow a widget.
    pub fn widget_mut(&mut self, id: NodeId) -> Option<&mut dyn Widget> {
        self.tree.get_widget_mut(id)
    }

    /// Borrow a widget as its concrete type.
    pub fn widget_as<T: Widget>(&self, id: NodeId) -> Option<&T> {
        self.tree.get_widget(id)?.downcast_ref::<T>()
    }

    /// Mutably borrow a widget as its concrete type.
    pub fn widget_as_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        self.tree.get_widget_mut(id)?.downcast_mut::<T>()
    }

    /// Render the tree as text for debugging.
    pub fn debug_tree(&self) -> String {
        TreeDebug::with_options(TreeFormatOptions::detailed())
            .format_subtree(&self.tree, self.root)
            .unwrap_or_else(|err| format!("error formatting widget tree: {err}"))
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The focus manager.
    #[inline]
    pub fn focus_manager(&self) -> &FocusManager {
        &self.focus
    }

    /// The focused widget.
    #[inline]
    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused_widget()
    }

    /// Focus a widget programmatically. Returns whether focus changed.
    pub fn request_focus(&mut self, id: NodeId) -> bool {
        self.focus
            .request_focus(&mut self.tree, id, FocusReason::Programmatic)
    }

    /// Clear focus. Returns whether a widget lost focus.
    pub fn clear_focus(&mut self) -> bool {
        self.focus
            .clear_focus(&mut self.tree, FocusReason::Programmatic)
    }

    /// Move focus forward in tab order, as a Tab press would.
    pub fn focus_next(&mut self) -> bool {
        let start = self.tab_start();
        self.focus.focus_next(&mut self.tree, start)
    }

    /// Move focus backward in tab order, as Shift+Tab would.
    pub fn focus_previous(&mut self) -> bool {
        let start = self.tab_start();
        self.focus.focus_previous(&mut self.tree, start)
    }

    /// The current tab order, honouring an open blocking modal.
    pub fn tab_order(&self) -> Vec<NodeId> {
        self.focus.tab_order(&self.tree, self.tab_start())
    }

    fn tab_start(&self) -> NodeId {
        self.active_modal().unwrap_or(self.root)
    }

    // =========================================================================
    // Modals
    // =========================================================================

    /// The modal stack.
    #[inline]
    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    /// Open `node` as a modal. Returns `false` if it was already open.
    pub fn open_modal(&mut self, node: NodeId, blocks_input: bool) -> bool {
        self.modals.open_modal(node, blocks_input)
    }

    /// Close a modal. Returns `false` if it was not open.
    pub fn close_modal(&mut self, node: NodeId) -> bool {
        self.modals.close_modal(node)
    }

    /// The most recently opened blocking modal that is still reachable
    /// from the root.
    pub fn active_modal(&self) -> Option<NodeId> {
        self.modals
            .top_blocking(|node| self.tree.is_reachable(self.root, node))
    }

    // =========================================================================
    // Drag & Drop
    // =========================================================================

    /// The drag coordinator.
    #[inline]
    pub fn drag(&self) -> &DragDropManager {
        &self.drag
    }

    /// Mutable access to the drag coordinator.
    #[inline]
    pub fn drag_mut(&mut self) -> &mut DragDropManager {
        &mut self.drag
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Advance one tick with `input` and `dt` seconds elapsed.
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) {
        self.frame += 1;
        let _span = tracing::trace_span!(target: targets::TREE, "update", frame = self.frame).entered();
        let mut input = input.clone();

        self.drag.begin_frame(&input);

        let tree = &self.tree;
        self.modals.retain(|node| tree.contains(node));
        self.focus.validate(&mut self.tree, self.root);

        if self.config.tab_navigation && input.tab_pressed() {
            self.handle_tab(&mut input);
        }

        let modal = self.active_modal();
        let mut requests = Vec::new();
        self.update_node(self.root, &input, dt, modal, modal.is_none(), &mut requests);

        self.drag.end_frame();
    }

    fn handle_tab(&mut self, input: &mut InputSnapshot) {
        // A holder behind a blocking modal cannot keep Tab for itself.
        let start = self.tab_start();
        let focused_consumes = self
            .focus
            .focused_widget()
            .filter(|&id| self.tree.is_ancestor_of(start, id))
            .and_then(|id| self.tree.get_widget(id))
            .is_some_and(|widget| widget.consumes_tab());
        if focused_consumes {
            tracing::trace!(target: targets::FOCUS, "tab left to focused widget");
            return;
        }

        if input.shift() {
            self.focus_previous();
        } else {
            self.focus_next();
        }
        input.consume(NavKeys::TAB);
    }

    fn update_node(
        &mut self,
        id: NodeId,
        input: &InputSnapshot,
        dt: f32,
        modal: Option<NodeId>,
        mut inside_modal: bool,
        requests: &mut Vec<FocusRequest>,
    ) {
        if modal == Some(id) {
            inside_modal = true;
        }

        let Some(widget) = self.tree.get_mut(id) else {
            return;
        };
        if !widget.is_visible() || !widget.is_enabled() {
            return;
        }

        let bounds = widget.bounds();
        let mut ctx = UpdateContext::new(
            id,
            bounds,
            input,
            dt,
            self.focus.focused_widget(),
            !inside_modal,
            requests,
            &mut self.drag,
            &mut self.modals,
        );
        widget.update(&mut ctx);

        self.apply_focus_requests(requests);

        for child in self.tree.get_children(id) {
            self.update_node(child, input, dt, modal, inside_modal, requests);
        }
    }

    fn apply_focus_requests(&mut self, requests: &mut Vec<FocusRequest>) {
        for request in requests.drain(..) {
            match request {
                FocusRequest::Focus(node, reason) => {
                    self.focus.request_focus(&mut self.tree, node, reason);
                }
                FocusRequest::Clear(reason) => {
                    self.focus.clear_focus(&mut self.tree, reason);
                }
            }
        }
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// Draw the tree, then the overlay pass.
    ///
    /// # Errors
    ///
    /// Propagates clip stack errors from the backend.
    pub fn render(&self, renderer: &mut dyn Renderer) -> RenderResult<FrameStats> {
        let _span = tracing::trace_span!(target: targets::RENDER, "render", frame = self.frame).entered();
        let mut stats = FrameStats::default();
        self.render_node(self.root, renderer, &mut stats)?;
        self.render_overlay_node(self.root, renderer, &mut stats);
        tracing::trace!(target: targets::RENDER, ?stats, "frame rendered");
        Ok(stats)
    }

    fn render_node(
        &self,
        id: NodeId,
        renderer: &mut dyn Renderer,
        stats: &mut FrameStats,
    ) -> RenderResult<()> {
        let Some(widget) = self.tree.get_widget(id) else {
            return Ok(());
        };
        if !widget.is_visible() {
            return Ok(());
        }

        let mut ctx = PaintContext::new(&mut *renderer, widget.bounds(), &self.drag)
            .with_show_focus(self.focus.has_focus(id));
        widget.render(&mut ctx);
        stats.nodes_painted += 1;

        let children = self.tree.children(id).unwrap_or_default();
        if children.is_empty() {
            return Ok(());
        }
        if !widget.clips_children() {
            for &child in children {
                self.render_node(child, renderer, stats)?;
            }
            return Ok(());
        }

        renderer.push_clip(widget.clip_bounds());
        stats.clips_pushed += 1;
        if renderer.clip_bounds().is_empty() {
            stats.clips_culled += 1;
            tracing::trace!(target: targets::RENDER, ?id, "children culled by empty clip");
        } else {
            let drawn = children
                .iter()
                .try_for_each(|&child| self.render_node(child, renderer, stats));
            if let Err(err) = drawn {
                // Keep the backend's stack balanced on the error path.
                let _ = renderer.pop_clip();
                return Err(err);
            }
        }
        renderer.pop_clip()
    }

    fn render_overlay_node(&self, id: NodeId, renderer: &mut dyn Renderer, stats: &mut FrameStats) {
        let Some(widget) = self.tree.get_widget(id) else {
            return;
        };
        if !widget.is_visible() {
            return;
        }

        let mut ctx = PaintContext::new(&mut *renderer, widget.bounds(), &self.drag)
            .with_show_focus(self.focus.has_focus(id));
        widget.render_overlay(&mut ctx);
        stats.overlays_painted += 1;

        for &child in self.tree.children(id).unwrap_or_default() {
            self.render_overlay_node(child, renderer, stats);
        }
    }

    // =========================================================================
    // Hit Testing
    // =========================================================================

    /// The topmost, deepest visible widget containing `point`.
    ///
    /// While a blocking modal is open only its subtree is tested.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        let start = self.active_modal().unwrap_or(self.root);
        self.hit_test_from(start, point)
    }

    /// Hit test the subtree rooted at `start`.
    pub fn hit_test_from(&self, start: NodeId, point: Point) -> Option<NodeId> {
        let widget = self.tree.get_widget(start)?;
        if !widget.is_visible() || !widget.is_hit_target() {
            return None;
        }

        let search_children = !widget.clips_children() || widget.clip_bounds().contains(point);
        if search_children {
            let children = self.tree.children(start).unwrap_or_default();
            for &child in children.iter().rev() {
                if let Some(hit) = self.hit_test_from(child, point) {
                    return Some(hit);
                }
            }
        }

        widget.bounds().contains(point).then_some(start)
    }
}

static_assertions::assert_impl_all!(Ui: Send, Sync);
