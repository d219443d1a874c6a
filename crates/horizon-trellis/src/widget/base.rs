//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the per-node state every widget
//! carries: a string id, absolute bounds, visibility, enabled state, focus
//! eligibility and whether children are clipped.

use horizon_trellis_render::{Point, Rect};

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and return it from
/// [`Widget::widget_base`](super::Widget::widget_base). The traversal in
/// [`Ui`](super::Ui) reads these flags; only the focus manager writes the
/// focused flag.
///
/// # Example
///
/// ```
/// use horizon_trellis::render::Rect;
/// use horizon_trellis::widget::{Widget, WidgetBase};
///
/// struct Swatch {
///     base: WidgetBase,
/// }
///
/// impl Widget for Swatch {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
/// }
///
/// let swatch = Swatch {
///     base: WidgetBase::new("swatch").with_bounds(Rect::new(0, 0, 16, 16)),
/// };
/// assert!(swatch.is_visible());
/// assert!(!swatch.is_focusable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetBase {
    id: String,
    bounds: Rect,
    visible: bool,
    enabled: bool,
    focusable: bool,
    clip_children: bool,
    focused: bool,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new("")
    }
}

impl WidgetBase {
    /// Create a visible, enabled, non-focusable base with empty bounds.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bounds: Rect::ZERO,
            visible: true,
            enabled: true,
            focusable: false,
            clip_children: false,
            focused: false,
        }
    }

    /// Set the bounds (builder pattern).
    #[inline]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Mark the widget as focusable (builder pattern).
    #[inline]
    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Clip children to this widget's clip bounds (builder pattern).
    #[inline]
    pub fn with_clip_children(mut self, clip: bool) -> Self {
        self.clip_children = clip;
        self
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The string id used for lookup and persistence.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set the string id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Absolute bounds.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Set the absolute bounds.
    #[inline]
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Move the widget without resizing it.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.bounds.origin = Point::new(x, y);
    }

    /// Whether `point` lies within the bounds.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    // =========================================================================
    // Visibility & Enabled State
    // =========================================================================

    /// Whether the widget itself is visible. Ancestors are not consulted.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set visibility.
    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Show the widget.
    #[inline]
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the widget and, through traversal gating, its subtree.
    #[inline]
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the widget itself is enabled. Ancestors are not consulted.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set enabled state.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // =========================================================================
    // Focus & Clipping
    // =========================================================================

    /// Whether the widget declares itself focusable.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Declare the widget focusable or not.
    #[inline]
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    /// Whether the widget currently holds focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether children are clipped to the clip bounds.
    #[inline]
    pub fn clips_children(&self) -> bool {
        self.clip_children
    }

    /// Enable or disable child clipping.
    #[inline]
    pub fn set_clip_children(&mut self, clip: bool) {
        self.clip_children = clip;
    }
}
