//! A plain grouping widget.
//!
//! [`Container`] draws an optional background and border and otherwise only
//! holds children. It is the default root of a [`Ui`](super::Ui) and the
//! usual parent for panels, dialogs and page bodies.

use horizon_trellis_render::{Color, Rect};

use super::base::WidgetBase;
use super::traits::{PaintContext, TabTraversal, Widget};

/// A grouping widget with an optional background and border.
#[derive(Debug, Clone)]
pub struct Container {
    base: WidgetBase,
    background: Option<Color>,
    border: Option<(Color, i32)>,
    corner_radius: i32,
    traversal: TabTraversal,
    hit_target: bool,
}

impl Container {
    /// Create an empty, transparent container.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(id),
            background: None,
            border: None,
            corner_radius: 0,
            traversal: TabTraversal::Descend,
            hit_target: true,
        }
    }

    /// Set the bounds (builder pattern).
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self
    }

    /// Fill the container with `color` (builder pattern).
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Draw a border of `thickness` pixels (builder pattern).
    pub fn with_border(mut self, color: Color, thickness: i32) -> Self {
        self.border = Some((color, thickness));
        self
    }

    /// Round the background and border corners (builder pattern).
    pub fn with_corner_radius(mut self, radius: i32) -> Self {
        self.corner_radius = radius.max(0);
        self
    }

    /// Clip children to the container (builder pattern).
    pub fn with_clip_children(mut self, clip: bool) -> Self {
        self.base.set_clip_children(clip);
        self
    }

    /// Let the pointer fall through this container (builder pattern).
    pub fn with_hit_target(mut self, hit_target: bool) -> Self {
        self.hit_target = hit_target;
        self
    }

    /// Change how tab traversal treats the children.
    ///
    /// Page hosts set [`TabTraversal::SkipSubtree`] on inactive pages;
    /// collapsible sections set [`TabTraversal::SkipChildren`] while closed.
    pub fn set_tab_traversal(&mut self, traversal: TabTraversal) {
        self.traversal = traversal;
    }

    /// The background color, if any.
    pub fn background(&self) -> Option<Color> {
        self.background
    }
}

impl Widget for Container {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn render(&self, ctx: &mut PaintContext<'_>) {
        let bounds = ctx.bounds();
        if let Some(color) = self.background {
            ctx.renderer().fill_rounded_rect(bounds, self.corner_radius, color);
        }
        if let Some((color, thickness)) = self.border {
            ctx.renderer()
                .stroke_rounded_rect(bounds, self.corner_radius, color, thickness);
        }
    }

    fn is_hit_target(&self) -> bool {
        self.hit_target
    }

    fn tab_traversal(&self) -> TabTraversal {
        self.traversal
    }
}
