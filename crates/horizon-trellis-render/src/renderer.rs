//! Core renderer trait defining the 2D drawing contract.
//!
//! This module defines the [`Renderer`] trait, the only surface the widget
//! tree draws through. A backend needs nothing more than rectangle fills,
//! rectangle outlines, text and a rectangular clip stack; richer fills
//! (rounded rectangles, gradients, checkerboards) have default
//! implementations synthesised from [`fill_rect`](Renderer::fill_rect) by
//! the helpers in [`crate::shapes`].
//!
//! The trait is object safe so the composition tree can hold it as
//! `&mut dyn Renderer`.

use crate::error::RenderResult;
use crate::shapes::{self, GradientCorners};
use crate::types::{Color, Point, Rect, Size};

/// Statistics from a frame render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of nodes whose primary `render` hook ran.
    pub nodes_painted: u32,
    /// Number of nodes whose overlay hook ran.
    pub overlays_painted: u32,
    /// Number of clip rectangles pushed by the traversal.
    pub clips_pushed: u32,
    /// Number of subtrees skipped because their clip was empty.
    pub clips_culled: u32,
}

/// The backend drawing contract.
///
/// # Clip Stack
///
/// [`push_clip`](Self::push_clip) and [`pop_clip`](Self::pop_clip) follow a
/// strict stack discipline. The visible region at any moment is the
/// intersection of every pushed rectangle and the [`viewport`](Self::viewport).
///
/// # Text
///
/// Text is drawn with an integer scale factor. A scale of `0` is treated as
/// `1`; backends may rely on receiving `scale >= 1` from [`effective_scale`].
pub trait Renderer {
    /// The full drawable area.
    fn viewport(&self) -> Rect;

    // =========================================================================
    // Drawing - Rectangles
    // =========================================================================

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the inside outline of a rectangle with an integer thickness.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32);

    // =========================================================================
    // Drawing - Text
    // =========================================================================

    /// Draw text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, color: Color, scale: u32);

    /// Measure the width and height of `text` at `scale`.
    fn measure_text(&self, text: &str, scale: u32) -> Size;

    // =========================================================================
    // Clipping
    // =========================================================================

    /// Push a clip rectangle, intersected with the current clip and viewport.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the most recently pushed clip rectangle.
    fn pop_clip(&mut self) -> RenderResult<()>;

    /// The current visible region.
    fn clip_bounds(&self) -> Rect;

    // =========================================================================
    // Drawing - Composite fills
    // =========================================================================

    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: i32, color: Color) {
        shapes::fill_rounded_rect(self, rect, radius, color);
    }

    /// Stroke a rounded rectangle with `thickness` nested outlines.
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: i32, color: Color, thickness: i32) {
        shapes::stroke_rounded_rect(self, rect, radius, color, thickness);
    }

    /// Fill a rectangle with a bilinear four-corner gradient.
    fn fill_gradient(&mut self, rect: Rect, corners: &GradientCorners) {
        shapes::fill_gradient(self, rect, corners);
    }

    /// Fill a rectangle with a two-color checkerboard.
    fn fill_checkerboard(&mut self, rect: Rect, cell_size: i32, even: Color, odd: Color) {
        shapes::fill_checkerboard(self, rect, cell_size, even, odd);
    }
}

/// Clamp a text scale to the minimum of `1`.
#[inline]
pub fn effective_scale(scale: u32) -> u32 {
    scale.max(1)
}
