//! Shape compositing built from axis-aligned rectangle fills.
//!
//! Every helper here reduces its shape to a list of [`Rect`] spans and draws
//! them with [`Renderer::fill_rect`], so they work unmodified on any backend
//! that can fill rectangles. The span builders are public so backends and
//! tests can inspect the exact pixel coverage.

use crate::renderer::Renderer;
use crate::types::{Color, Rect};

/// Four corner colors for a bilinear gradient fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientCorners {
    pub top_left: Color,
    pub top_right: Color,
    pub bottom_left: Color,
    pub bottom_right: Color,
}

impl GradientCorners {
    /// Create gradient corners.
    pub const fn new(
        top_left: Color,
        top_right: Color,
        bottom_left: Color,
        bottom_right: Color,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Top-to-bottom gradient.
    pub const fn vertical(top: Color, bottom: Color) -> Self {
        Self::new(top, top, bottom, bottom)
    }

    /// Left-to-right gradient.
    pub const fn horizontal(left: Color, right: Color) -> Self {
        Self::new(left, right, left, right)
    }

    /// Color at pixel (`x`, `y`) of a `width` x `height` area.
    pub fn color_at(&self, width: i32, height: i32, x: i32, y: i32) -> Color {
        let (left, right) = self.row_edges(height, y);
        left.lerp(right, fraction(x, width))
    }

    fn row_edges(&self, height: i32, y: i32) -> (Color, Color) {
        let t = fraction(y, height);
        (
            self.top_left.lerp(self.bottom_left, t),
            self.top_right.lerp(self.bottom_right, t),
        )
    }
}

/// Position of pixel `i` within `len` pixels as a `[0, 1]` fraction.
fn fraction(i: i32, len: i32) -> f32 {
    if len > 1 {
        i as f32 / (len - 1) as f32
    } else {
        0.0
    }
}

// =============================================================================
// Rounded rectangles
// =============================================================================

/// Clamp a corner radius to what fits in `rect`.
#[inline]
pub fn effective_radius(rect: Rect, radius: i32) -> i32 {
    if rect.is_empty() {
        return 0;
    }
    radius.clamp(0, rect.width().min(rect.height()) / 2)
}

/// Horizontal inset of every row of a rounded rectangle.
///
/// Rows inside a corner band (within `radius` of the top or bottom edge) are
/// inset by `clamp(ceil(R - sqrt(R² - dy²)), 0, R)`, where `dy` is the distance
/// of the row's pixel centre from the corner circle's centre row. Every other
/// row has inset 0.
pub fn rounded_row_insets(rect: Rect, radius: i32) -> Vec<i32> {
    let height = rect.height().max(0);
    let r = effective_radius(rect, radius);
    let rf = r as f32;

    (0..height)
        .map(|row| {
            let dy = if row < r {
                rf - (row as f32 + 0.5)
            } else if row >= height - r {
                (row as f32 + 0.5) - (height - r) as f32
            } else {
                return 0;
            };
            let inset = (rf - (rf * rf - dy * dy).max(0.0).sqrt()).ceil() as i32;
            inset.clamp(0, r)
        })
        .collect()
}

/// Spans covering a filled rounded rectangle.
///
/// Consecutive rows with the same inset are merged, so a radius of 0 yields
/// the rectangle itself.
pub fn rounded_rect_spans(rect: Rect, radius: i32) -> Vec<Rect> {
    let mut spans = Vec::new();
    if rect.is_empty() {
        return spans;
    }

    for (row, inset) in rounded_row_insets(rect, radius).into_iter().enumerate() {
        let span = Rect::new(
            rect.left() + inset,
            rect.top() + row as i32,
            rect.width() - inset * 2,
            1,
        );
        merge_row(&mut spans, span);
    }
    spans
}

/// Spans covering a one pixel outline of a rounded rectangle.
///
/// Inside the corner bands the outline steps horizontally so that adjacent
/// rows stay connected.
pub fn rounded_outline_spans(rect: Rect, radius: i32) -> Vec<Rect> {
    if rect.width() <= 2 || rect.height() <= 2 {
        return rounded_rect_spans(rect, radius);
    }

    let insets = rounded_row_insets(rect, radius);
    let last = insets.len() - 1;
    let mut left = Vec::new();
    let mut right = Vec::new();

    for (row, &inset) in insets.iter().enumerate() {
        let y = rect.top() + row as i32;
        let inner_width = rect.width() - inset * 2;

        if row == 0 || row == last {
            merge_row(&mut left, Rect::new(rect.left() + inset, y, inner_width, 1));
            continue;
        }

        let neighbor = insets[row - 1].max(insets[row + 1]);
        let segment = (neighbor - inset).max(1);
        if segment * 2 >= inner_width {
            merge_row(&mut left, Rect::new(rect.left() + inset, y, inner_width, 1));
            continue;
        }

        merge_row(&mut left, Rect::new(rect.left() + inset, y, segment, 1));
        merge_row(
            &mut right,
            Rect::new(rect.right() - inset - segment, y, segment, 1),
        );
    }

    left.extend(right);
    left
}

/// Fill a rounded rectangle using only rectangle fills.
pub fn fill_rounded_rect<R: Renderer + ?Sized>(
    renderer: &mut R,
    rect: Rect,
    radius: i32,
    color: Color,
) {
    for span in rounded_rect_spans(rect, radius) {
        renderer.fill_rect(span, color);
    }
}

/// Stroke a rounded rectangle as `thickness` nested inset outlines.
pub fn stroke_rounded_rect<R: Renderer + ?Sized>(
    renderer: &mut R,
    rect: Rect,
    radius: i32,
    color: Color,
    thickness: i32,
) {
    for i in 0..thickness.max(0) {
        let ring = rect.deflate(i);
        if ring.is_empty() {
            break;
        }
        for span in rounded_outline_spans(ring, (radius - i).max(0)) {
            renderer.fill_rect(span, color);
        }
    }
}

/// Extend the previous span downwards when `row` continues it, else append.
fn merge_row(spans: &mut Vec<Rect>, row: Rect) {
    if row.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.left() == row.left() && last.width() == row.width() && last.bottom() == row.top() {
            last.size.height += row.height();
            return;
        }
    }
    spans.push(row);
}

// =============================================================================
// Gradients
// =============================================================================

/// Fill `rect` with a bilinear gradient between four corner colors.
///
/// Rows whose left and right edge colors are equal are filled with a single
/// rectangle. Other rows are filled pixel by pixel, merging runs of
/// identical color.
pub fn fill_gradient<R: Renderer + ?Sized>(
    renderer: &mut R,
    rect: Rect,
    corners: &GradientCorners,
) {
    if rect.is_empty() {
        return;
    }

    let width = rect.width();
    let height = rect.height();

    for y in 0..height {
        let (left, right) = corners.row_edges(height, y);
        let row_y = rect.top() + y;

        if left == right {
            renderer.fill_rect(Rect::new(rect.left(), row_y, width, 1), left);
            continue;
        }

        let mut run_start = 0;
        let mut run_color = left;
        for x in 1..=width {
            let color = if x < width {
                left.lerp(right, fraction(x, width))
            } else {
                run_color
            };
            if x == width || color != run_color {
                renderer.fill_rect(
                    Rect::new(rect.left() + run_start, row_y, x - run_start, 1),
                    run_color,
                );
                run_start = x;
                run_color = color;
            }
        }
    }
}

// =============================================================================
// Checkerboard
// =============================================================================

/// Fill `rect` with a checkerboard of `cell_size` cells.
///
/// The cell in the top-left corner uses `even`; cells alternate by
/// `(row + column) mod 2`. Cells on the right and bottom edges are clipped
/// to `rect`. A non-positive `cell_size` is treated as 1.
pub fn fill_checkerboard<R: Renderer + ?Sized>(
    renderer: &mut R,
    rect: Rect,
    cell_size: i32,
    even: Color,
    odd: Color,
) {
    for (cell, color) in checkerboard_cells(rect, cell_size, even, odd) {
        renderer.fill_rect(cell, color);
    }
}

/// The cells of a checkerboard fill, clipped to `rect`.
pub fn checkerboard_cells(rect: Rect, cell_size: i32, even: Color, odd: Color) -> Vec<(Rect, Color)> {
    let cell = cell_size.max(1);
    let mut cells = Vec::new();
    if rect.is_empty() {
        return cells;
    }

    // Cell offsets stay below the area's size for any `cell`.
    let rows = (rect.height() - 1) / cell + 1;
    let cols = (rect.width() - 1) / cell + 1;

    for row in 0..rows {
        let dy = row * cell;
        let height = cell.min(rect.height() - dy);
        for col in 0..cols {
            let dx = col * cell;
            let width = cell.min(rect.width() - dx);
            let color = if (row + col) % 2 == 0 { even } else { odd };
            cells.push((
                Rect::new(rect.left() + dx, rect.top() + dy, width, height),
                color,
            ));
        }
    }
    cells
}
