//! Axis-aligned clip stack.
//!
//! Backends that cannot clip natively (or that want to cull draws before
//! submitting them) can use [`ClipStack`] to track the visible region. The
//! visible region is always the intersection of every pushed rectangle and
//! the viewport.

use crate::error::{RenderError, RenderResult};
use crate::types::{Rect, Size};

/// Manages nested rectangular clip regions.
///
/// Each entry stores the *effective* clip (already intersected with the
/// entries below it and the viewport), so [`current`](Self::current) is O(1).
#[derive(Debug, Clone)]
pub struct ClipStack {
    viewport: Rect,
    stack: Vec<Rect>,
}

impl ClipStack {
    /// Create an empty clip stack for the given viewport.
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            stack: Vec::new(),
        }
    }

    /// The viewport every clip is intersected with.
    #[inline]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Replace the viewport. Only valid between frames (empty stack).
    pub fn set_viewport(&mut self, viewport: Rect) {
        debug_assert!(self.stack.is_empty(), "viewport changed while clips are pushed");
        self.viewport = viewport;
    }

    /// Push a clip rectangle and return the resulting effective clip.
    ///
    /// When the rectangle does not overlap the current region the effective
    /// clip is an empty rectangle positioned at `rect`'s origin, so nothing
    /// drawn until the matching [`pop`](Self::pop) is visible.
    pub fn push(&mut self, rect: Rect) -> Rect {
        let effective = Self::clip_against(self.current(), rect);
        self.stack.push(effective);
        effective
    }

    /// Pop the most recent clip rectangle.
    pub fn pop(&mut self) -> RenderResult<Rect> {
        self.stack.pop().ok_or(RenderError::ClipStackUnderflow)
    }

    /// The current visible region.
    #[inline]
    pub fn current(&self) -> Rect {
        self.stack.last().copied().unwrap_or(self.viewport)
    }

    /// Number of pushed clips.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check that every push was matched by a pop.
    pub fn ensure_balanced(&self) -> RenderResult<()> {
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(RenderError::UnbalancedClipStack {
                depth: self.stack.len(),
            })
        }
    }

    /// Drop all pushed clips.
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    /// Compute the part of `rect` that is visible in the current region.
    #[inline]
    pub fn visible_part(&self, rect: Rect) -> Option<Rect> {
        self.current().intersect(&rect)
    }

    fn clip_against(current: Rect, rect: Rect) -> Rect {
        current
            .intersect(&rect)
            .unwrap_or(Rect::from_origin_size(rect.origin, Size::ZERO))
    }
}
