//! Headless recording backend.
//!
//! [`RecordingRenderer`] implements [`Renderer`] by appending every call to a
//! command list instead of rasterizing. It is used for headless hosts,
//! golden-output tests and for debugging draw order. Text is measured with a
//! fixed-cell monospace metric, so layouts computed against it are
//! deterministic.

use crate::clip::ClipStack;
use crate::error::{RenderError, RenderResult};
use crate::renderer::{Renderer, effective_scale};
use crate::types::{Color, Point, Rect, Size};

/// A single recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// A solid rectangle fill.
    FillRect {
        rect: Rect,
        color: Color,
        /// The visible region when the command was issued.
        clip: Rect,
    },
    /// A rectangle outline.
    StrokeRect {
        rect: Rect,
        color: Color,
        thickness: i32,
        clip: Rect,
    },
    /// A text run.
    Text {
        text: String,
        position: Point,
        color: Color,
        scale: u32,
        clip: Rect,
    },
    /// A clip push, with the requested and resulting rectangles.
    PushClip { requested: Rect, effective: Rect },
    /// A clip pop.
    PopClip,
}

impl DrawCommand {
    /// Whether the command draws pixels (as opposed to clip bookkeeping).
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::FillRect { .. } | Self::StrokeRect { .. } | Self::Text { .. }
        )
    }
}

/// A [`Renderer`] that records commands.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    clip: ClipStack,
    commands: Vec<DrawCommand>,
    glyph_size: Size,
}

impl RecordingRenderer {
    /// Default glyph cell: 5x7 glyphs with one pixel of spacing.
    pub const DEFAULT_GLYPH_SIZE: Size = Size::new(6, 8);

    /// Create a recorder with the given viewport size.
    pub fn new(viewport: Size) -> RenderResult<Self> {
        if viewport.is_empty() {
            return Err(RenderError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            clip: ClipStack::new(Rect::from_origin_size(Point::ZERO, viewport)),
            commands: Vec::new(),
            glyph_size: Self::DEFAULT_GLYPH_SIZE,
        })
    }

    /// Use a different glyph cell for text measurement (builder pattern).
    pub fn with_glyph_size(mut self, glyph_size: Size) -> Self {
        self.glyph_size = glyph_size;
        self
    }

    /// All recorded commands in issue order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current clip depth.
    pub fn clip_depth(&self) -> usize {
        self.clip.depth()
    }

    /// Start a new frame: drop recorded commands and verify the clip stack.
    pub fn begin_frame(&mut self) -> RenderResult<()> {
        self.commands.clear();
        let balanced = self.clip.ensure_balanced();
        self.clip.reset();
        balanced
    }

    /// Finish a frame, failing if clips were left pushed.
    pub fn end_frame(&mut self) -> RenderResult<()> {
        self.clip.ensure_balanced()
    }

    /// Visible parts of every fill, in issue order.
    pub fn visible_fills(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color, clip } => {
                    clip.intersect(rect).map(|visible| (visible, *color))
                }
                _ => None,
            })
            .collect()
    }

    /// Recorded text runs, in issue order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn viewport(&self) -> Rect {
        self.clip.viewport()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            clip: self.clip.current(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32) {
        if rect.is_empty() || thickness <= 0 {
            return;
        }
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            thickness,
            clip: self.clip.current(),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color, scale: u32) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            color,
            scale: effective_scale(scale),
            clip: self.clip.current(),
        });
    }

    fn measure_text(&self, text: &str, scale: u32) -> Size {
        let scale = i32::try_from(effective_scale(scale)).unwrap_or(i32::MAX);
        let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let longest = i32::try_from(longest).unwrap_or(i32::MAX);
        let lines = i32::try_from(text.lines().count().max(1)).unwrap_or(i32::MAX);
        Size::new(
            longest
                .saturating_mul(self.glyph_size.width)
                .saturating_mul(scale),
            lines
                .saturating_mul(self.glyph_size.height)
                .saturating_mul(scale),
        )
    }

    fn push_clip(&mut self, rect: Rect) {
        let effective = self.clip.push(rect);
        tracing::trace!(target: "horizon_trellis_render::recorder", ?rect, ?effective, "push clip");
        self.commands.push(DrawCommand::PushClip {
            requested: rect,
            effective,
        });
    }

    fn pop_clip(&mut self) -> RenderResult<()> {
        self.clip.pop()?;
        self.commands.push(DrawCommand::PopClip);
        Ok(())
    }

    fn clip_bounds(&self) -> Rect {
        self.clip.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_viewport() {
        assert_eq!(
            RecordingRenderer::new(Size::new(0, 10)).unwrap_err(),
            RenderError::InvalidViewport {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_measure_text_saturates_at_huge_scale() {
        let renderer = RecordingRenderer::new(Size::new(100, 100)).unwrap();
        let size = renderer.measure_text("abc", 1 << 28);
        assert_eq!(size, Size::new(i32::MAX, i32::MAX));

        let size = renderer.measure_text("ab\nabcd", u32::MAX);
        assert_eq!(size, Size::new(i32::MAX, i32::MAX));
        assert_eq!(renderer.measure_text("", 0).width, 0);
    }

    #[test]
    fn test_fills_record_current_clip() {
        let mut renderer = RecordingRenderer::new(Size::new(100, 100)).unwrap();
        renderer.push_clip(Rect::new(0, 0, 50, 50));
        renderer.fill_rect(Rect::new(40, 40, 20, 20), Color::RED);
        renderer.pop_clip().unwrap();
        renderer.fill_rect(Rect::new(40, 40, 20, 20), Color::BLUE);

        assert_eq!(
            renderer.visible_fills(),
            vec![
                (Rect::new(40, 40, 10, 10), Color::RED),
                (Rect::new(40, 40, 20, 20), Color::BLUE),
            ]
        );
        assert!(renderer.end_frame().is_ok());
    }

    #[test]
    fn test_measure_text_uses_glyph_cells() {
        let renderer = RecordingRenderer::new(Size::new(100, 100)).unwrap();
        assert_eq!(renderer.measure_text("abc", 1), Size::new(18, 8));
        assert_eq!(renderer.measure_text("abc", 2), Size::new(36, 16));
        assert_eq!(renderer.measure_text("ab\nabcd", 0), Size::new(24, 16));
        assert_eq!(renderer.measure_text("", 1), Size::new(0, 8));
    }

    #[test]
    fn test_pop_without_push_fails() {
        let mut renderer = RecordingRenderer::new(Size::new(10, 10)).unwrap();
        assert_eq!(renderer.pop_clip(), Err(RenderError::ClipStackUnderflow));
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_default_rounded_fill_uses_rect_fills() {
        let mut renderer = RecordingRenderer::new(Size::new(64, 64)).unwrap();
        renderer.fill_rounded_rect(Rect::new(0, 0, 32, 16), 4, Color::WHITE);
        assert!(renderer
            .commands()
            .iter()
            .all(|c| matches!(c, DrawCommand::FillRect { .. })));
        assert!(renderer.commands().len() > 1);
    }
}
