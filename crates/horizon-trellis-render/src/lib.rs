//! Backend-agnostic drawing layer for Horizon Trellis.
//!
//! This crate defines what the widget tree needs from a graphics backend and
//! nothing more:
//!
//! - **Geometry**: integer [`Point`], [`Size`], [`Rect`] and 8-bit [`Color`]
//! - **Backend contract**: the object-safe [`Renderer`] trait (rectangle
//!   fills and outlines, text, a strict clip stack)
//! - **Clip bookkeeping**: [`ClipStack`] for backends that clip in software
//! - **Shape compositing**: rounded rectangles, gradients and checkerboards
//!   built purely from rectangle fills ([`shapes`])
//! - **Headless backend**: [`RecordingRenderer`], which records draw calls
//!
//! # Using the Renderer
//!
//! ```
//! use horizon_trellis_render::{Color, Rect, RecordingRenderer, Renderer, Size};
//!
//! # fn main() -> horizon_trellis_render::RenderResult<()> {
//! let mut renderer = RecordingRenderer::new(Size::new(320, 240))?;
//!
//! renderer.push_clip(Rect::new(10, 10, 100, 50));
//! renderer.fill_rounded_rect(Rect::new(0, 0, 200, 200), 6, Color::from_rgb(65, 105, 225));
//! renderer.pop_clip()?;
//!
//! renderer.end_frame()?;
//! assert!(!renderer.visible_fills().is_empty());
//! # Ok(())
//! # }
//! ```

mod clip;
mod error;
mod recorder;
mod renderer;
pub mod shapes;
mod types;

pub use clip::ClipStack;
pub use error::{RenderError, RenderResult};
pub use recorder::{DrawCommand, RecordingRenderer};
pub use renderer::{FrameStats, Renderer, effective_scale};
pub use shapes::GradientCorners;
pub use types::{Color, Point, Rect, Size, lerp_channel};
