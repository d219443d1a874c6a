//! Horizon Trellis - a retained-mode UI composition runtime.
//!
//! This is the main crate that ties the pieces together: the widget tree,
//! per-frame traversal, focus management, modal traps and drag & drop. It
//! re-exports the core and rendering crates so hosts depend on one crate.
//!
//! - [`widget`]: Widgets, the [`Ui`](widget::Ui) root and its managers
//! - [`render`]: Geometry and the backend [`Renderer`](render::Renderer) contract
//! - [`config`]: Runtime configuration
//!
//! # Example
//!
//! ```
//! use horizon_trellis::render::{RecordingRenderer, Rect, Size};
//! use horizon_trellis::widget::{Container, InputSnapshot, Ui};
//! use horizon_trellis::UiConfig;
//!
//! let mut ui = Ui::new(UiConfig::default().with_viewport(Size::new(200, 100)));
//! let panel = ui.insert(
//!     Container::new("panel")
//!         .with_bounds(Rect::new(10, 10, 80, 40))
//!         .with_background(horizon_trellis::render::Color::GRAY),
//! );
//! ui.add_child(ui.root(), panel)?;
//!
//! let mut renderer = RecordingRenderer::new(Size::new(200, 100))?;
//! ui.update(&InputSnapshot::new(), 1.0 / 60.0);
//! ui.render(&mut renderer)?;
//!
//! assert_eq!(ui.hit_test((20, 20).into()), Some(panel));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod widget;

pub use config::{DragConfig, UiConfig};
pub use horizon_trellis_core::*;

/// Geometry, the backend contract and shape helpers.
pub mod render {
    pub use horizon_trellis_render::*;
}
