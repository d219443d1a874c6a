//! Widget system for Horizon Trellis.
//!
//! This module provides the composition runtime every concrete widget builds
//! on:
//!
//! - [`Widget`] trait: The capability interface for all UI elements
//! - [`WidgetBase`]: Common per-node state (id, bounds, visibility, focus)
//! - [`Ui`]: The root that owns a tree and drives update, render and hit
//!   testing
//! - [`FocusManager`]: Single focused widget and gated tab order
//! - [`ModalStack`]: Focus and pointer traps for modal overlays
//! - [`DragDropManager`]: Single-flight drag sessions with exactly-once drops
//!
//! # Creating a Widget
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement the `Widget` trait
//! 3. Override `update()` to react to input and `render()` to draw
//!
//! ```
//! use horizon_trellis::render::{Color, Rect};
//! use horizon_trellis::widget::*;
//!
//! struct Toggle {
//!     base: WidgetBase,
//!     on: bool,
//! }
//!
//! impl Widget for Toggle {
//!     fn widget_base(&self) -> &WidgetBase { &self.base }
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
//!
//!     fn update(&mut self, ctx: &mut UpdateContext<'_>) {
//!         let activated = ctx.is_pressed()
//!             || (ctx.has_focus() && ctx.input().pressed(NavKeys::ENTER));
//!         if activated && !ctx.is_blocked() {
//!             self.on = !self.on;
//!             ctx.request_focus(FocusReason::Pointer);
//!         }
//!     }
//!
//!     fn render(&self, ctx: &mut PaintContext<'_>) {
//!         ctx.fill_background(if self.on { Color::GREEN } else { Color::DARK_GRAY });
//!         ctx.draw_focus_indicator(1);
//!     }
//! }
//!
//! let mut ui = Ui::default();
//! let toggle = ui.insert(Toggle {
//!     base: WidgetBase::new("toggle")
//!         .with_bounds(Rect::new(10, 10, 40, 20))
//!         .with_focusable(true),
//!     on: false,
//! });
//! ui.add_child(ui.root(), toggle).unwrap();
//!
//! ui.update(&InputSnapshot::press(15, 15), 0.016);
//! assert!(ui.widget_as::<Toggle>(toggle).unwrap().on);
//! assert_eq!(ui.focused(), Some(toggle));
//! ```

mod access;
mod base;
mod container;
mod drag_drop;
mod focus;
mod input;
mod modal;
mod traits;
mod ui;


pub use access::{WidgetAccess, WidgetTree};
pub use base::WidgetBase;
pub use container::Container;
pub use drag_drop::{
    DragDropManager, DragError, DragOutcome, DragPayload, DragResult, DragSession,
};
pub use focus::{FocusManager, FocusReason};
pub use input::{InputSnapshot, Modifiers, NavKeys};
pub use modal::{ModalEntry, ModalStack};
pub use traits::{PaintContext, TabTraversal, UpdateContext, Widget};
pub use ui::Ui;
