//! Normalized per-tick input.
//!
//! The runtime never decodes platform events. The host folds whatever its
//! windowing layer reports into one [`InputSnapshot`] per tick and hands it
//! to [`Ui::update`](super::Ui::update); every widget visited that tick sees
//! the same snapshot.

use bitflags::bitflags;
use horizon_trellis_render::Point;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either Shift key.
        const SHIFT = 1 << 0;
        /// Either Control key.
        const CTRL = 1 << 1;
    }
}

bitflags! {
    /// Navigation intents pressed this tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NavKeys: u16 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const HOME = 1 << 4;
        const END = 1 << 5;
        const BACKSPACE = 1 << 6;
        const DELETE = 1 << 7;
        /// Focus traversal. Shift+Tab is `TAB` with [`Modifiers::SHIFT`].
        const TAB = 1 << 8;
        const ENTER = 1 << 9;
        const ESCAPE = 1 << 10;
    }
}

/// Everything a widget may read about user input for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Pointer position in absolute coordinates.
    pub pointer: Point,
    /// Primary button is held.
    pub pointer_down: bool,
    /// Primary button went down this tick.
    pub pointer_pressed: bool,
    /// Primary button went up this tick.
    pub pointer_released: bool,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Scroll wheel delta (x, y) in lines.
    pub scroll_delta: (f32, f32),
    /// Characters typed this tick, in order.
    pub text: Vec<char>,
    /// Navigation keys pressed this tick.
    pub nav: NavKeys,
}

impl InputSnapshot {
    /// An idle snapshot with the pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer hovering at `(x, y)` with no buttons held.
    pub fn hover(x: i32, y: i32) -> Self {
        Self {
            pointer: Point::new(x, y),
            ..Self::default()
        }
    }

    /// Primary button pressed at `(x, y)` this tick.
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            pointer: Point::new(x, y),
            pointer_down: true,
            pointer_pressed: true,
            ..Self::default()
        }
    }

    /// Primary button held at `(x, y)`.
    pub fn held(x: i32, y: i32) -> Self {
        Self {
            pointer: Point::new(x, y),
            pointer_down: true,
            ..Self::default()
        }
    }

    /// Primary button released at `(x, y)` this tick.
    pub fn release(x: i32, y: i32) -> Self {
        Self {
            pointer: Point::new(x, y),
            pointer_released: true,
            ..Self::default()
        }
    }

    /// A single Tab press (Shift+Tab when `backward`).
    pub fn tab(backward: bool) -> Self {
        let modifiers = if backward {
            Modifiers::SHIFT
        } else {
            Modifiers::empty()
        };
        Self {
            nav: NavKeys::TAB,
            modifiers,
            ..Self::default()
        }
    }

    /// Add navigation keys (builder pattern).
    #[inline]
    pub fn with_nav(mut self, nav: NavKeys) -> Self {
        self.nav |= nav;
        self
    }

    /// Set modifiers (builder pattern).
    #[inline]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Append typed text (builder pattern).
    pub fn with_text(mut self, text: &str) -> Self {
        self.text.extend(text.chars());
        self
    }

    /// Set the scroll delta (builder pattern).
    #[inline]
    pub fn with_scroll(mut self, dx: f32, dy: f32) -> Self {
        self.scroll_delta = (dx, dy);
        self
    }

    /// Whether Shift is held.
    #[inline]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether Control is held.
    #[inline]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Whether every key in `keys` was pressed this tick.
    #[inline]
    pub fn pressed(&self, keys: NavKeys) -> bool {
        self.nav.contains(keys)
    }

    /// Whether an unconsumed Tab press is present.
    #[inline]
    pub fn tab_pressed(&self) -> bool {
        self.nav.contains(NavKeys::TAB)
    }

    /// Remove `keys` from the snapshot, returning whether any were present.
    pub fn consume(&mut self, keys: NavKeys) -> bool {
        let present = self.nav.intersects(keys);
        self.nav.remove(keys);
        present
    }

    /// Whether the pointer button is held or was released this tick.
    ///
    /// This is the evidence an in-flight drag needs to stay alive.
    #[inline]
    pub fn has_pointer_evidence(&self) -> bool {
        self.pointer_down || self.pointer_released
    }
}
