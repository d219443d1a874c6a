//! Runtime configuration.
//!
//! Plain structs with defaults and builder-style setters. With the `serde`
//! feature enabled they can be loaded from any serde format.

use horizon_trellis_render::Size;

/// Drag and drop behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Ticks after a drag starts during which a snapshot showing the pointer
    /// neither held nor released does not cancel the session.
    pub release_grace_ticks: u32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            release_grace_ticks: 1,
        }
    }
}

impl DragConfig {
    /// Set the grace period (builder pattern).
    #[inline]
    pub fn with_release_grace_ticks(mut self, ticks: u32) -> Self {
        self.release_grace_ticks = ticks;
        self
    }
}

/// Configuration for a [`Ui`](crate::widget::Ui) root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UiConfig {
    /// Size of the root node's bounds.
    pub viewport: Size,
    /// Whether Tab/Shift+Tab move focus.
    pub tab_navigation: bool,
    /// Drag and drop behavior.
    pub drag: DragConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800, 600),
            tab_navigation: true,
            drag: DragConfig::default(),
        }
    }
}

impl UiConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport size (builder pattern).
    #[inline]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Enable or disable Tab focus traversal (builder pattern).
    #[inline]
    pub fn with_tab_navigation(mut self, enabled: bool) -> Self {
        self.tab_navigation = enabled;
        self
    }

    /// Set drag and drop behavior (builder pattern).
    #[inline]
    pub fn with_drag(mut self, drag: DragConfig) -> Self {
        self.drag = drag;
        self
    }
}
