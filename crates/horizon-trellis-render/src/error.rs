//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while driving a render backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// `pop_clip` was called with no matching `push_clip`.
    #[error("clip stack underflow: pop_clip without a matching push_clip")]
    ClipStackUnderflow,

    /// A frame ended while clip rectangles were still pushed.
    #[error("unbalanced clip stack at end of frame: {depth} clip(s) still pushed")]
    UnbalancedClipStack { depth: usize },

    /// Invalid viewport dimensions (zero or negative width or height).
    #[error("invalid viewport dimensions: {width}x{height}")]
    InvalidViewport { width: i32, height: i32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
