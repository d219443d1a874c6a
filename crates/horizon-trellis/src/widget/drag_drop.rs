//! Drag and drop coordination.
//!
//! This module provides [`DragDropManager`], the single-flight drag session
//! of one [`Ui`](super::Ui) root. At most one session exists at a time and
//! every session resolves exactly once: accepted by one target, cleared
//! because nobody accepted on release, or cancelled.
//!
//! # Protocol
//!
//! Each tick the root calls [`begin_frame`](DragDropManager::begin_frame)
//! before the update pass and [`end_frame`](DragDropManager::end_frame) after
//! it. In between, widgets drive the session through their
//! [`UpdateContext`](super::UpdateContext):
//!
//! ```ignore
//! // Drag source, on press:
//! ctx.begin_drag(DragPayload::new("color", Color::RED))?;
//!
//! // Drop target, every tick:
//! if ctx.is_hovered() && ctx.drag().is_dragging() {
//!     ctx.hover_drop_target();
//!     if let Some(payload) = ctx.accept_drop("color") {
//!         self.color = *payload.data::<Color>().unwrap();
//!     }
//! }
//! ```
//!
//! A session is only dropped on the tick the pointer is released. A session
//! that sees neither a held nor a released pointer is cancelled, except
//! during the first [`DragConfig::release_grace_ticks`] ticks after it
//! started, which covers hosts whose snapshot lags the press by a tick.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use horizon_trellis_core::NodeId;
use horizon_trellis_core::logging::targets;
use horizon_trellis_render::Point;

use super::input::InputSnapshot;
use crate::config::DragConfig;

/// Errors from drag session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// A session is already in flight; it was left untouched.
    #[error("a drag session is already active (payload kind {kind:?})")]
    SessionActive {
        /// Kind tag of the active session's payload.
        kind: String,
    },
}

/// Result type for drag operations.
pub type DragResult<T> = std::result::Result<T, DragError>;

/// Typed payload carried by a drag session.
///
/// The kind tag decides which targets may accept it; the data is opaque to
/// the coordinator and shared, so cloning a payload is cheap.
#[derive(Clone)]
pub struct DragPayload {
    kind: String,
    data: Arc<dyn Any + Send + Sync>,
    source: Option<NodeId>,
    start: Point,
}

impl DragPayload {
    /// Create a payload with a kind tag and data.
    pub fn new<T: Any + Send + Sync>(kind: impl Into<String>, data: T) -> Self {
        Self {
            kind: kind.into(),
            data: Arc::new(data),
            source: None,
            start: Point::ZERO,
        }
    }

    /// The kind tag.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Whether this payload is accepted by a target asking for `kind`.
    ///
    /// Comparison ignores ASCII case; an empty `kind` accepts anything.
    pub fn matches(&self, kind: &str) -> bool {
        kind.is_empty() || self.kind.eq_ignore_ascii_case(kind)
    }

    /// The data, if it is a `T`.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// The shared data handle.
    pub fn data_arc(&self) -> Arc<dyn Any + Send + Sync> {
        Arc::clone(&self.data)
    }

    /// The node that started the drag.
    #[inline]
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Pointer position where the drag started.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }
}

impl fmt::Debug for DragPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragPayload")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}

/// An in-flight drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    payload: DragPayload,
    pointer: Point,
    /// Ticks begun since the session started.
    age: u32,
}

impl DragSession {
    /// The dragged payload.
    #[inline]
    pub fn payload(&self) -> &DragPayload {
        &self.payload
    }

    /// Pointer position as of the current tick.
    #[inline]
    pub fn pointer(&self) -> Point {
        self.pointer
    }
}

/// How the last session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// A target took the payload.
    Accepted {
        /// The accepting node.
        target: NodeId,
    },
    /// The pointer was released and nobody accepted.
    Unresolved,
    /// The session was cancelled, explicitly or for lack of pointer evidence.
    Cancelled,
}

/// Coordinator for the drag session of one root.
#[derive(Debug, Default)]
pub struct DragDropManager {
    session: Option<DragSession>,
    pointer: Point,
    drop_requested: bool,
    hovered_target: Option<NodeId>,
    accepted_target: Option<NodeId>,
    last_outcome: Option<DragOutcome>,
    config: DragConfig,
}

impl DragDropManager {
    /// Creates a new drag/drop manager with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with the given configuration.
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    // =========================================================================
    // Frame Protocol
    // =========================================================================

    /// Start a tick.
    ///
    /// Records the pointer, recomputes whether a drop is requested this tick
    /// and resets the per-tick targets. A session without pointer evidence
    /// past its grace period is cancelled.
    pub fn begin_frame(&mut self, input: &InputSnapshot) {
        self.pointer = input.pointer;
        self.drop_requested = input.pointer_released;
        self.hovered_target = None;
        self.accepted_target = None;

        let grace = self.config.release_grace_ticks;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.pointer = input.pointer;
        session.age = session.age.saturating_add(1);

        if !input.has_pointer_evidence() {
            if session.age <= grace {
                tracing::trace!(target: targets::DRAG, age = session.age, "drag kept alive by grace period");
            } else {
                tracing::debug!(target: targets::DRAG, kind = %session.payload.kind, "drag cancelled: pointer not held");
                self.session = None;
                self.last_outcome = Some(DragOutcome::Cancelled);
            }
        }
    }

    /// Finish a tick.
    ///
    /// If the pointer was released and nobody accepted the payload, the
    /// session is cleared. Returns `true` in that case.
    pub fn end_frame(&mut self) -> bool {
        if !self.drop_requested {
            return false;
        }
        let Some(session) = self.session.take() else {
            return false;
        };
        tracing::debug!(target: targets::DRAG, kind = %session.payload.kind, "drop unresolved");
        self.last_outcome = Some(DragOutcome::Unresolved);
        true
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Start a drag from `source` at `start`.
    ///
    /// The payload is stamped with the source and start point.
    ///
    /// # Errors
    ///
    /// [`DragError::SessionActive`] if a session is already in flight; the
    /// active session is not modified.
    pub fn begin_drag(
        &mut self,
        source: NodeId,
        mut payload: DragPayload,
        start: Point,
    ) -> DragResult<()> {
        if let Some(active) = &self.session {
            tracing::debug!(target: targets::DRAG, ?source, active = %active.payload.kind, "begin_drag rejected");
            return Err(DragError::SessionActive {
                kind: active.payload.kind.clone(),
            });
        }

        payload.source = Some(source);
        payload.start = start;
        tracing::debug!(target: targets::DRAG, ?source, kind = %payload.kind, ?start, "drag started");
        self.session = Some(DragSession {
            payload,
            pointer: start,
            age: 0,
        });
        self.last_outcome = None;
        Ok(())
    }

    /// Record the node currently under the dragged pointer. Informational.
    pub fn set_hovered_target(&mut self, target: Option<NodeId>) {
        self.hovered_target = target;
    }

    /// Take the payload for `target`.
    ///
    /// Succeeds only while a session exists, the pointer is being released
    /// this tick and the payload [matches](DragPayload::matches) `kind`. On
    /// success the session ends and the payload is returned; later calls in
    /// the same tick return `None`.
    pub fn accept_payload(&mut self, target: NodeId, kind: &str) -> Option<DragPayload> {
        if !self.drop_requested {
            return None;
        }
        if !self.session.as_ref()?.payload.matches(kind) {
            return None;
        }

        let session = self.session.take()?;
        self.accepted_target = Some(target);
        self.last_outcome = Some(DragOutcome::Accepted { target });
        tracing::debug!(target: targets::DRAG, ?target, kind = %session.payload.kind, "drop accepted");
        Some(session.payload)
    }

    /// Cancel the active session, if any.
    ///
    /// Returns `true` if a session was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        tracing::debug!(target: targets::DRAG, "drag cancelled");
        self.last_outcome = Some(DragOutcome::Cancelled);
        true
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Returns true if a drag is currently active.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session.
    #[inline]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// The payload of the active session.
    pub fn payload(&self) -> Option<&DragPayload> {
        self.session.as_ref().map(|session| &session.payload)
    }

    /// Whether the pointer is released this tick.
    #[inline]
    pub fn drop_requested(&self) -> bool {
        self.drop_requested
    }

    /// The node reported under the pointer this tick.
    #[inline]
    pub fn hovered_target(&self) -> Option<NodeId> {
        self.hovered_target
    }

    /// The node that accepted the payload this tick.
    #[inline]
    pub fn accepted_target(&self) -> Option<NodeId> {
        self.accepted_target
    }

    /// Pointer position as of the current tick.
    #[inline]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Pointer movement since the drag started, as an offset.
    pub fn drag_delta(&self) -> Option<Point> {
        self.session.as_ref().map(|session| {
            let (dx, dy) = session.pointer.delta(session.payload.start);
            Point::new(dx, dy)
        })
    }

    /// How the most recent session ended; reset when a new session starts.
    #[inline]
    pub fn last_outcome(&self) -> Option<DragOutcome> {
        self.last_outcome
    }
}

static_assertions::assert_impl_all!(DragPayload: Send, Sync, Clone);
static_assertions::assert_impl_all!(DragDropManager: Send, Sync);
