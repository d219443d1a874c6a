//! Integration tests for drag and drop driven through full update ticks.

use std::sync::{Arc, Mutex};

use horizon_trellis::render::{Color, Point, Rect};
use horizon_trellis::widget::{
    DragOutcome, DragPayload, InputSnapshot, Ui, UpdateContext, Widget, WidgetBase,
};
use horizon_trellis::{DragConfig, NodeId, UiConfig};

/// Starts a drag carrying its color when pressed.
struct Source {
    base: WidgetBase,
    kind: &'static str,
    color: Color,
    rejected: Arc<Mutex<u32>>,
}

impl Widget for Source {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if ctx.is_pressed() && ctx.begin_drag(DragPayload::new(self.kind, self.color)).is_err() {
            *self.rejected.lock().unwrap() += 1;
        }
    }
}

/// Accepts payloads of one kind dropped onto it.
struct Target {
    base: WidgetBase,
    kind: &'static str,
    received: Arc<Mutex<Vec<(String, Color)>>>,
}

impl Widget for Target {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if !ctx.is_hovered() || !ctx.drag().is_dragging() {
            return;
        }
        ctx.hover_drop_target();
        if let Some(payload) = ctx.accept_drop(self.kind) {
            let color = payload.data::<Color>().copied().unwrap_or(Color::TRANSPARENT);
            self.received
                .lock()
                .unwrap()
                .push((self.base.id().to_owned(), color));
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Fixture {
    ui: Ui,
    source: NodeId,
    rejected: Arc<Mutex<u32>>,
    received: Arc<Mutex<Vec<(String, Color)>>>,
}

impl Fixture {
    fn new(config: UiConfig) -> Self {
        init_tracing();
        let mut ui = Ui::new(config);
        let rejected = Arc::new(Mutex::new(0));
        let received = Arc::new(Mutex::new(Vec::new()));

        let source = ui.insert(Source {
            base: WidgetBase::new("source").with_bounds(Rect::new(0, 0, 20, 20)),
            kind: "color",
            color: Color::RED,
            rejected: Arc::clone(&rejected),
        });
        ui.add_child(ui.root(), source).unwrap();

        Self {
            ui,
            source,
            rejected,
            received,
        }
    }

    fn add_target(&mut self, name: &str, kind: &'static str, bounds: Rect) -> NodeId {
        let target = self.ui.insert(Target {
            base: WidgetBase::new(name).with_bounds(bounds),
            kind,
            received: Arc::clone(&self.received),
        });
        self.ui.add_child(self.ui.root(), target).unwrap();
        target
    }

    fn add_source(&mut self, name: &str, bounds: Rect) -> NodeId {
        let source = self.ui.insert(Source {
            base: WidgetBase::new(name).with_bounds(bounds),
            kind: "text",
            color: Color::BLUE,
            rejected: Arc::clone(&self.rejected),
        });
        self.ui.add_child(self.ui.root(), source).unwrap();
        source
    }

    fn tick(&mut self, input: InputSnapshot) {
        self.ui.update(&input, 1.0 / 60.0);
    }

    fn received(&self) -> Vec<(String, Color)> {
        self.received.lock().unwrap().clone()
    }
}

#[test]
fn test_drop_on_matching_target() {
    let mut fx = Fixture::new(UiConfig::default());
    let well = fx.add_target("well", "COLOR", Rect::new(100, 100, 40, 40));

    fx.tick(InputSnapshot::press(5, 5));
    assert!(fx.ui.drag().is_dragging());
    assert_eq!(fx.ui.drag().payload().unwrap().source(), Some(fx.source));
    assert_eq!(fx.ui.drag().payload().unwrap().start(), Point::new(5, 5));

    fx.tick(InputSnapshot::held(110, 110));
    assert!(fx.ui.drag().is_dragging());
    assert_eq!(fx.ui.drag().hovered_target(), Some(well));
    assert_eq!(fx.ui.drag().drag_delta(), Some(Point::new(105, 105)));
    assert!(fx.received().is_empty());

    fx.tick(InputSnapshot::release(110, 110));
    assert!(!fx.ui.drag().is_dragging());
    assert_eq!(fx.received(), vec![("well".to_owned(), Color::RED)]);
    assert_eq!(fx.ui.drag().last_outcome(), Some(DragOutcome::Accepted { target: well }));
}

#[test]
fn test_overlapping_targets_accept_exactly_once() {
    let mut fx = Fixture::new(UiConfig::default());
    fx.add_target("lower", "color", Rect::new(100, 100, 40, 40));
    fx.add_target("upper", "", Rect::new(100, 100, 40, 40));

    fx.tick(InputSnapshot::press(5, 5));
    fx.tick(InputSnapshot::release(110, 110));

    // Update runs in pre-order, so the earlier sibling sees the drop first.
    assert_eq!(fx.received(), vec![("lower".to_owned(), Color::RED)]);
}

#[test]
fn test_mismatched_target_leaves_drop_unresolved() {
    let mut fx = Fixture::new(UiConfig::default());
    fx.add_target("files", "file", Rect::new(100, 100, 40, 40));

    fx.tick(InputSnapshot::press(5, 5));
    fx.tick(InputSnapshot::held(110, 110));
    fx.tick(InputSnapshot::release(110, 110));

    assert!(fx.received().is_empty());
    assert!(!fx.ui.drag().is_dragging());
    assert_eq!(fx.ui.drag().last_outcome(), Some(DragOutcome::Unresolved));
}

#[test]
fn test_release_over_nothing_clears_session() {
    let mut fx = Fixture::new(UiConfig::default());

    fx.tick(InputSnapshot::press(5, 5));
    fx.tick(InputSnapshot::release(180, 180));

    assert!(!fx.ui.drag().is_dragging());
    assert_eq!(fx.ui.drag().last_outcome(), Some(DragOutcome::Unresolved));
}

#[test]
fn test_second_source_rejected_while_dragging() {
    let mut fx = Fixture::new(UiConfig::default());
    let other = fx.add_source("other", Rect::new(0, 0, 20, 20));

    // Both sources sit under the press; the first one visited wins.
    fx.tick(InputSnapshot::press(5, 5));
    assert_eq!(*fx.rejected.lock().unwrap(), 1);
    let payload = fx.ui.drag().payload().unwrap();
    assert_eq!(payload.kind(), "color");
    assert_ne!(payload.source(), Some(other));
}

#[test]
fn test_stale_snapshot_within_grace_keeps_session() {
    let mut fx = Fixture::new(UiConfig::default());

    fx.tick(InputSnapshot::press(5, 5));
    // A snapshot lagging the press: neither held nor released.
    fx.tick(InputSnapshot::hover(6, 6));
    assert!(fx.ui.drag().is_dragging());

    fx.tick(InputSnapshot::held(8, 8));
    assert!(fx.ui.drag().is_dragging());

    fx.tick(InputSnapshot::hover(9, 9));
    assert!(!fx.ui.drag().is_dragging());
    assert_eq!(fx.ui.drag().last_outcome(), Some(DragOutcome::Cancelled));
}

#[test]
fn test_zero_grace_cancels_immediately() {
    let config = UiConfig::default().with_drag(DragConfig::default().with_release_grace_ticks(0));
    let mut fx = Fixture::new(config);

    fx.tick(InputSnapshot::press(5, 5));
    fx.tick(InputSnapshot::hover(6, 6));
    assert!(!fx.ui.drag().is_dragging());
}

#[test]
fn test_host_cancel_between_ticks() {
    let mut fx = Fixture::new(UiConfig::default());
    fx.add_target("well", "color", Rect::new(100, 100, 40, 40));

    fx.tick(InputSnapshot::press(5, 5));
    assert!(fx.ui.drag_mut().cancel());
    fx.tick(InputSnapshot::release(110, 110));

    assert!(fx.received().is_empty());
    assert_eq!(fx.ui.drag().last_outcome(), Some(DragOutcome::Cancelled));
}

#[test]
fn test_new_drag_after_resolution() {
    let mut fx = Fixture::new(UiConfig::default());
    fx.add_target("well", "color", Rect::new(100, 100, 40, 40));

    fx.tick(InputSnapshot::press(5, 5));
    fx.tick(InputSnapshot::release(110, 110));
    fx.tick(InputSnapshot::press(5, 5));
    fx.tick(InputSnapshot::release(110, 110));

    assert_eq!(fx.received().len(), 2);
    assert_eq!(*fx.rejected.lock().unwrap(), 0);
}
