//! Integration tests for the render and hit-test passes on the recording backend.

use horizon_trellis::render::{
    Color, DrawCommand, Point, RecordingRenderer, Rect, RenderError, RenderResult, Renderer, Size,
};
use horizon_trellis::widget::{
    Container, InputSnapshot, PaintContext, Ui, UpdateContext, Widget, WidgetBase,
};
use horizon_trellis::{NodeId, UiConfig};

/// A flat block of color that can also paint an overlay.
struct Swatch {
    base: WidgetBase,
    color: Color,
    overlay: Option<Color>,
    hit_target: bool,
}

impl Swatch {
    fn new(name: &str, bounds: Rect, color: Color) -> Self {
        Self {
            base: WidgetBase::new(name)
                .with_bounds(bounds)
                .with_focusable(true),
            color,
            overlay: None,
            hit_target: true,
        }
    }

    fn with_overlay(mut self, color: Color) -> Self {
        self.overlay = Some(color);
        self
    }

    fn decorative(mut self) -> Self {
        self.hit_target = false;
        self
    }
}

impl Widget for Swatch {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if ctx.is_pressed() && !ctx.is_blocked() {
            ctx.request_focus(horizon_trellis::widget::FocusReason::Pointer);
        }
    }

    fn render(&self, ctx: &mut PaintContext<'_>) {
        ctx.fill_background(self.color);
        ctx.draw_focus_indicator(0);
    }

    fn render_overlay(&self, ctx: &mut PaintContext<'_>) {
        if let Some(color) = self.overlay {
            let bounds = ctx.bounds();
            ctx.renderer().fill_rect(bounds, color);
        }
    }

    fn is_hit_target(&self) -> bool {
        self.hit_target
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup() -> (Ui, RecordingRenderer) {
    init_tracing();
    let ui = Ui::new(UiConfig::default().with_viewport(Size::new(200, 200)));
    let renderer = RecordingRenderer::new(Size::new(200, 200)).expect("valid viewport");
    (ui, renderer)
}

fn attach<W: Widget>(ui: &mut Ui, parent: NodeId, widget: W) -> NodeId {
    let id = ui.insert(widget);
    ui.add_child(parent, id).expect("attach");
    id
}

fn fill_colors(renderer: &RecordingRenderer) -> Vec<Color> {
    renderer
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::FillRect { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Render
// =============================================================================

#[test]
fn test_render_is_preorder_and_skips_hidden_subtrees() {
    let (mut ui, mut renderer) = setup();
    let root = ui.root();
    let a = attach(&mut ui, root, Swatch::new("a", Rect::new(0, 0, 50, 50), Color::RED));
    attach(&mut ui, a, Swatch::new("a1", Rect::new(5, 5, 10, 10), Color::GREEN));
    let b = attach(&mut ui, root, Swatch::new("b", Rect::new(60, 0, 50, 50), Color::BLUE));
    attach(&mut ui, b, Swatch::new("b1", Rect::new(65, 5, 10, 10), Color::YELLOW));
    attach(&mut ui, root, Swatch::new("c", Rect::new(120, 0, 50, 50), Color::CYAN));

    ui.widget_mut(b).unwrap().set_visible(false);
    let stats = ui.render(&mut renderer).unwrap();

    assert_eq!(fill_colors(&renderer), vec![Color::RED, Color::GREEN, Color::CYAN]);
    // root, a, a1, c
    assert_eq!(stats.nodes_painted, 4);
    assert_eq!(stats.overlays_painted, 4);
}

#[test]
fn test_clip_children_pushes_and_pops() {
    let (mut ui, mut renderer) = setup();
    let root = ui.root();
    let panel = attach(
        &mut ui,
        root,
        Container::new("panel")
            .with_bounds(Rect::new(10, 10, 40, 40))
            .with_clip_children(true),
    );
    attach(&mut ui, panel, Swatch::new("big", Rect::new(0, 0, 100, 100), Color::RED));

    let stats = ui.render(&mut renderer).unwrap();
    assert_eq!(stats.clips_pushed, 1);
    assert_eq!(renderer.clip_depth(), 0);
    renderer.end_frame().unwrap();

    let commands = renderer.commands();
    assert!(matches!(
        commands.first(),
        Some(DrawCommand::PushClip { effective, .. }) if *effective == Rect::new(10, 10, 40, 40)
    ));
    assert!(matches!(commands.last(), Some(DrawCommand::PopClip)));
    assert_eq!(
        renderer.visible_fills(),
        vec![(Rect::new(10, 10, 40, 40), Color::RED)]
    );
}

#[test]
fn test_nested_clips_intersect_with_viewport() {
    let (mut ui, mut renderer) = setup();
    let root = ui.root();
    let outer = attach(
        &mut ui,
        root,
        Container::new("outer")
            .with_bounds(Rect::new(150, 150, 100, 100))
            .with_clip_children(true),
    );
    let inner = attach(
        &mut ui,
        outer,
        Container::new("inner")
            .with_bounds(Rect::new(170, 120, 20, 100))
            .with_clip_children(true),
    );
    attach(&mut ui, inner, Swatch::new("fill", Rect::new(0, 0, 300, 300), Color::GREEN));

    let stats = ui.render(&mut renderer).unwrap();
    assert_eq!(stats.clips_pushed, 2);
    assert_eq!(
        renderer.visible_fills(),
        vec![(Rect::new(170, 150, 20, 50), Color::GREEN)]
    );
}

#[test]
fn test_empty_clip_culls_children() {
    let (mut ui, mut renderer) = setup();
    let root = ui.root();
    let offscreen = attach(
        &mut ui,
        root,
        Container::new("offscreen")
            .with_bounds(Rect::new(500, 500, 40, 40))
            .with_clip_children(true),
    );
    attach(&mut ui, offscreen, Swatch::new("hidden", Rect::new(0, 0, 10, 10), Color::RED));

    let stats = ui.render(&mut renderer).unwrap();
    assert_eq!(stats.clips_culled, 1);
    assert!(fill_colors(&renderer).is_empty());
    assert_eq!(renderer.clip_depth(), 0);
}

#[test]
fn test_overlay_pass_draws_after_everything() {
    let (mut ui, mut renderer) = setup();
    let root = ui.root();
    let first = attach(
        &mut ui,
        root,
        Swatch::new("tooltip_owner", Rect::new(0, 0, 20, 20), Color::RED)
            .with_overlay(Color::MAGENTA),
    );
    attach(&mut ui, first, Swatch::new("child", Rect::new(0, 0, 5, 5), Color::GREEN));
    attach(&mut ui, root, Swatch::new("last", Rect::new(30, 0, 20, 20), Color::BLUE));

    ui.render(&mut renderer).unwrap();
    assert_eq!(
        fill_colors(&renderer),
        vec![Color::RED, Color::GREEN, Color::BLUE, Color::MAGENTA]
    );
}

#[test]
fn test_overlay_ignores_ancestor_clip() {
    let (mut ui, mut renderer) = setup();
    let root = ui.root();
    let panel = attach(
        &mut ui,
        root,
        Container::new("panel")
            .with_bounds(Rect::new(0, 0, 10, 10))
            .with_clip_children(true),
    );
    attach(
        &mut ui,
        panel,
        Swatch::new("popup", Rect::new(0, 0, 50, 50), Color::RED).with_overlay(Color::WHITE),
    );

    ui.render(&mut renderer).unwrap();
    let fills = renderer.visible_fills();
    assert_eq!(fills.last(), Some(&(Rect::new(0, 0, 50, 50), Color::WHITE)));
}

#[test]
fn test_focus_indicator_follows_focus() {
    let (mut ui, mut renderer) = setup();
    let root = ui.root();
    let field = attach(&mut ui, root, Swatch::new("field", Rect::new(0, 0, 30, 30), Color::GRAY));

    ui.render(&mut renderer).unwrap();
    let strokes = |renderer: &RecordingRenderer| {
        renderer
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::StrokeRect { .. }))
            .count()
    };
    assert_eq!(strokes(&renderer), 0);

    ui.update(&InputSnapshot::press(5, 5), 0.0);
    assert_eq!(ui.focused(), Some(field));

    renderer.begin_frame().unwrap();
    ui.render(&mut renderer).unwrap();
    assert_eq!(strokes(&renderer), 1);
}

/// A recording backend whose first `failing_pops` pops report an error.
struct FailingPops {
    inner: RecordingRenderer,
    failing_pops: u32,
}

impl Renderer for FailingPops {
    fn viewport(&self) -> Rect {
        self.inner.viewport()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.inner.fill_rect(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32) {
        self.inner.stroke_rect(rect, color, thickness);
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color, scale: u32) {
        self.inner.draw_text(text, position, color, scale);
    }

    fn measure_text(&self, text: &str, scale: u32) -> Size {
        self.inner.measure_text(text, scale)
    }

    fn push_clip(&mut self, rect: Rect) {
        self.inner.push_clip(rect);
    }

    fn pop_clip(&mut self) -> RenderResult<()> {
        self.inner.pop_clip()?;
        if self.failing_pops > 0 {
            self.failing_pops -= 1;
            return Err(RenderError::ClipStackUnderflow);
        }
        Ok(())
    }

    fn clip_bounds(&self) -> Rect {
        self.inner.clip_bounds()
    }
}

#[test]
fn test_failed_child_render_still_pops_parent_clip() {
    let (mut ui, inner) = setup();
    let root = ui.root();
    let outer = attach(
        &mut ui,
        root,
        Container::new("outer")
            .with_bounds(Rect::new(0, 0, 100, 100))
            .with_clip_children(true),
    );
    let nested = attach(
        &mut ui,
        outer,
        Container::new("nested")
            .with_bounds(Rect::new(10, 10, 50, 50))
            .with_clip_children(true),
    );
    attach(&mut ui, nested, Swatch::new("leaf", Rect::new(0, 0, 20, 20), Color::RED));

    let mut renderer = FailingPops {
        inner,
        failing_pops: 1,
    };
    assert_eq!(ui.render(&mut renderer), Err(RenderError::ClipStackUnderflow));
    assert_eq!(renderer.inner.clip_depth(), 0);
    renderer.inner.end_frame().unwrap();
}

// =============================================================================
// Hit Testing
// =============================================================================

#[test]
fn test_hit_test_prefers_topmost_sibling() {
    let (mut ui, _) = setup();
    let root = ui.root();
    attach(&mut ui, root, Swatch::new("below", Rect::new(0, 0, 50, 50), Color::RED));
    let above = attach(&mut ui, root, Swatch::new("above", Rect::new(25, 25, 50, 50), Color::BLUE));

    assert_eq!(ui.hit_test(Point::new(30, 30)), Some(above));
    assert_eq!(ui.hit_test(Point::new(150, 150)), Some(root));
    assert_eq!(ui.hit_test(Point::new(250, 250)), None);
}

#[test]
fn test_hit_test_returns_deepest_node() {
    let (mut ui, _) = setup();
    let root = ui.root();
    let panel = attach(&mut ui, root, Container::new("panel").with_bounds(Rect::new(0, 0, 100, 100)));
    let button = attach(&mut ui, panel, Swatch::new("button", Rect::new(10, 10, 20, 20), Color::RED));

    assert_eq!(ui.hit_test(Point::new(15, 15)), Some(button));
    assert_eq!(ui.hit_test(Point::new(50, 50)), Some(panel));
}

#[test]
fn test_hit_test_skips_hidden_and_decorative_nodes() {
    let (mut ui, _) = setup();
    let root = ui.root();
    let base = attach(&mut ui, root, Swatch::new("base", Rect::new(0, 0, 50, 50), Color::RED));
    let hidden = attach(&mut ui, root, Swatch::new("hidden", Rect::new(0, 0, 50, 50), Color::BLUE));
    attach(
        &mut ui,
        root,
        Swatch::new("shine", Rect::new(0, 0, 50, 50), Color::WHITE).decorative(),
    );
    ui.widget_mut(hidden).unwrap().set_visible(false);

    assert_eq!(ui.hit_test(Point::new(10, 10)), Some(base));
}

#[test]
fn test_hit_test_respects_clip() {
    let (mut ui, _) = setup();
    let root = ui.root();
    let viewport = attach(
        &mut ui,
        root,
        Container::new("viewport")
            .with_bounds(Rect::new(0, 0, 40, 40))
            .with_clip_children(true),
    );
    let content = attach(&mut ui, viewport, Swatch::new("content", Rect::new(0, 0, 100, 100), Color::RED));

    assert_eq!(ui.hit_test(Point::new(20, 20)), Some(content));
    // Outside the clip the scrolled-away content cannot be hit.
    assert_eq!(ui.hit_test(Point::new(80, 80)), Some(root));
}

#[test]
fn test_hit_test_limited_to_blocking_modal() {
    let (mut ui, _) = setup();
    let root = ui.root();
    attach(&mut ui, root, Swatch::new("background", Rect::new(0, 0, 200, 200), Color::GRAY));
    let dialog = attach(&mut ui, root, Container::new("dialog").with_bounds(Rect::new(50, 50, 100, 100)));
    let ok = attach(&mut ui, dialog, Swatch::new("ok", Rect::new(60, 60, 20, 20), Color::GREEN));

    ui.open_modal(dialog, true);
    assert_eq!(ui.hit_test(Point::new(65, 65)), Some(ok));
    assert_eq!(ui.hit_test(Point::new(100, 100)), Some(dialog));
    assert_eq!(ui.hit_test(Point::new(10, 10)), None);

    ui.close_modal(dialog);
    assert!(ui.hit_test(Point::new(10, 10)).is_some());
}

#[test]
fn test_pointer_focus_ignored_behind_modal() {
    let (mut ui, _) = setup();
    let root = ui.root();
    attach(&mut ui, root, Swatch::new("background", Rect::new(0, 0, 40, 40), Color::GRAY));
    let dialog = attach(&mut ui, root, Container::new("dialog").with_bounds(Rect::new(50, 50, 100, 100)));
    let ok = attach(&mut ui, dialog, Swatch::new("ok", Rect::new(60, 60, 20, 20), Color::GREEN));

    ui.open_modal(dialog, true);
    ui.update(&InputSnapshot::press(10, 10), 0.0);
    assert_eq!(ui.focused(), None);
    ui.update(&InputSnapshot::press(65, 65), 0.0);
    assert_eq!(ui.focused(), Some(ok));
}
