//! Integration tests for the composite fills on the recording backend.

use std::collections::HashMap;

use horizon_trellis_render::{
    Color, DrawCommand, GradientCorners, RecordingRenderer, Rect, Renderer, Size, shapes,
};

fn recorder() -> RecordingRenderer {
    RecordingRenderer::new(Size::new(128, 128)).expect("valid viewport")
}

/// Rasterize the visible fills into a pixel -> color map (last write wins).
fn rasterize(renderer: &RecordingRenderer) -> HashMap<(i32, i32), Color> {
    let mut pixels = HashMap::new();
    for (rect, color) in renderer.visible_fills() {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                pixels.insert((x, y), color);
            }
        }
    }
    pixels
}

#[test]
fn test_radius_zero_rounded_fill_equals_plain_fill() {
    let rect = Rect::new(5, 7, 31, 13);

    let mut rounded = recorder();
    rounded.fill_rounded_rect(rect, 0, Color::GREEN);

    let mut plain = recorder();
    plain.fill_rect(rect, Color::GREEN);

    assert_eq!(rasterize(&rounded), rasterize(&plain));
}

#[test]
fn test_uniform_gradient_rows_are_single_fills() {
    let mut renderer = recorder();
    let rect = Rect::new(0, 0, 40, 6);
    renderer.fill_gradient(rect, &GradientCorners::vertical(Color::BLACK, Color::WHITE));

    // One fill per row: the left and right edge colors always match.
    assert_eq!(renderer.commands().len(), 6);
    let pixels = rasterize(&renderer);
    assert_eq!(pixels[&(0, 0)], Color::BLACK);
    assert_eq!(pixels[&(39, 5)], Color::WHITE);
    assert_eq!(pixels[&(17, 3)], Color::BLACK.lerp(Color::WHITE, 0.6));
}

#[test]
fn test_bilinear_gradient_matches_per_pixel_colors() {
    let mut renderer = recorder();
    let rect = Rect::new(10, 20, 9, 5);
    let corners = GradientCorners::new(Color::RED, Color::BLUE, Color::GREEN, Color::WHITE);
    renderer.fill_gradient(rect, &corners);

    let pixels = rasterize(&renderer);
    assert_eq!(pixels.len(), 45);
    for y in 0..5 {
        for x in 0..9 {
            assert_eq!(
                pixels[&(10 + x, 20 + y)],
                corners.color_at(9, 5, x, y),
                "pixel ({x}, {y})"
            );
        }
    }
}

#[test]
fn test_checkerboard_covers_area_exactly() {
    let mut renderer = recorder();
    let rect = Rect::new(3, 3, 13, 9);
    renderer.fill_checkerboard(rect, 4, Color::LIGHT_GRAY, Color::DARK_GRAY);

    let pixels = rasterize(&renderer);
    assert_eq!(pixels.len(), 13 * 9);
    assert_eq!(pixels[&(3, 3)], Color::LIGHT_GRAY);
    assert_eq!(pixels[&(7, 3)], Color::DARK_GRAY);
    assert_eq!(pixels[&(7, 7)], Color::LIGHT_GRAY);
    assert_eq!(pixels[&(15, 11)], Color::DARK_GRAY);
}

#[test]
fn test_thick_rounded_stroke_leaves_interior_empty() {
    let mut renderer = recorder();
    let rect = Rect::new(0, 0, 30, 20);
    renderer.stroke_rounded_rect(rect, 6, Color::WHITE, 3);

    let pixels = rasterize(&renderer);
    let fill: std::collections::HashSet<(i32, i32)> = shapes::rounded_rect_spans(rect, 6)
        .iter()
        .flat_map(|r| (r.top()..r.bottom()).flat_map(move |y| (r.left()..r.right()).map(move |x| (x, y))))
        .collect();

    assert!(pixels.keys().all(|p| fill.contains(p)));
    // Three rings deep on the straight edges, nothing further in.
    assert!(pixels.contains_key(&(0, 10)));
    assert!(pixels.contains_key(&(2, 10)));
    assert!(!pixels.contains_key(&(3, 10)));
    assert!(!pixels.contains_key(&(15, 10)));
    assert!(pixels.contains_key(&(29, 10)));
    assert!(pixels.contains_key(&(27, 10)));
    assert!(!pixels.contains_key(&(26, 10)));
}

#[test]
fn test_composite_fills_respect_clip() {
    let mut renderer = recorder();
    renderer.push_clip(Rect::new(0, 0, 8, 8));
    renderer.fill_checkerboard(Rect::new(0, 0, 16, 16), 4, Color::WHITE, Color::BLACK);
    renderer.pop_clip().expect("balanced");

    let pixels = rasterize(&renderer);
    assert_eq!(pixels.len(), 64);
    assert!(pixels.keys().all(|&(x, y)| x < 8 && y < 8));
    assert!(matches!(renderer.commands().first(), Some(DrawCommand::PushClip { .. })));
    assert!(matches!(renderer.commands().last(), Some(DrawCommand::PopClip)));
    assert!(renderer.end_frame().is_ok());
}
