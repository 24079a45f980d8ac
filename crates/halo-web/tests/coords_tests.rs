// Host-side tests for the pure coordinate helpers.
// The web crate is wasm-only, so the module is included directly.

#![allow(dead_code)]
mod coords {
    include!("../src/coords.rs");
}

use coords::*;
use glam::Vec2;

#[test]
fn client_point_maps_into_backing_pixels() {
    // 400x300 CSS box at (10, 20) backed by an 800x600 store (DPR 2)
    let p = client_to_canvas_px(
        Vec2::new(210.0, 170.0),
        Vec2::new(10.0, 20.0),
        Vec2::new(400.0, 300.0),
        Vec2::new(800.0, 600.0),
    );
    assert_eq!(p, Some(Vec2::new(400.0, 300.0)));
}

#[test]
fn points_outside_the_canvas_still_map() {
    let p = client_to_canvas_px(
        Vec2::new(0.0, 0.0),
        Vec2::new(100.0, 100.0),
        Vec2::new(200.0, 200.0),
        Vec2::new(200.0, 200.0),
    );
    assert_eq!(p, Some(Vec2::new(-100.0, -100.0)));
}

#[test]
fn hidden_canvas_has_no_mapping() {
    let p = client_to_canvas_px(Vec2::ONE, Vec2::ZERO, Vec2::new(0.0, 300.0), Vec2::new(800.0, 600.0));
    assert_eq!(p, None);
}

#[test]
fn backing_size_applies_device_pixel_ratio() {
    assert_eq!(backing_size(Vec2::new(400.0, 300.0), 2.0), (800, 600));
    assert_eq!(backing_size(Vec2::new(333.0, 100.0), 1.5), (499, 150));
    assert_eq!(backing_size(Vec2::new(0.0, 0.0), 1.0), (1, 1));
}
