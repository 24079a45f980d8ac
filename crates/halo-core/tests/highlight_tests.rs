use glam::{Vec2, Vec3};
use halo_core::{
    Camera, HighlightController, HighlightOutcome, HighlightPhase, Mesh, RgbShiftParams,
    SceneNode, Viewport, BALL_BASE_SCALE, BALL_REST_SCALE,
};
use std::f32::consts::FRAC_PI_2;

const EPS: f32 = 1e-3;

// Features to the right of, above, and left of the origin.
fn cross_model() -> SceneNode {
    SceneNode::leaf(Mesh::from_triangles(vec![Vec3::X, Vec3::Y, -Vec3::X]).unwrap())
}

fn camera_for(viewport: Viewport) -> Camera {
    let mut camera = Camera::default();
    camera.fit_viewport(viewport);
    camera
}

#[test]
fn features_facing_the_cursor_grow() {
    let viewport = Viewport::new(800, 600);
    let camera = camera_for(viewport);
    let mut model = cross_model();
    let mut post = RgbShiftParams::default();
    let mut hl = HighlightController::new(true);

    // cursor straight to the right of center
    let outcome = hl.on_cursor_move(
        Vec2::new(500.0, 300.0),
        viewport,
        &camera,
        Some(&mut model),
        &mut post,
    );
    assert!(matches!(outcome, HighlightOutcome::Updated { features: 3, .. }));
    assert_eq!(hl.phase(), HighlightPhase::Idle);

    let f = model.features();
    assert!((f[0].intensity - 1.0).abs() < EPS);
    assert!(f[1].intensity.abs() < EPS);
    assert!((f[2].intensity + 1.0).abs() < EPS);
    assert!((f[0].scale - 2.0 * BALL_BASE_SCALE).abs() < EPS);
    assert!((f[1].scale - BALL_BASE_SCALE).abs() < EPS);
    assert!(f[2].scale.abs() < EPS);
    assert!(post.angle.abs() < EPS);
}

#[test]
fn empty_viewport_changes_nothing() {
    let camera = Camera::default();
    let mut model = cross_model();
    let mut post = RgbShiftParams {
        angle: 1.0,
        amount: 0.05,
    };
    let mut hl = HighlightController::new(true);

    let outcome = hl.on_cursor_move(
        Vec2::new(10.0, 10.0),
        Viewport::new(0, 600),
        &camera,
        Some(&mut model),
        &mut post,
    );
    assert_eq!(outcome, HighlightOutcome::Skipped);
    assert_eq!(hl.last_angle(), None);
    assert_eq!(post.angle, 1.0);
    for f in model.features() {
        assert_eq!(f.intensity, 0.0);
        assert_eq!(f.scale, BALL_REST_SCALE);
    }
}

#[test]
fn disabled_post_process_keeps_its_angle() {
    let viewport = Viewport::new(800, 600);
    let camera = camera_for(viewport);
    let mut model = cross_model();
    let mut post = RgbShiftParams::default();
    let mut hl = HighlightController::new(false);

    // cursor below center
    hl.on_cursor_move(
        Vec2::new(400.0, 450.0),
        viewport,
        &camera,
        Some(&mut model),
        &mut post,
    );
    assert_eq!(post.angle, 0.0);
    let angle = hl.last_angle().unwrap();
    assert!((angle - FRAC_PI_2).abs() < EPS);
}

#[test]
fn enabled_post_process_follows_the_cursor() {
    let viewport = Viewport::new(800, 600);
    let camera = camera_for(viewport);
    let mut post = RgbShiftParams::default();
    let mut hl = HighlightController::new(true);

    // no model yet: the angle is still tracked around the canvas center
    let outcome = hl.on_cursor_move(Vec2::new(400.0, 450.0), viewport, &camera, None, &mut post);
    assert!(matches!(outcome, HighlightOutcome::Updated { features: 0, .. }));
    assert!((post.angle - FRAC_PI_2).abs() < EPS);
}

#[test]
fn repeated_moves_overwrite_previous_intensity() {
    let viewport = Viewport::new(800, 600);
    let camera = camera_for(viewport);
    let mut model = cross_model();
    let mut post = RgbShiftParams::default();
    let mut hl = HighlightController::new(true);

    hl.on_cursor_move(Vec2::new(500.0, 300.0), viewport, &camera, Some(&mut model), &mut post);
    hl.on_cursor_move(Vec2::new(300.0, 300.0), viewport, &camera, Some(&mut model), &mut post);
    let f = model.features();
    assert!((f[0].intensity + 1.0).abs() < EPS);
    assert!((f[2].intensity - 1.0).abs() < EPS);
}
