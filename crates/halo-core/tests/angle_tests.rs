use glam::{Mat4, Vec2, Vec3};
use halo_core::{
    angular_distance, angular_proximity, highlight_multiplier, project_world_to_screen,
    screen_angle_from_cursor, Camera, Viewport,
};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

const EPS: f32 = 1e-5;

#[test]
fn proximity_is_one_for_same_direction() {
    for a in [-3.0, -1.0, 0.0, 0.5, 2.5, 3.1] {
        assert!((angular_proximity(a, a) - 1.0).abs() < EPS, "a={a}");
    }
}

#[test]
fn proximity_is_minus_one_for_opposite_direction() {
    for a in [-2.0, 0.0, 1.0, 3.0] {
        assert!((angular_proximity(a, a + PI) + 1.0).abs() < 1e-4, "a={a}");
    }
}

#[test]
fn proximity_is_symmetric_and_periodic() {
    let pairs = [(0.3, 2.9), (-1.2, 0.4), (3.0, -3.0)];
    for (a, b) in pairs {
        let p = angular_proximity(a, b);
        assert!((p - angular_proximity(b, a)).abs() < EPS);
        assert!((p - angular_proximity(a + TAU, b)).abs() < 1e-4);
        assert!((p - angular_proximity(a, b - TAU)).abs() < 1e-4);
        assert!((-1.0..=1.0).contains(&p));
    }
}

#[test]
fn distance_takes_the_short_way_round() {
    // 179° and -179° are 2° apart, not 358°
    let a = 179f32.to_radians();
    let b = (-179f32).to_radians();
    assert!((angular_distance(a, b) - 2f32.to_radians()).abs() < 1e-4);
    assert!(angular_distance(0.0, PI) <= PI);
}

#[test]
fn cursor_angle_is_measured_in_y_down_pixels() {
    let anchor = Vec2::new(400.0, 300.0);
    assert!(screen_angle_from_cursor(Vec2::new(500.0, 300.0), anchor).abs() < EPS);
    // below the anchor on screen
    let down = screen_angle_from_cursor(Vec2::new(400.0, 400.0), anchor);
    assert!((down - FRAC_PI_2).abs() < EPS);
    let left = screen_angle_from_cursor(Vec2::new(300.0, 300.0), anchor);
    assert!((left.abs() - PI).abs() < EPS);
}

#[test]
fn multiplier_spans_zero_to_two() {
    assert_eq!(highlight_multiplier(-1.0), 0.0);
    assert_eq!(highlight_multiplier(0.0), 1.0);
    assert_eq!(highlight_multiplier(1.0), 2.0);
}

#[test]
fn world_origin_projects_to_viewport_center() {
    let mut camera = Camera::default();
    let viewport = Viewport::new(800, 600);
    camera.fit_viewport(viewport);
    let p = project_world_to_screen(Vec3::ZERO, camera.view_projection(), 800.0, 600.0);
    assert!((p - viewport.center()).length() < 1e-3);
}

#[test]
fn world_up_projects_above_center() {
    let mut camera = Camera::default();
    camera.fit_viewport(Viewport::new(800, 600));
    let vp: Mat4 = camera.view_projection();
    let up = project_world_to_screen(Vec3::Y, vp, 800.0, 600.0);
    let right = project_world_to_screen(Vec3::X, vp, 800.0, 600.0);
    assert!(up.y < 300.0);
    assert!((up.x - 400.0).abs() < 1e-3);
    assert!(right.x > 400.0);
}
