use glam::{Vec2, Vec3};
use halo_core::{
    AppConfig, HaloError, Mesh, MeshFormat, MeshSource, PassContent, PassTarget, Rebuild,
    SceneNode, Stage, SubdivisionLevel, SubdivisionPhase, Viewport, SPIN_RATE,
};

fn stage_at(level: i64) -> Stage {
    Stage::new(AppConfig {
        subdivision_level: SubdivisionLevel::new(level).unwrap(),
        ..Default::default()
    })
}

#[test]
fn icosahedron_is_built_at_startup() {
    let stage = stage_at(0);
    assert_eq!(stage.scene.generation(), 1);
    assert_eq!(stage.scene.feature_count(), 60);
}

#[test]
fn level_change_replaces_the_model() {
    let mut stage = stage_at(2);
    let before = stage.scene.generation();

    let rebuild = stage.set_subdivision_level(3).unwrap();
    assert_eq!(
        rebuild,
        Rebuild::Replaced {
            detached_features: 3 * 20 * 16,
            attached_features: 3 * 20 * 64,
        }
    );
    // detached, then attached
    assert_eq!(stage.scene.generation(), before + 2);
    assert_eq!(stage.scene.feature_count(), 3 * 20 * 64);
    assert_eq!(
        stage.subdivision.phase(),
        SubdivisionPhase::Stable(SubdivisionLevel::new(3).unwrap())
    );
}

#[test]
fn same_level_is_a_no_op() {
    let mut stage = stage_at(1);
    let before = stage.scene.generation();
    assert_eq!(stage.set_subdivision_level(1), Ok(Rebuild::Unchanged));
    assert_eq!(stage.scene.generation(), before);
}

#[test]
fn out_of_range_level_leaves_state_untouched() {
    let mut stage = stage_at(1);
    let before = stage.scene.generation();
    for raw in [-1, 6, 100] {
        let err = stage.set_subdivision_level(raw).unwrap_err();
        assert_eq!(err, HaloError::SubdivisionOutOfRange(raw));
        assert!(err.is_configuration());
    }
    assert_eq!(stage.scene.generation(), before);
    assert_eq!(stage.subdivision.level().get(), 1);
}

#[test]
fn rotation_survives_a_rebuild() {
    let mut stage = stage_at(0);
    stage.advance(0.05);
    let spun = stage.scene.model().and_then(SceneNode::leading_rotation).unwrap();
    assert!((spun.x - SPIN_RATE * 0.05).abs() < 1e-6);

    stage.set_subdivision_level(2).unwrap();
    let carried = stage.scene.model().and_then(SceneNode::leading_rotation);
    assert_eq!(carried, Some(spun));
}

#[test]
fn long_frames_are_clamped() {
    let mut stage = stage_at(0);
    stage.advance(5.0);
    let r = stage.scene.model().and_then(SceneNode::leading_rotation).unwrap();
    assert!((r.y - SPIN_RATE * 0.1).abs() < 1e-6);
}

#[test]
fn auto_rotate_can_be_disabled() {
    let mut stage = Stage::new(AppConfig {
        auto_rotate: false,
        ..Default::default()
    });
    stage.advance(0.5);
    let r = stage.scene.model().and_then(SceneNode::leading_rotation);
    assert_eq!(r, Some(Vec3::ZERO));
}

#[test]
fn external_source_defers_level_changes() {
    let mut stage = Stage::new(AppConfig {
        mesh_source: MeshSource::ExternalFile {
            path: "bunny.obj".into(),
            format: MeshFormat::Obj,
        },
        ..Default::default()
    });
    assert!(stage.scene.model().is_none());

    let tri = Mesh::from_triangles(vec![Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
    stage.attach_loaded(SceneNode::leaf(tri));
    assert_eq!(stage.scene.feature_count(), 3);

    assert_eq!(stage.set_subdivision_level(4), Ok(Rebuild::Deferred));
    assert_eq!(stage.scene.feature_count(), 3);
    assert_eq!(stage.subdivision.level().get(), 4);
}

#[test]
fn failed_load_falls_back_to_icosahedron() {
    let mut stage = Stage::new(AppConfig {
        mesh_source: MeshSource::ExternalFile {
            path: "missing.stl".into(),
            format: MeshFormat::Stl,
        },
        subdivision_level: SubdivisionLevel::new(1).unwrap(),
        ..Default::default()
    });
    stage.fallback_to_icosahedron();
    assert_eq!(stage.scene.feature_count(), 3 * 80);
    // the slider now drives the placeholder
    assert!(matches!(
        stage.set_subdivision_level(0),
        Ok(Rebuild::Replaced { .. })
    ));
}

#[test]
fn hidden_canvas_skips_highlight_updates() {
    let mut stage = stage_at(0);
    stage.resize(Viewport::new(0, 0));
    let outcome = stage.cursor_moved(Vec2::new(5.0, 5.0));
    assert_eq!(outcome, halo_core::HighlightOutcome::Skipped);
    assert_eq!(stage.camera.aspect, 1.0);
}

#[test]
fn hiding_after_an_update_keeps_the_last_highlight() {
    let mut stage = stage_at(0);
    stage.resize(Viewport::new(800, 600));
    assert!(matches!(
        stage.cursor_moved(Vec2::new(500.0, 300.0)),
        halo_core::HighlightOutcome::Updated { .. }
    ));
    let features = stage.scene.model().unwrap().features();
    let angle = stage.post.angle;

    stage.resize(Viewport::new(0, 0));
    let outcome = stage.cursor_moved(Vec2::new(100.0, 20.0));
    assert_eq!(outcome, halo_core::HighlightOutcome::Skipped);
    assert_eq!(stage.scene.model().unwrap().features(), features);
    assert_eq!(stage.post.angle, angle);
    assert!((stage.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn resize_updates_camera_aspect() {
    let mut stage = stage_at(0);
    assert!(stage.resize(Viewport::new(1600, 800)));
    assert!(!stage.resize(Viewport::new(1600, 800)));
    assert!((stage.camera.aspect - 2.0).abs() < 1e-6);
    assert_eq!(stage.viewport(), Viewport::new(1600, 800));
}

#[test]
fn instances_follow_the_model() {
    let mut stage = stage_at(1);
    let mut balls = Vec::new();
    let mut leaves = Vec::new();
    stage.ball_instances(&mut balls);
    stage.leaf_instances(&mut leaves);
    assert_eq!(balls.len(), 240);
    assert_eq!(leaves.len(), 1);

    let batch = stage.mesh_batch();
    assert_eq!(batch.vertices.len(), 240);
    assert_eq!(batch.ranges, vec![0..240]);

    stage.set_subdivision_level(0).unwrap();
    stage.ball_instances(&mut balls);
    assert_eq!(balls.len(), 60);
}

#[test]
fn frame_plan_follows_post_process_flag() {
    let stage = Stage::new(AppConfig::default());
    let plan = stage.frame_plan();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].target, PassTarget::Offscreen);
    assert_eq!(plan[1].content, PassContent::RgbShift);

    let stage = Stage::new(AppConfig {
        post_process_enabled: false,
        ..Default::default()
    });
    let plan = stage.frame_plan();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].target, PassTarget::Surface);
    assert!(!plan[0].uses_offscreen());
}
