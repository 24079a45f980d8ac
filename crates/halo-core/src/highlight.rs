//! Cursor-driven highlight of 3D vertex features.

use crate::angle::{angular_proximity, project_world_to_screen, screen_angle_from_cursor};
use crate::camera::{Camera, Viewport};
use crate::constants::RGB_SHIFT_AMOUNT;
use crate::scene::SceneNode;
use glam::{Mat4, Vec2, Vec3};

/// Uniform values of the colour-fringe post-process pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbShiftParams {
    /// Fringe direction in screen space, radians.
    pub angle: f32,
    /// Sampling offset in UV units.
    pub amount: f32,
}

impl Default for RgbShiftParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            amount: RGB_SHIFT_AMOUNT,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightPhase {
    #[default]
    Idle,
    Updating,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HighlightOutcome {
    /// Nothing to project onto; all state kept as it was.
    Skipped,
    Updated { angle: f32, features: usize },
}

#[derive(Clone, Debug, Default)]
pub struct HighlightController {
    phase: HighlightPhase,
    post_enabled: bool,
    last_angle: Option<f32>,
}

impl HighlightController {
    pub fn new(post_enabled: bool) -> Self {
        Self {
            post_enabled,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> HighlightPhase {
        self.phase
    }

    /// Cursor angle of the most recent applied update.
    pub fn last_angle(&self) -> Option<f32> {
        self.last_angle
    }

    /// Recompute every feature's intensity for a cursor at `cursor` (canvas pixels).
    ///
    /// Feature directions and the cursor direction are both measured around
    /// the screen projection of the model's origin.
    pub fn on_cursor_move(
        &mut self,
        cursor: Vec2,
        viewport: Viewport,
        camera: &Camera,
        model: Option<&mut SceneNode>,
        post: &mut RgbShiftParams,
    ) -> HighlightOutcome {
        if viewport.is_empty() {
            log::trace!("[highlight] skipped: empty viewport");
            return HighlightOutcome::Skipped;
        }
        self.phase = HighlightPhase::Updating;

        let view_proj = camera.view_projection();
        let size = viewport.size();
        let project = |world: Vec3| project_world_to_screen(world, view_proj, size.x, size.y);

        let mut features = 0;
        let anchor;
        let cursor_angle;
        match model {
            Some(node) => {
                let root = node.transform.matrix();
                anchor = project(root.transform_point3(Vec3::ZERO));
                cursor_angle = screen_angle_from_cursor(cursor, anchor);
                node.visit_meshes_mut(Mat4::IDENTITY, &mut |mesh, world| {
                    for feature in &mut mesh.features {
                        let screen = project(world.transform_point3(feature.anchor));
                        let feature_angle = screen_angle_from_cursor(screen, anchor);
                        feature.apply_intensity(angular_proximity(feature_angle, cursor_angle));
                    }
                    features += mesh.features.len();
                });
            }
            None => {
                anchor = viewport.center();
                cursor_angle = screen_angle_from_cursor(cursor, anchor);
            }
        }

        if self.post_enabled {
            post.angle = cursor_angle;
        }
        self.last_angle = Some(cursor_angle);
        self.phase = HighlightPhase::Idle;
        log::trace!(
            "[highlight] angle={:.3} anchor=({:.1},{:.1}) features={}",
            cursor_angle,
            anchor.x,
            anchor.y,
            features
        );
        HighlightOutcome::Updated {
            angle: cursor_angle,
            features,
        }
    }
}
