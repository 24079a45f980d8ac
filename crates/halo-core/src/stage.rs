//! All mutable state of the 3D view in one place.
//!
//! The web frontend wraps a [`Stage`] in `Rc<RefCell<_>>` and hands clones
//! to its cursor, resize, slider and animation callbacks once at startup.

use crate::camera::{Camera, Viewport};
use crate::config::{AppConfig, MeshSource};
use crate::constants::SPIN_RATE;
use crate::error::Result;
use crate::geometry::MeshVertex;
use crate::highlight::{HighlightController, HighlightOutcome, RgbShiftParams};
use crate::pipeline::{frame_plan, FramePlan};
use crate::scene::{Scene, SceneNode};
use crate::subdivision::{Rebuild, SubdivisionController};
use glam::{Mat4, Vec2, Vec3};
use std::ops::Range;

// Longest frame step fed to the auto-rotation, so a backgrounded tab does not jump.
const MAX_SPIN_STEP_SEC: f32 = 0.1;

/// Per-instance data of a vertex ball.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BallInstance {
    pub position: [f32; 3],
    pub scale: f32,
}

/// Per-instance model matrix of a mesh leaf.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LeafInstance {
    pub model: [[f32; 4]; 4],
}

/// Every leaf's vertices concatenated, with each leaf's slice of the buffer.
#[derive(Clone, Debug, Default)]
pub struct MeshBatch {
    pub vertices: Vec<MeshVertex>,
    pub ranges: Vec<Range<u32>>,
}

pub struct Stage {
    pub config: AppConfig,
    pub camera: Camera,
    viewport: Viewport,
    pub scene: Scene,
    pub highlight: HighlightController,
    pub subdivision: SubdivisionController,
    pub post: RgbShiftParams,
}

impl Stage {
    /// With an icosahedron source the model is built immediately; external
    /// files are attached later through [`Stage::attach_loaded`].
    pub fn new(config: AppConfig) -> Self {
        let owns_model = config.mesh_source == MeshSource::Icosahedron;
        let subdivision = SubdivisionController::new(config.subdivision_level, owns_model);
        let mut scene = Scene::default();
        if owns_model {
            scene.attach(subdivision.build());
        }
        let post = RgbShiftParams {
            amount: config.rgb_shift_amount,
            ..Default::default()
        };
        Self {
            highlight: HighlightController::new(config.post_process_enabled),
            camera: Camera::default(),
            viewport: Viewport::default(),
            scene,
            subdivision,
            post,
            config,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Track the canvas size. Zero sizes are stored so that projections
    /// no-op while hidden, but never reach the camera.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.camera.fit_viewport(viewport);
        true
    }

    pub fn cursor_moved(&mut self, cursor: Vec2) -> HighlightOutcome {
        self.highlight.on_cursor_move(
            cursor,
            self.viewport,
            &self.camera,
            self.scene.model_mut(),
            &mut self.post,
        )
    }

    /// Pointer drag of `delta` CSS pixels on an element `element_height` CSS pixels tall.
    pub fn orbit(&mut self, delta: Vec2, element_height: f32) {
        if self.viewport.is_empty() || delta == Vec2::ZERO {
            return;
        }
        self.camera.update_orbit(|o| o.rotate(delta, element_height));
    }

    pub fn zoom(&mut self, wheel_delta: f32) {
        if self.viewport.is_empty() {
            return;
        }
        self.camera.update_orbit(|o| o.zoom(wheel_delta));
    }

    pub fn set_subdivision_level(&mut self, raw: i64) -> Result<Rebuild> {
        let outcome = self.subdivision.request(raw, &mut self.scene);
        if let Err(e) = &outcome {
            log::warn!("[subdiv] {e}");
        }
        outcome
    }

    /// Show an externally loaded model in place of whatever is displayed.
    pub fn attach_loaded(&mut self, node: SceneNode) {
        self.scene.detach();
        self.scene.attach(node);
    }

    /// Placeholder after a failed load: the icosahedron at the current level,
    /// which the slider then controls.
    pub fn fallback_to_icosahedron(&mut self) {
        self.subdivision = SubdivisionController::new(self.subdivision.level(), true);
        self.scene.detach();
        self.scene.attach(self.subdivision.build());
    }

    /// Advance auto-rotation by one animation tick.
    pub fn advance(&mut self, dt_sec: f32) {
        if !self.config.auto_rotate {
            return;
        }
        let step = SPIN_RATE * dt_sec.clamp(0.0, MAX_SPIN_STEP_SEC);
        if let Some(model) = self.scene.model_mut() {
            model.spin(Vec3::new(step, step, 0.0));
        }
    }

    pub fn frame_plan(&self) -> FramePlan {
        frame_plan(self.config.post_process_enabled)
    }

    /// World-space ball instances of every feature, in traversal order.
    pub fn ball_instances(&self, out: &mut Vec<BallInstance>) {
        out.clear();
        if let Some(model) = self.scene.model() {
            model.visit_meshes(Mat4::IDENTITY, &mut |mesh, world| {
                out.extend(mesh.features.iter().map(|f| BallInstance {
                    position: world.transform_point3(f.anchor).to_array(),
                    scale: f.scale,
                }));
            });
        }
    }

    /// Model matrices of every leaf, matching the order of [`Stage::mesh_batch`].
    pub fn leaf_instances(&self, out: &mut Vec<LeafInstance>) {
        out.clear();
        if let Some(model) = self.scene.model() {
            model.visit_meshes(Mat4::IDENTITY, &mut |_, world| {
                out.push(LeafInstance {
                    model: world.to_cols_array_2d(),
                })
            });
        }
    }

    /// Geometry to upload; only changes when [`Scene::generation`] does.
    pub fn mesh_batch(&self) -> MeshBatch {
        let mut batch = MeshBatch::default();
        if let Some(model) = self.scene.model() {
            model.visit_meshes(Mat4::IDENTITY, &mut |mesh, _| {
                let start = batch.vertices.len() as u32;
                batch.vertices.extend(mesh.vertices());
                batch.ranges.push(start..batch.vertices.len() as u32);
            });
        }
        batch
    }
}
