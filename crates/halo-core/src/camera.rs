//! Camera and viewport types.
//!
//! These types avoid referencing platform-specific APIs and are suitable for
//! both host tests and the web frontend, which consumes them to build the
//! scene uniforms and to project features into canvas pixels.

use crate::constants::{
    CAMERA_FOVY_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
    ORBIT_PITCH_LIMIT, ORBIT_ZOOM_STEP,
};
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::TAU;

/// Spherical position of the eye around the camera target.
///
/// `yaw` 0 and `pitch` 0 put the eye on +z; dragging follows the usual
/// orbit-controls feel where a full element height is one turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_Z,
        }
    }
}

impl Orbit {
    /// Offset of the eye from the target.
    pub fn offset(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    /// Rotate by a pointer drag of `delta` pixels over an element `height` pixels tall.
    pub fn rotate(&mut self, delta: Vec2, height: f32) {
        if height <= 0.0 {
            return;
        }
        let per_px = TAU / height;
        self.yaw -= delta.x * per_px;
        self.pitch = (self.pitch + delta.y * per_px).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Wheel zoom; positive `wheel_delta` (scrolling down) moves away.
    pub fn zoom(&mut self, wheel_delta: f32) {
        if wheel_delta == 0.0 || !wheel_delta.is_finite() {
            return;
        }
        let factor = if wheel_delta > 0.0 {
            1.0 / ORBIT_ZOOM_STEP
        } else {
            ORBIT_ZOOM_STEP
        };
        self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub orbit: Orbit,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            orbit: Orbit::default(),
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Apply `change` to the orbit and move the eye accordingly.
    pub fn update_orbit(&mut self, change: impl FnOnce(&mut Orbit)) {
        change(&mut self.orbit);
        self.eye = self.target + self.orbit.offset();
    }

    /// Match the aspect ratio to a viewport. Empty viewports are ignored so the
    /// projection never degenerates.
    pub fn fit_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_empty() {
            self.aspect = viewport.aspect();
        }
    }
}

/// Canvas backing-store size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Hidden or detached canvases report a zero dimension.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}
