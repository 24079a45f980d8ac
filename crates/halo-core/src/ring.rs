//! Layout of the flat 2D marker ring.

use crate::angle::{angular_proximity, highlight_multiplier};
use crate::camera::Viewport;
use crate::constants::{
    RING_BASE_RADIUS_FRACTION, RING_DOT_RADIUS_FRACTION, RING_FEATURE_COUNT, RING_SPREAD,
};
use glam::Vec2;
use std::f32::consts::TAU;

/// A marker circle ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingCircle {
    pub center: Vec2,
    /// Direction of the marker from the ring center.
    pub angle: f32,
    pub radius: f32,
}

/// Ring geometry derived from the canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingLayout {
    pub center: Vec2,
    pub base_radius: f32,
    pub dot_radius: f32,
}

impl RingLayout {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let h = viewport.height as f32;
        Self {
            center: viewport.center(),
            base_radius: RING_BASE_RADIUS_FRACTION * h,
            dot_radius: RING_DOT_RADIUS_FRACTION * h,
        }
    }

    pub fn ring_radius(&self) -> f32 {
        RING_SPREAD * self.base_radius
    }

    /// Direction of marker `i`, evenly spaced starting on the +x axis.
    #[inline]
    pub fn feature_angle(i: usize) -> f32 {
        i as f32 * (TAU / RING_FEATURE_COUNT as f32)
    }

    /// All markers sized for a cursor at `cursor_angle`.
    pub fn circles(&self, cursor_angle: f32) -> [RingCircle; RING_FEATURE_COUNT] {
        let ring = self.ring_radius();
        std::array::from_fn(|i| {
            let angle = Self::feature_angle(i);
            RingCircle {
                center: self.center + ring * Vec2::new(angle.cos(), angle.sin()),
                angle,
                radius: self.dot_radius
                    * highlight_multiplier(angular_proximity(angle, cursor_angle)),
            }
        })
    }
}
