//! Per-tick pass plan and offscreen target bookkeeping.
//!
//! The GPU side executes whatever [`frame_plan`] returns, in order. Keeping
//! the plan here lets the pass structure be checked without a device.

use crate::camera::Viewport;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassTarget {
    /// Intermediate colour buffer sized to the viewport.
    Offscreen,
    /// The canvas surface.
    Surface,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassContent {
    /// Vertex balls and the edge-marker wireframe through the scene camera.
    Scene,
    /// Full-screen colour fringe sampling the offscreen target.
    RgbShift,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassDesc {
    pub label: &'static str,
    pub target: PassTarget,
    pub content: PassContent,
}

impl PassDesc {
    /// Whether the pass reads or writes the offscreen target.
    pub fn uses_offscreen(&self) -> bool {
        self.target == PassTarget::Offscreen || self.content == PassContent::RgbShift
    }
}

pub type FramePlan = SmallVec<[PassDesc; 2]>;

pub fn frame_plan(post_enabled: bool) -> FramePlan {
    if post_enabled {
        smallvec![
            PassDesc {
                label: "scene_pass",
                target: PassTarget::Offscreen,
                content: PassContent::Scene,
            },
            PassDesc {
                label: "rgb_shift_pass",
                target: PassTarget::Surface,
                content: PassContent::RgbShift,
            },
        ]
    } else {
        smallvec![PassDesc {
            label: "scene_pass",
            target: PassTarget::Surface,
            content: PassContent::Scene,
        }]
    }
}

/// Tracks the pixel size the offscreen targets were created with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OffscreenSize {
    current: Viewport,
}

impl OffscreenSize {
    pub fn new(viewport: Viewport) -> Self {
        Self { current: viewport }
    }

    pub fn current(&self) -> Viewport {
        self.current
    }

    /// Record `viewport` and report whether targets must be recreated.
    /// Empty viewports never trigger a resize.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() || viewport == self.current {
            return false;
        }
        self.current = viewport;
        true
    }
}
