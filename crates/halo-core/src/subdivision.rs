//! Detail-level control and wholesale mesh replacement.

use crate::constants::{ICO_RADIUS, SUBDIVISION_DEFAULT, SUBDIVISION_MAX, SUBDIVISION_MIN};
use crate::error::{HaloError, Result};
use crate::geometry::build_icosahedron;
use crate::scene::{Scene, SceneNode};

/// Icosahedron subdivision depth, always within the slider range 0..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubdivisionLevel(u8);

impl SubdivisionLevel {
    pub const MIN: Self = Self(SUBDIVISION_MIN);
    pub const MAX: Self = Self(SUBDIVISION_MAX);

    pub fn new(level: i64) -> Result<Self> {
        if (SUBDIVISION_MIN as i64..=SUBDIVISION_MAX as i64).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(HaloError::SubdivisionOutOfRange(level))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Triangles produced at this level.
    pub fn triangle_count(self) -> usize {
        20 * 4usize.pow(self.0 as u32)
    }
}

impl Default for SubdivisionLevel {
    fn default() -> Self {
        Self(SUBDIVISION_DEFAULT)
    }
}

impl TryFrom<i64> for SubdivisionLevel {
    type Error = HaloError;
    fn try_from(level: i64) -> Result<Self> {
        Self::new(level)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubdivisionPhase {
    Stable(SubdivisionLevel),
    Rebuilding,
}

/// What a level change did to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rebuild {
    Unchanged,
    /// Level stored, but the displayed model is not an icosahedron.
    Deferred,
    Replaced { detached_features: usize, attached_features: usize },
}

#[derive(Clone, Debug)]
pub struct SubdivisionController {
    phase: SubdivisionPhase,
    level: SubdivisionLevel,
    radius: f32,
    owns_model: bool,
}

impl SubdivisionController {
    /// `owns_model` is false when the scene shows an externally loaded mesh.
    pub fn new(level: SubdivisionLevel, owns_model: bool) -> Self {
        Self {
            phase: SubdivisionPhase::Stable(level),
            level,
            radius: ICO_RADIUS,
            owns_model,
        }
    }

    pub fn level(&self) -> SubdivisionLevel {
        self.level
    }

    pub fn phase(&self) -> SubdivisionPhase {
        self.phase
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Model for the current level.
    pub fn build(&self) -> SceneNode {
        SceneNode::leaf(build_icosahedron(self.radius, self.level.get()))
    }

    /// Raw slider value entry point; out-of-range values leave everything untouched.
    pub fn request(&mut self, raw: i64, scene: &mut Scene) -> Result<Rebuild> {
        let level = SubdivisionLevel::new(raw)?;
        Ok(self.set_level(level, scene))
    }

    /// Swap the displayed icosahedron for one at `level`.
    ///
    /// The old model and its features are detached before the new model is
    /// built and attached. The current orientation carries over.
    pub fn set_level(&mut self, level: SubdivisionLevel, scene: &mut Scene) -> Rebuild {
        if level == self.level {
            return Rebuild::Unchanged;
        }
        self.level = level;
        if !self.owns_model {
            log::info!(
                "[subdiv] level {} recorded; external mesh left as is",
                level.get()
            );
            return Rebuild::Deferred;
        }

        self.phase = SubdivisionPhase::Rebuilding;
        let old = scene.detach();
        let rotation = old.as_ref().and_then(SceneNode::leading_rotation);
        let detached_features = old.as_ref().map_or(0, SceneNode::feature_count);
        drop(old);

        let mut node = self.build();
        if let Some(rotation) = rotation {
            node.transform.rotation = rotation;
        }
        let attached_features = node.feature_count();
        scene.attach(node);
        self.phase = SubdivisionPhase::Stable(level);

        log::info!(
            "[subdiv] level {} -> {} triangles ({} features replaced by {})",
            level.get(),
            level.triangle_count(),
            detached_features,
            attached_features
        );
        Rebuild::Replaced {
            detached_features,
            attached_features,
        }
    }
}
