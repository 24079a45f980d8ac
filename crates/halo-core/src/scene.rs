//! Minimal scene graph: a single model made of mesh leaves and groups.

use crate::geometry::{HighlightFeature, Mesh};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local transform with Euler rotation applied in XYZ order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Leaf(Mesh),
    Group(Vec<SceneNode>),
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub transform: Transform,
    pub kind: NodeKind,
}

impl SceneNode {
    pub fn leaf(mesh: Mesh) -> Self {
        Self {
            transform: Transform::default(),
            kind: NodeKind::Leaf(mesh),
        }
    }

    pub fn group(children: Vec<SceneNode>) -> Self {
        Self {
            transform: Transform::default(),
            kind: NodeKind::Group(children),
        }
    }

    /// Rotate every mesh leaf in place; groups only forward to their children.
    pub fn spin(&mut self, delta: Vec3) {
        match &mut self.kind {
            NodeKind::Leaf(_) => self.transform.rotation += delta,
            NodeKind::Group(children) => {
                for child in children {
                    child.spin(delta);
                }
            }
        }
    }

    /// Visit every mesh leaf together with its world matrix.
    pub fn visit_meshes(&self, parent: Mat4, f: &mut impl FnMut(&Mesh, Mat4)) {
        let world = parent * self.transform.matrix();
        match &self.kind {
            NodeKind::Leaf(mesh) => f(mesh, world),
            NodeKind::Group(children) => {
                for child in children {
                    child.visit_meshes(world, f);
                }
            }
        }
    }

    pub fn visit_meshes_mut(&mut self, parent: Mat4, f: &mut impl FnMut(&mut Mesh, Mat4)) {
        let world = parent * self.transform.matrix();
        match &mut self.kind {
            NodeKind::Leaf(mesh) => f(mesh, world),
            NodeKind::Group(children) => {
                for child in children {
                    child.visit_meshes_mut(world, f);
                }
            }
        }
    }

    pub fn mesh_count(&self) -> usize {
        let mut n = 0;
        self.visit_meshes(Mat4::IDENTITY, &mut |_, _| n += 1);
        n
    }

    pub fn feature_count(&self) -> usize {
        let mut n = 0;
        self.visit_meshes(Mat4::IDENTITY, &mut |m, _| n += m.features.len());
        n
    }

    /// Copy of every feature in traversal order.
    pub fn features(&self) -> Vec<HighlightFeature> {
        let mut out = Vec::new();
        self.visit_meshes(Mat4::IDENTITY, &mut |m, _| {
            out.extend(m.features.iter().cloned())
        });
        out
    }

    /// Rotation of the first leaf found, used to carry orientation across rebuilds.
    pub fn leading_rotation(&self) -> Option<Vec3> {
        match &self.kind {
            NodeKind::Leaf(_) => Some(self.transform.rotation),
            NodeKind::Group(children) => children.iter().find_map(|c| c.leading_rotation()),
        }
    }
}

/// Scene lighting shared by every mesh.
#[derive(Clone, Debug)]
pub struct Lights {
    pub direction: Vec3,
    pub intensity: f32,
    pub ambient: [f32; 3],
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            direction: crate::constants::LIGHT_DIRECTION.normalize(),
            intensity: crate::constants::LIGHT_INTENSITY,
            ambient: crate::constants::AMBIENT_COLOR,
        }
    }
}

/// The one model on display plus its lighting.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    model: Option<SceneNode>,
    pub lights: Lights,
    generation: u64,
}

impl Scene {
    /// Display `node`, handing back whatever model it replaces.
    pub fn attach(&mut self, node: SceneNode) -> Option<SceneNode> {
        let previous = self.model.take();
        self.model = Some(node);
        self.generation += 1;
        previous
    }

    pub fn detach(&mut self) -> Option<SceneNode> {
        let previous = self.model.take();
        if previous.is_some() {
            self.generation += 1;
        }
        previous
    }

    pub fn model(&self) -> Option<&SceneNode> {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> Option<&mut SceneNode> {
        self.model.as_mut()
    }

    /// Bumped on every attach/detach; renderers re-upload geometry when it changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn feature_count(&self) -> usize {
        self.model.as_ref().map_or(0, SceneNode::feature_count)
    }
}
