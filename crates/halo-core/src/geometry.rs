//! Polyhedron construction, edge markers and per-vertex highlight features.
//!
//! Meshes are non-indexed triangle soups: every triangle owns its three
//! corners, so a vertex shared by several triangles appears once per
//! triangle. Edge markers and highlight features follow the same layout.

use crate::constants::{BALL_BASE_SCALE, BALL_REST_SCALE};
use crate::error::{HaloError, Result};
use fnv::FnvHashMap;
use glam::Vec3;

/// One-hot markers assigned to the corners of every triangle, in winding order.
pub const EDGE_MARKERS: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

const BASE_TRIANGLES: usize = 20;

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub edge_marker: [f32; 3],
}

/// A discrete highlightable unit parented to a mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightFeature {
    /// Rest position in the parent mesh's local space.
    pub anchor: Vec3,
    /// Unhighlighted size.
    pub base_scale: f32,
    /// Last computed signed proximity; meaningless until the first update.
    pub intensity: f32,
    /// Currently drawn size.
    pub scale: f32,
}

impl HighlightFeature {
    pub fn new(anchor: Vec3) -> Self {
        Self {
            anchor,
            base_scale: BALL_BASE_SCALE,
            intensity: 0.0,
            scale: BALL_REST_SCALE,
        }
    }

    /// Record a new proximity and resize accordingly.
    #[inline]
    pub fn apply_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
        self.scale = self.base_scale * crate::angle::highlight_multiplier(intensity);
    }
}

/// Renderable triangle soup with its highlight features.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub edge_markers: Vec<[f32; 3]>,
    pub features: Vec<HighlightFeature>,
}

impl Mesh {
    /// Build a complete mesh from raw triangle corners.
    ///
    /// Fails with [`HaloError::UnsupportedTopology`] unless the corner count
    /// is a multiple of three.
    pub fn from_triangles(positions: Vec<Vec3>) -> Result<Self> {
        let mut mesh = Mesh {
            positions,
            ..Default::default()
        };
        attach_edge_markers(&mut mesh)?;
        mesh.normals = flat_normals(&mesh.positions);
        attach_highlight_features(&mut mesh);
        Ok(mesh)
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Interleave positions, normals and markers for upload.
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| MeshVertex {
                position: p.to_array(),
                normal: self.normals.get(i).copied().unwrap_or(Vec3::Z).to_array(),
                edge_marker: self.edge_markers.get(i).copied().unwrap_or([0.0; 3]),
            })
            .collect()
    }
}

/// Geodesic polyhedron of the given circumradius.
///
/// Level 0 is the plain icosahedron; every level splits each triangle into
/// four, so the result has `20 * 4^level` triangles.
pub fn build_icosahedron(radius: f32, level: u8) -> Mesh {
    let (points, indices) = icosphere(level);
    let positions: Vec<Vec3> = indices
        .iter()
        .map(|&i| points[i as usize] * radius)
        .collect();
    debug_assert_eq!(positions.len(), BASE_TRIANGLES * 3 * 4usize.pow(level as u32));
    let mut mesh = Mesh {
        positions,
        ..Default::default()
    };
    // A soup generated from whole index triples always has whole triangles.
    mesh.edge_markers = EDGE_MARKERS
        .iter()
        .copied()
        .cycle()
        .take(mesh.positions.len())
        .collect();
    mesh.normals = flat_normals(&mesh.positions);
    attach_highlight_features(&mut mesh);
    mesh
}

/// Tag the corners of every triangle with the three one-hot markers.
///
/// Leaves the mesh untouched when its corners do not form whole triangles.
pub fn attach_edge_markers(mesh: &mut Mesh) -> Result<()> {
    let vertices = mesh.positions.len();
    if vertices % 3 != 0 {
        return Err(HaloError::UnsupportedTopology { vertices });
    }
    mesh.edge_markers.clear();
    mesh.edge_markers.reserve(vertices);
    for _ in 0..vertices / 3 {
        mesh.edge_markers.extend_from_slice(&EDGE_MARKERS);
    }
    Ok(())
}

/// One feature per raw vertex, duplicates included.
pub fn attach_highlight_features(mesh: &mut Mesh) {
    mesh.features = mesh
        .positions
        .iter()
        .map(|&p| HighlightFeature::new(p))
        .collect();
}

fn flat_normals(positions: &[Vec3]) -> Vec<Vec3> {
    let mut normals = Vec::with_capacity(positions.len());
    for tri in positions.chunks_exact(3) {
        let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
        normals.extend_from_slice(&[n, n, n]);
    }
    normals
}

/// Unit icosphere as indexed geometry.
fn icosphere(level: u8) -> (Vec<Vec3>, Vec<u32>) {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut points: Vec<Vec3> = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .iter()
    .map(|p| p.normalize())
    .collect();

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7,
        1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9,
        8, 1,
    ];

    for _ in 0..level {
        indices = subdivide(&mut points, &indices);
    }
    (points, indices)
}

/// Split each triangle into four at its edge midpoints, pushed back onto the
/// unit sphere. Midpoints are shared between neighbouring triangles.
fn subdivide(points: &mut Vec<Vec3>, indices: &[u32]) -> Vec<u32> {
    let mut cache: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
    let mut midpoint = |a: u32, b: u32, points: &mut Vec<Vec3>| -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        *cache.entry(key).or_insert_with(|| {
            points.push((points[a as usize] + points[b as usize]).normalize());
            (points.len() - 1) as u32
        })
    };

    let mut out = Vec::with_capacity(indices.len() * 4);
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = midpoint(a, b, points);
        let bc = midpoint(b, c, points);
        let ca = midpoint(c, a, points);
        out.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
    }
    out
}
