use glam::Vec3;
use halo_core::geometry::{attach_edge_markers, EDGE_MARKERS};
use halo_core::{build_icosahedron, HaloError, Mesh, SubdivisionLevel, BALL_REST_SCALE};

#[test]
fn triangle_count_quadruples_per_level() {
    for level in 0..=5u8 {
        let mesh = build_icosahedron(1.2, level);
        let expected = 20 * 4usize.pow(level as u32);
        assert_eq!(mesh.triangle_count(), expected, "level {level}");
        assert_eq!(
            SubdivisionLevel::new(level as i64).map(|l| l.triangle_count()),
            Ok(expected)
        );
    }
}

#[test]
fn every_vertex_lies_on_the_circumsphere() {
    let mesh = build_icosahedron(1.2, 2);
    for p in &mesh.positions {
        assert!((p.length() - 1.2).abs() < 1e-4, "{p:?}");
    }
}

#[test]
fn one_feature_per_raw_vertex() {
    let mesh = build_icosahedron(1.2, 1);
    // 80 triangles, corners duplicated per triangle
    assert_eq!(mesh.vertex_count(), 240);
    assert_eq!(mesh.features.len(), mesh.vertex_count());
    for (feature, p) in mesh.features.iter().zip(&mesh.positions) {
        assert_eq!(feature.anchor, *p);
        assert_eq!(feature.scale, BALL_REST_SCALE);
    }
}

#[test]
fn markers_are_a_permutation_of_the_unit_vectors_per_triangle() {
    let mesh = build_icosahedron(1.0, 2);
    assert_eq!(mesh.edge_markers.len(), mesh.vertex_count());
    for tri in mesh.edge_markers.chunks_exact(3) {
        let sum: [f32; 3] = [0, 1, 2].map(|k| tri.iter().map(|m| m[k]).sum());
        assert_eq!(sum, [1.0, 1.0, 1.0]);
        for m in tri {
            assert!(EDGE_MARKERS.contains(m));
        }
    }
}

#[test]
fn markers_reject_partial_triangles() {
    let mut mesh = Mesh {
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
        ..Default::default()
    };
    assert_eq!(
        attach_edge_markers(&mut mesh),
        Err(HaloError::UnsupportedTopology { vertices: 4 })
    );
    assert!(mesh.edge_markers.is_empty());
}

#[test]
fn from_triangles_builds_flat_normals() {
    let mesh = Mesh::from_triangles(vec![Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
    assert_eq!(mesh.normals, vec![Vec3::Z; 3]);
    let vertices = mesh.vertices();
    assert_eq!(vertices.len(), 3);
    assert_eq!(vertices[1].edge_marker, EDGE_MARKERS[1]);
}
