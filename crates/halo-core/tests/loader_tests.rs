use halo_core::loader::{parse_mesh, parse_obj, parse_stl};
use halo_core::{HaloError, MeshFormat, NodeKind};

const TETRA_OBJ: &str = "\
# tetrahedron
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

#[test]
fn obj_triangles_become_one_leaf() {
    let node = parse_obj(TETRA_OBJ).unwrap();
    assert!(matches!(node.kind, NodeKind::Leaf(_)));
    assert_eq!(node.mesh_count(), 1);
    assert_eq!(node.feature_count(), 12);
}

#[test]
fn obj_corner_references_with_slashes_and_negatives() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2/5/1 -1\n";
    let node = parse_obj(text).unwrap();
    assert_eq!(node.feature_count(), 3);
}

#[test]
fn obj_quads_are_rejected() {
    let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
    assert_eq!(
        parse_obj(text).unwrap_err(),
        HaloError::NonTriangularFace {
            line: 5,
            corners: 4
        }
    );
}

#[test]
fn obj_objects_become_a_group() {
    let text = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 1
f 1 2 4
f 2 3 4
";
    let node = parse_obj(text).unwrap();
    let NodeKind::Group(children) = &node.kind else {
        panic!("expected a group");
    };
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].feature_count(), 3);
    assert_eq!(children[1].feature_count(), 6);
}

#[test]
fn obj_without_faces_is_malformed() {
    let err = parse_obj("v 0 0 0\n").unwrap_err();
    assert!(matches!(err, HaloError::MalformedMesh { .. }));
    assert!(err.is_configuration());
}

#[test]
fn obj_index_out_of_range_is_malformed() {
    let err = parse_obj("v 0 0 0\nf 1 2 3\n").unwrap_err();
    assert!(matches!(err, HaloError::MalformedMesh { line: 2, .. }));
}

#[test]
fn ascii_stl() {
    let text = "\
solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid tri
";
    let mesh = parse_stl(text.as_bytes()).unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.features.len(), 3);
}

fn encode_binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for tri in triangles {
        bytes.extend_from_slice(&[0u8; 12]);
        for corner in tri {
            for c in corner {
                bytes.extend_from_slice(&c.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&[0u8; 2]);
    }
    bytes
}

#[test]
fn binary_stl() {
    let bytes = encode_binary_stl(&[
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    ]);
    let mesh = parse_stl(&bytes).unwrap();
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.positions[4].to_array(), [0.0, 1.0, 0.0]);
}

#[test]
fn truncated_binary_stl_is_malformed() {
    let mut bytes = encode_binary_stl(&[[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
    bytes.truncate(100);
    assert!(matches!(
        parse_stl(&bytes),
        Err(HaloError::MalformedMesh { .. })
    ));
}

#[test]
fn binary_stl_with_absurd_triangle_count_is_malformed() {
    let mut bytes = encode_binary_stl(&[[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
    bytes[80..84].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(
        parse_stl(&bytes),
        Err(HaloError::MalformedMesh { .. })
    ));
}

#[test]
fn parse_mesh_dispatches_on_format() {
    let node = parse_mesh(MeshFormat::Obj, TETRA_OBJ.as_bytes()).unwrap();
    assert_eq!(node.feature_count(), 12);
    assert!(parse_mesh(MeshFormat::Obj, &[0xff, 0xfe]).is_err());
}
