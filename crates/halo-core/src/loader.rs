//! Mesh provider for externally loaded OBJ and STL files.
//!
//! Only triangulated input is accepted; the parsers never repair topology.

use crate::config::MeshFormat;
use crate::error::{HaloError, Result};
use crate::geometry::Mesh;
use crate::scene::SceneNode;
use glam::Vec3;

const STL_HEADER_LEN: usize = 80;
const STL_TRIANGLE_LEN: usize = 50;

/// Parse file contents into a displayable model.
pub fn parse_mesh(format: MeshFormat, bytes: &[u8]) -> Result<SceneNode> {
    let node = match format {
        MeshFormat::Obj => {
            let text = std::str::from_utf8(bytes).map_err(|e| HaloError::MalformedMesh {
                line: 0,
                reason: e.to_string(),
            })?;
            parse_obj(text)?
        }
        MeshFormat::Stl => SceneNode::leaf(parse_stl(bytes)?),
    };
    log::info!(
        "[loader] {:?}: {} mesh(es), {} features",
        format,
        node.mesh_count(),
        node.feature_count()
    );
    Ok(node)
}

/// Wavefront OBJ. Every `o`/`g` object with faces becomes one leaf; several
/// objects are returned as a group.
pub fn parse_obj(text: &str) -> Result<SceneNode> {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut objects: Vec<Vec<Vec3>> = vec![Vec::new()];

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let mut parts = raw.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords = parse_floats(parts, line)?;
                vertices.push(Vec3::new(coords[0], coords[1], coords[2]));
            }
            Some("o") | Some("g") => {
                if objects.last().is_some_and(|o| !o.is_empty()) {
                    objects.push(Vec::new());
                }
            }
            Some("f") => {
                let corners: Vec<&str> = parts.collect();
                if corners.len() > 3 {
                    return Err(HaloError::NonTriangularFace {
                        line,
                        corners: corners.len(),
                    });
                }
                if corners.len() < 3 {
                    return Err(malformed(line, "face needs three corners"));
                }
                let tri = objects.last_mut().ok_or_else(|| malformed(line, "no object"))?;
                for corner in corners {
                    tri.push(resolve_index(corner, &vertices, line)?);
                }
            }
            _ => {}
        }
    }

    let mut leaves = objects
        .into_iter()
        .filter(|o| !o.is_empty())
        .map(|positions| Mesh::from_triangles(positions).map(SceneNode::leaf))
        .collect::<Result<Vec<_>>>()?;
    match leaves.len() {
        0 => Err(malformed(0, "no faces")),
        1 => Ok(leaves.remove(0)),
        _ => Ok(SceneNode::group(leaves)),
    }
}

/// ASCII or binary STL.
pub fn parse_stl(bytes: &[u8]) -> Result<Mesh> {
    let looks_ascii = bytes.starts_with(b"solid")
        && std::str::from_utf8(bytes).is_ok_and(|t| t.contains("facet"));
    if looks_ascii {
        parse_stl_ascii(std::str::from_utf8(bytes).unwrap_or_default())
    } else {
        parse_stl_binary(bytes)
    }
}

fn parse_stl_ascii(text: &str) -> Result<Mesh> {
    let mut positions = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let mut parts = raw.split_whitespace();
        if parts.next() == Some("vertex") {
            let c = parse_floats(parts, idx + 1)?;
            positions.push(Vec3::new(c[0], c[1], c[2]));
        }
    }
    if positions.is_empty() {
        return Err(malformed(0, "no facets"));
    }
    Mesh::from_triangles(positions)
}

fn parse_stl_binary(bytes: &[u8]) -> Result<Mesh> {
    let count_bytes = bytes
        .get(STL_HEADER_LEN..STL_HEADER_LEN + 4)
        .ok_or_else(|| malformed(0, "truncated header"))?;
    let count = u32::from_le_bytes([count_bytes[0], count_bytes[1], count_bytes[2], count_bytes[3]])
        as usize;
    let body = &bytes[STL_HEADER_LEN + 4..];
    let needed = count
        .checked_mul(STL_TRIANGLE_LEN)
        .ok_or_else(|| malformed(0, "triangle count overflows"))?;
    if body.len() < needed {
        return Err(malformed(0, "truncated triangle data"));
    }
    // Sized from the data actually present, never from the header alone.
    let mut positions = Vec::with_capacity(body.len() / STL_TRIANGLE_LEN * 3);
    for tri in body.chunks_exact(STL_TRIANGLE_LEN).take(count) {
        // 12 bytes of normal, then three corners, then a 2-byte attribute count
        for corner in tri[12..48].chunks_exact(12) {
            let f = |o: usize| {
                f32::from_le_bytes([corner[o], corner[o + 1], corner[o + 2], corner[o + 3]])
            };
            positions.push(Vec3::new(f(0), f(4), f(8)));
        }
    }
    if positions.is_empty() {
        return Err(malformed(0, "no facets"));
    }
    Mesh::from_triangles(positions)
}

fn parse_floats<'a>(parts: impl Iterator<Item = &'a str>, line: usize) -> Result<[f32; 3]> {
    let mut out = [0.0; 3];
    let mut n = 0;
    for (slot, token) in out.iter_mut().zip(parts) {
        *slot = token
            .parse()
            .map_err(|_| malformed(line, &format!("bad number `{token}`")))?;
        n += 1;
    }
    if n < 3 {
        return Err(malformed(line, "expected three coordinates"));
    }
    Ok(out)
}

/// OBJ corner reference `v`, `v/vt`, `v//vn` or `v/vt/vn`; negative indices
/// count back from the latest vertex.
fn resolve_index(corner: &str, vertices: &[Vec3], line: usize) -> Result<Vec3> {
    let head = corner.split('/').next().unwrap_or(corner);
    let index: i64 = head
        .parse()
        .map_err(|_| malformed(line, &format!("bad vertex reference `{corner}`")))?;
    let resolved = if index < 0 {
        vertices.len() as i64 + index
    } else {
        index - 1
    };
    usize::try_from(resolved)
        .ok()
        .and_then(|i| vertices.get(i).copied())
        .ok_or_else(|| malformed(line, &format!("vertex {index} out of range")))
}

fn malformed(line: usize, reason: &str) -> HaloError {
    HaloError::MalformedMesh {
        line,
        reason: reason.to_string(),
    }
}
