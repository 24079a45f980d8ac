//! Error types shared by the geometry builder, mesh parsers and controllers.

/// Errors surfaced by the highlight engine.
///
/// Zero-sized viewports and detached canvases are deliberately absent: those
/// are soft conditions that make the affected operation a no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HaloError {
    /// Vertex buffer is not a list of whole triangles.
    #[error("unsupported mesh topology: {vertices} vertices do not form whole triangles")]
    UnsupportedTopology { vertices: usize },

    /// Polygon with more than three corners in a parsed mesh.
    #[error("unsupported mesh topology: face with {corners} corners on line {line}")]
    NonTriangularFace { line: usize, corners: usize },

    /// Mesh file-type tag other than `stl` or `obj`.
    #[error("unsupported mesh format tag `{0}`")]
    UnsupportedFormat(String),

    /// Subdivision level outside the slider range.
    #[error("subdivision level {0} outside 0..=5")]
    SubdivisionOutOfRange(i64),

    /// Syntax error while parsing a mesh file.
    #[error("malformed mesh on line {line}: {reason}")]
    MalformedMesh { line: usize, reason: String },

    /// The external mesh provider reported an error.
    #[error("mesh load failed: {0}")]
    LoadFailure(String),
}

impl HaloError {
    /// True for errors caused by unsupported input rather than a failed load.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, HaloError::LoadFailure(_))
    }
}

pub type Result<T> = std::result::Result<T, HaloError>;
