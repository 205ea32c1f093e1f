//! Error types for geometry construction
//!
//! All failures are caused by malformed caller input and are reported
//! synchronously. Nothing is retried, clamped or silently dropped.

/// Errors raised while building or exporting geometry
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A triangle references a vertex that does not exist
    #[error("triangle {triangle}: index {index} out of range for vertex count {vertex_count}")]
    InvalidIndex {
        triangle: usize,
        index: i64,
        vertex_count: usize,
    },

    /// A triangle entry does not have exactly three components
    #[error("triangle {triangle}: expected 3 indices, found {components}")]
    MalformedTriangle { triangle: usize, components: usize },

    /// A renderer primitive was requested for an entity without geometry
    #[error("entity '{id}' has no geometry to render")]
    EmptyGeometry { id: String },

    /// Binary descriptor could not be decoded
    #[error("cannot decode geometry: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, GeometryError>;
