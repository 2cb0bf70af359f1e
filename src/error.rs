use thiserror::Error;

/// Structural faults in a sphairahedron configuration.
///
/// Numeric degeneracies are not reported here: they surface as non-finite coordinates in
/// the derived geometry.
#[derive(Debug, Error)]
pub enum SphairahedronError {
    #[error("vertex {vertex} refers to generator sphere {index}, but only {count} exist")]
    VertexIndexOutOfRange { vertex: usize, index: usize, count: usize },

    #[error("vertex {index} requested, but only {count} vertexes exist")]
    VertexOutOfRange { index: usize, count: usize },

    #[error("unknown prism type {0:?}, expected one of 333, 236, 244, 2222")]
    UnknownPrismType(String),

    #[error("invalid sphairahedron json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SphairahedronError>;
