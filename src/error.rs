use thiserror::Error;

/// Top-level error type for the vorocell geometry kernel.
#[derive(Debug, Error)]
pub enum VorocellError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
}

/// Errors related to geometric computations.
///
/// These cover invalid caller input only. Expected geometric outcomes such as
/// "no intersection" or a fully clipped-away Voronoi cell are represented as
/// values (an [`Intersection::None`](crate::math::Intersection) variant, a
/// `None` mesh), never as errors.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("invalid interval: lower bound {lower} is not below upper bound {upper}")]
    InvalidInterval { lower: f64, upper: f64 },

    #[error("mismatched lengths: expected {expected}, got {actual}")]
    MismatchedLengths { expected: usize, actual: usize },

    #[error("vertex index {index} out of bounds for {len} vertices")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors raised by the 2D triangulation collaborator.
#[derive(Debug, Error)]
pub enum TriangulationError {
    #[error("point insertion failed: {0}")]
    Insertion(String),
}

/// Convenience type alias for results using [`VorocellError`].
pub type Result<T> = std::result::Result<T, VorocellError>;
