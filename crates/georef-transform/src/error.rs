use thiserror::Error;

/// Error types for affine estimation and footprint geometry.
///
/// All of these are recoverable conditions reported to the caller; none of
/// them abort the session that produced them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The solver needs more correspondences than were supplied.
    #[error("affine solve requires at least {required} ground control points, got {actual}")]
    InsufficientPoints {
        /// Minimum number of correspondences required.
        required: usize,
        /// Actual number of correspondences provided.
        actual: usize,
    },

    /// The correspondence pixel coordinates are collinear or duplicated, so
    /// the solve matrix is singular.
    #[error("degenerate correspondence geometry: solve matrix is singular")]
    DegenerateGeometry,

    /// The matrix determinant is below the invertibility epsilon.
    #[error("affine matrix is not invertible (|det| below 1e-12)")]
    NonInvertible,

    /// A footprint edit moved the corners off a parallelogram, which no
    /// affine transform of the source rectangle can reproduce.
    #[error("footprint edit is not a parallelogram and cannot be georeferenced")]
    NonParallelogramEdit,
}
