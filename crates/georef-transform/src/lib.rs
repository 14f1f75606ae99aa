#![deny(missing_docs)]
//! Affine georeferencing estimation from ground control points.
//!
//! A ground control point (GCP) pairs a source-image pixel coordinate with a
//! map-plane coordinate. This crate estimates the forward affine transform
//! (pixel to map) from a set of GCPs, reports fit quality for overdetermined
//! sets, validates correspondence sets before a solve is attempted, and
//! derives the image's map-space footprint polygon from the transform.
//!
//! ## Example: exact three-point solve
//!
//! ```
//! use georef_transform::{solve_affine, Gcp};
//!
//! let gcps = vec![
//!     Gcp::new(0, [0.0, 0.0], [100.0, 100.0]),
//!     Gcp::new(1, [10.0, 0.0], [110.0, 100.0]),
//!     Gcp::new(2, [0.0, 10.0], [100.0, 90.0]),
//! ];
//!
//! let transform = solve_affine(&gcps)?;
//! let mapped = transform.apply([10.0, 10.0]);
//! assert!((mapped[0] - 110.0).abs() < 1e-9);
//! assert!((mapped[1] - 90.0).abs() < 1e-9);
//! # Ok::<(), georef_transform::TransformError>(())
//! ```

/// The affine transform value type and its algebra.
pub mod affine;

/// Lossy center/scale/rotation decomposition for legacy consumers.
pub mod decompose;

/// Error types for the transform module.
pub mod error;

/// Footprint polygon projection and reconstruction.
pub mod footprint;

/// Fit quality evaluation (residuals, RMSE).
pub mod fit;

/// Ground control point value type.
pub mod gcp;

/// Affine solver (exact and least squares).
pub mod solve;

/// Correspondence set validation.
pub mod validate;

pub use crate::affine::{AffineTransform, DET_EPSILON};
pub use crate::decompose::{decompose, Decomposition};
pub use crate::error::TransformError;
pub use crate::fit::{evaluate_fit, FitReport, FitStatus, Residual};
pub use crate::footprint::{project_footprint, transform_from_footprint, FootprintPolygon};
pub use crate::gcp::Gcp;
pub use crate::solve::solve_affine;
pub use crate::validate::{validate_gcps, ValidationIssue, ValidationReport, ValidationWarning};
