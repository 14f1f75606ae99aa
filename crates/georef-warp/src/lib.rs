#![deny(missing_docs)]
//! Inverse-affine raster warping into a map-space viewport.
//!
//! The warper resamples a source raster through the inverse of its
//! georeferencing transform: every output pixel is mapped to a map
//! coordinate via the requested viewport extent, clipped against the
//! image's footprint polygon, pulled back to source pixel space and
//! bilinearly sampled. Out-of-footprint and out-of-image pixels come out
//! fully transparent. The per-pixel work is independent, so output rows are
//! processed on the rayon thread pool.

/// Map-space viewport extents.
pub mod extent;

/// Pixel interpolation kernels.
pub mod interpolation;

/// Row-parallel execution helpers.
pub mod parallel;

/// Point-in-polygon clipping.
pub mod polygon;

/// The warp operation itself.
pub mod warp;

pub use crate::extent::MapExtent;
pub use crate::interpolation::{interpolate_pixel, InterpolationMode};
pub use crate::polygon::point_in_ring;
pub use crate::warp::{warp, WarpError, WarpOptions};
