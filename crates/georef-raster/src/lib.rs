#![deny(missing_docs)]
//! Raster buffer types for the georef crates

/// Raster container and pixel dtype trait.
pub mod raster;

/// Error types for the raster module.
pub mod error;

pub use crate::error::RasterError;
pub use crate::raster::{Raster, RasterDtype, RasterSize, RgbaRaster};
