//! Pixel interpolation kernels used by the warper.
//!
//! Sampling happens in f32 regardless of the raster's sample type; the
//! [`georef_raster::RasterDtype`] trait converts in and out.

mod bilinear;
mod nearest;

use georef_raster::{Raster, RasterDtype};

pub(crate) use bilinear::bilinear_interpolation;
pub(crate) use nearest::nearest_neighbor_interpolation;

/// Interpolation mode for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation of the four nearest samples.
    #[default]
    Bilinear,
    /// Nearest neighbor lookup, faster but blocky.
    Nearest,
}

/// Interpolate a full pixel at the (sub-pixel) source coordinate `(u, v)`.
///
/// The coordinate must lie within `[0, W) x [0, H)`; neighbors past the
/// border are clamped to it.
pub fn interpolate_pixel<T, const C: usize>(
    raster: &Raster<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
) -> [f32; C]
where
    T: RasterDtype,
{
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(raster, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(raster, u, v),
    }
}
