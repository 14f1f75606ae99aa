use georef_raster::{RasterDtype, RasterError, RasterSize, RgbaRaster};
use georef_transform::{AffineTransform, FootprintPolygon, TransformError};

use crate::extent::MapExtent;
use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;
use crate::polygon::point_in_ring;

/// Errors that can occur while warping.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// The requested viewport extent covers no area.
    #[error("viewport extent is empty: {0:.3} x {1:.3} map units")]
    EmptyExtent(f64, f64),

    /// The output raster could not be allocated.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// The georeferencing transform could not be inverted.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Rendering options for a warp pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpOptions {
    /// Interpolation mode for source sampling.
    pub interpolation: InterpolationMode,
    /// Alpha multiplier in `[0, 1]` applied to every covered pixel.
    pub opacity: f32,
}

impl Default for WarpOptions {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMode::Bilinear,
            opacity: 1.0,
        }
    }
}

/// Resample a georeferenced source raster into a map-space viewport.
///
/// For every output pixel the map coordinate of its center is derived from
/// `extent` (linear across the viewport, row zero at the top), rejected
/// early against the footprint's bounding box, clipped against the
/// footprint ring with the even-odd rule, pulled back to source pixel space
/// through the inverse of `transform` and sampled per channel. Pixels
/// outside the footprint or the source image stay fully transparent; that
/// is the documented outcome, not an error. Handles any invertible affine
/// transform including shear, which the center/scale/rotation
/// decomposition cannot represent.
///
/// Output rows are processed in parallel; the source raster is only read.
pub fn warp(
    src: &RgbaRaster,
    transform: &AffineTransform,
    footprint: &FootprintPolygon,
    extent: &MapExtent,
    out_size: RasterSize,
    options: &WarpOptions,
) -> Result<RgbaRaster, WarpError> {
    if extent.is_empty() {
        return Err(WarpError::EmptyExtent(extent.width(), extent.height()));
    }

    // invert once; every pixel shares the map-to-pixel direction
    let inverse = transform.invert()?;
    let ring = footprint.ring();
    let (bb_min, bb_max) = footprint.bounding_box();

    let (src_w, src_h) = (src.width() as f64, src.height() as f64);
    let (out_w, out_h) = (out_size.width, out_size.height);
    let opacity = options.opacity.clamp(0.0, 1.0);

    let mut dst = RgbaRaster::from_size_val(out_size, 0)?;

    parallel::par_iter_rows(&mut dst, |row, row_chunk| {
        for (col, out_pixel) in row_chunk.chunks_exact_mut(4).enumerate() {
            let map = extent.pixel_center(col, row, out_w, out_h);

            if map[0] < bb_min[0] || map[0] > bb_max[0] || map[1] < bb_min[1] || map[1] > bb_max[1]
            {
                continue;
            }
            if !point_in_ring(&ring, map) {
                continue;
            }

            let source = inverse.apply(map);
            let (u, v) = (source[0], source[1]);
            if u < 0.0 || u >= src_w || v < 0.0 || v >= src_h {
                continue;
            }

            let mut sample = interpolate_pixel(src, u as f32, v as f32, options.interpolation);
            sample[3] *= opacity;
            for (out, value) in out_pixel.iter_mut().zip(sample) {
                *out = u8::from_f32(value);
            }
        }
    });

    Ok(dst)
}
