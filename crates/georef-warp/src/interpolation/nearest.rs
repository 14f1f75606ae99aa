use georef_raster::{Raster, RasterDtype};

/// Kernel for nearest neighbor interpolation.
pub(crate) fn nearest_neighbor_interpolation<T, const C: usize>(
    raster: &Raster<T, C>,
    u: f32,
    v: f32,
) -> [f32; C]
where
    T: RasterDtype,
{
    let (rows, cols) = (raster.rows(), raster.cols());

    let iu = (u.round() as usize).min(cols - 1);
    let iv = (v.round() as usize).min(rows - 1);

    let data = raster.as_slice();
    let base = (iv * cols + iu) * C;

    let mut pixel = [0.0f32; C];
    for (k, out) in pixel.iter_mut().enumerate() {
        *out = data[base + k].to_f32();
    }

    pixel
}
