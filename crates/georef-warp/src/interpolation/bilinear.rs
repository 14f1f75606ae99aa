use georef_raster::{Raster, RasterDtype};

/// Kernel for bilinear interpolation.
///
/// Blends the four nearest samples around `(u, v)` weighted by the
/// fractional offsets. Neighbor indices are clamped to the raster bounds, so
/// coordinates in `[0, W) x [0, H)` are always safe.
pub(crate) fn bilinear_interpolation<T, const C: usize>(
    raster: &Raster<T, C>,
    u: f32,
    v: f32,
) -> [f32; C]
where
    T: RasterDtype,
{
    let (rows, cols) = (raster.rows(), raster.cols());

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);
    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let frac_u = u.fract();
    let frac_v = v.fract();
    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let data = raster.as_slice();
    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let mut pixel = [0.0f32; C];
    for (k, out) in pixel.iter_mut().enumerate() {
        *out = data[base00 + k].to_f32() * w00
            + data[base01 + k].to_f32() * w01
            + data[base10 + k].to_f32() * w10
            + data[base11 + k].to_f32() * w11;
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use georef_raster::RasterSize;

    #[test]
    fn interpolates_between_samples() {
        let raster = Raster::<f32, 1>::new(
            RasterSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 10.0, 20.0, 30.0],
        )
        .unwrap();

        assert_relative_eq!(bilinear_interpolation(&raster, 0.0, 0.0)[0], 0.0);
        assert_relative_eq!(bilinear_interpolation(&raster, 1.0, 0.0)[0], 10.0);
        assert_relative_eq!(bilinear_interpolation(&raster, 0.5, 0.0)[0], 5.0);
        assert_relative_eq!(bilinear_interpolation(&raster, 0.0, 0.5)[0], 10.0);
        assert_relative_eq!(bilinear_interpolation(&raster, 0.5, 0.5)[0], 15.0);
    }

    #[test]
    fn clamps_at_the_border() {
        let raster = Raster::<u8, 1>::new(
            RasterSize {
                width: 2,
                height: 1,
            },
            vec![100, 200],
        )
        .unwrap();

        // past the last column center: the right neighbor clamps
        assert_relative_eq!(bilinear_interpolation(&raster, 1.5, 0.0)[0], 200.0);
        assert_relative_eq!(bilinear_interpolation(&raster, 1.5, 0.9)[0], 200.0);
    }
}
