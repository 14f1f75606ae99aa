use rayon::prelude::*;

use georef_raster::{Raster, RasterDtype};

/// Apply a function to each output row in parallel.
///
/// The raster is split into scanlines of `C * cols` samples; each scanline
/// is handed to `f` with its row index on a rayon worker. Every worker only
/// reads shared immutable inputs captured by `f`, so no locking is needed.
pub fn par_iter_rows<T, const C: usize>(
    dst: &mut Raster<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: RasterDtype,
{
    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(row, row_chunk)| f(row, row_chunk));
}

#[cfg(test)]
mod tests {
    use super::*;
    use georef_raster::RasterSize;

    #[test]
    fn rows_are_visited_once_each() {
        let mut dst = Raster::<u8, 2>::from_size_val(
            RasterSize {
                width: 3,
                height: 4,
            },
            0,
        )
        .unwrap();

        par_iter_rows(&mut dst, |row, chunk| {
            for sample in chunk.iter_mut() {
                *sample = row as u8;
            }
        });

        for row in 0..4 {
            for col in 0..3 {
                assert_eq!(dst.pixel(col, row), Some([row as u8; 2]));
            }
        }
    }
}
