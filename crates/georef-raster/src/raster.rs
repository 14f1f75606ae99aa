use crate::error::RasterError;

/// Raster size in pixels
///
/// # Examples
///
/// ```
/// use georef_raster::RasterSize;
///
/// let size = RasterSize {
///     width: 10,
///     height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterSize {
    /// Width of the raster in pixels
    pub width: usize,
    /// Height of the raster in pixels
    pub height: usize,
}

impl std::fmt::Display for RasterSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RasterSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for RasterSize {
    fn from(size: [usize; 2]) -> Self {
        RasterSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for raster sample types.
///
/// Send and Sync is required so sampling kernels can run on rayon workers.
pub trait RasterDtype: Copy + Default + Send + Sync {
    /// Convert the sample to f32 for interpolation arithmetic.
    fn to_f32(self) -> f32;
    /// Convert an f32 value back to the sample type.
    fn from_f32(x: f32) -> Self;
}

impl RasterDtype for f32 {
    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(x: f32) -> Self {
        x
    }
}

impl RasterDtype for u8 {
    fn to_f32(self) -> f32 {
        self as f32
    }

    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// Represents a raster with interleaved pixel data.
///
/// The data is stored row-major with shape (H, W, C), where H is the height,
/// W is the width and C is the number of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster<T, const CHANNELS: usize> {
    size: RasterSize,
    data: Vec<T>,
}

/// An RGBA raster with 8-bit samples, the wire format of the warper.
pub type RgbaRaster = Raster<u8, 4>;

impl<T, const CHANNELS: usize> Raster<T, CHANNELS>
where
    T: RasterDtype,
{
    /// Create a new raster from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the raster in pixels.
    /// * `data` - The interleaved pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the raster size, or the
    /// size has a zero dimension, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use georef_raster::{Raster, RasterSize};
    ///
    /// let raster = Raster::<u8, 4>::new(
    ///     RasterSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 4],
    /// ).unwrap();
    ///
    /// assert_eq!(raster.size().width, 10);
    /// assert_eq!(raster.size().height, 20);
    /// assert_eq!(raster.num_channels(), 4);
    /// ```
    pub fn new(size: RasterSize, data: Vec<T>) -> Result<Self, RasterError> {
        if size.width == 0 || size.height == 0 {
            return Err(RasterError::ZeroSize(size.width, size.height));
        }

        let expected = size.width * size.height * CHANNELS;
        if data.len() != expected {
            return Err(RasterError::InvalidBufferLength(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new raster filled with the given value.
    pub fn from_size_val(size: RasterSize, val: T) -> Result<Self, RasterError> {
        let data = vec![val; size.width * size.height * CHANNELS];
        Self::new(size, data)
    }

    /// Get the size of the raster in pixels.
    pub fn size(&self) -> RasterSize {
        self.size
    }

    /// Get the width of the raster in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the raster in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the raster.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the raster.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels of the raster.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable flat slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get one sample at the given column, row and channel.
    ///
    /// Returns `None` when the index is out of bounds.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Option<&T> {
        if x >= self.size.width || y >= self.size.height || ch >= CHANNELS {
            return None;
        }
        self.data.get((y * self.size.width + x) * CHANNELS + ch)
    }

    /// Get one full pixel at the given column and row.
    ///
    /// Returns `None` when the coordinate is out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[T; CHANNELS]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let base = (y * self.size.width + x) * CHANNELS;
        let mut out = [T::default(); CHANNELS];
        out.copy_from_slice(&self.data[base..base + CHANNELS]);
        Some(out)
    }

    /// Consume the raster and return the underlying pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_new() -> Result<(), RasterError> {
        let raster = Raster::<u8, 4>::new(
            RasterSize {
                width: 2,
                height: 3,
            },
            vec![0u8; 2 * 3 * 4],
        )?;

        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.num_channels(), 4);
        assert_eq!(raster.as_slice().len(), 24);

        Ok(())
    }

    #[test]
    fn raster_length_mismatch() {
        let res = Raster::<u8, 4>::new(
            RasterSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 3],
        );
        assert_eq!(res, Err(RasterError::InvalidBufferLength(3, 16)));
    }

    #[test]
    fn raster_zero_size() {
        let res = Raster::<u8, 1>::new(
            RasterSize {
                width: 0,
                height: 2,
            },
            vec![],
        );
        assert_eq!(res, Err(RasterError::ZeroSize(0, 2)));
    }

    #[test]
    fn raster_pixel_access() -> Result<(), RasterError> {
        let raster = Raster::<u8, 2>::new(
            RasterSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5, 6, 7],
        )?;

        assert_eq!(raster.pixel(1, 0), Some([2, 3]));
        assert_eq!(raster.pixel(0, 1), Some([4, 5]));
        assert_eq!(raster.get(1, 1, 1), Some(&7));
        assert_eq!(raster.pixel(2, 0), None);

        Ok(())
    }

    #[test]
    fn dtype_roundtrip() {
        assert_eq!(u8::from_f32(255.7), 255);
        assert_eq!(u8::from_f32(-1.0), 0);
        assert_eq!(u8::from_f32(127.4), 127);
        assert_eq!(200u8.to_f32(), 200.0);
    }
}
