/// An error type for the raster module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// Error when the buffer length does not match the raster dimensions.
    #[error("Data length ({0}) does not match the raster size ({1})")]
    InvalidBufferLength(usize, usize),

    /// Error when a raster is created with a zero width or height.
    #[error("Raster dimensions must be non-zero, got {0}x{1}")]
    ZeroSize(usize, usize),
}
