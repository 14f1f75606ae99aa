/// A ground control point: one pixel-to-map correspondence.
///
/// Pixel coordinates are in source-image space with the origin at the top
/// left and y growing downward. Map coordinates are in a single fixed planar
/// map coordinate system. A `Gcp` is immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gcp {
    /// Caller-assigned identifier, echoed back in fit residuals.
    pub id: u64,
    /// Source-image pixel coordinate (u, v).
    pub pixel: [f64; 2],
    /// Map-plane coordinate (x, y).
    pub map: [f64; 2],
}

impl Gcp {
    /// Create a new ground control point.
    pub fn new(id: u64, pixel: [f64; 2], map: [f64; 2]) -> Self {
        Self { id, pixel, map }
    }
}
