/// A rectangular map-space viewport.
///
/// `min` is the bottom-left and `max` the top-right map coordinate. When the
/// extent is rendered into an output raster, row zero sits at `max_y` (map
/// y grows upward, raster rows grow downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapExtent {
    /// Smallest map x covered by the viewport.
    pub min_x: f64,
    /// Smallest map y covered by the viewport.
    pub min_y: f64,
    /// Largest map x covered by the viewport.
    pub max_x: f64,
    /// Largest map y covered by the viewport.
    pub max_y: f64,
}

impl MapExtent {
    /// Create an extent from min/max corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the extent in map units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the extent in map units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether the extent covers a non-empty area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Map coordinate of the center of output pixel `(col, row)` for an
    /// output raster of `out_w` by `out_h` pixels.
    pub fn pixel_center(&self, col: usize, row: usize, out_w: usize, out_h: usize) -> [f64; 2] {
        let x = self.min_x + (col as f64 + 0.5) / out_w as f64 * self.width();
        let y = self.max_y - (row as f64 + 0.5) / out_h as f64 * self.height();
        [x, y]
    }
}
