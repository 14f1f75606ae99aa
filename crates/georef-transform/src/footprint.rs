use crate::affine::AffineTransform;
use crate::error::TransformError;
use crate::gcp::Gcp;
use crate::solve::solve_affine;

/// Midpoint gap above this fraction of the longer diagonal fails the
/// parallelogram gate. Relative, so the gate is scale-invariant.
const PARALLELOGRAM_REL_TOL: f64 = 1e-6;

/// The image's map-space outline: four corners in the winding order of the
/// pixel corners `(0,0), (W,0), (W,H), (0,H)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FootprintPolygon {
    corners: [[f64; 2]; 4],
}

impl FootprintPolygon {
    /// Create a footprint from four map-space corners in pixel-corner
    /// winding order.
    pub fn new(corners: [[f64; 2]; 4]) -> Self {
        Self { corners }
    }

    /// The four corners, closing point not repeated.
    pub fn corners(&self) -> &[[f64; 2]; 4] {
        &self.corners
    }

    /// The closed five-point ring: the four corners with the first repeated.
    pub fn ring(&self) -> [[f64; 2]; 5] {
        let c = self.corners;
        [c[0], c[1], c[2], c[3], c[0]]
    }

    /// Axis-aligned bounding box as `(min, max)` map coordinates.
    pub fn bounding_box(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = self.corners[0];
        let mut max = self.corners[0];
        for c in &self.corners[1..] {
            min[0] = min[0].min(c[0]);
            min[1] = min[1].min(c[1]);
            max[0] = max[0].max(c[0]);
            max[1] = max[1].max(c[1]);
        }
        (min, max)
    }

    /// Whether the corners form a parallelogram: the diagonals of a
    /// parallelogram bisect each other, so their midpoints must coincide
    /// within [`PARALLELOGRAM_REL_TOL`] of the longer diagonal.
    pub fn is_parallelogram(&self) -> bool {
        let [c0, c1, c2, c3] = self.corners;
        let mid02 = [(c0[0] + c2[0]) / 2.0, (c0[1] + c2[1]) / 2.0];
        let mid13 = [(c1[0] + c3[0]) / 2.0, (c1[1] + c3[1]) / 2.0];

        let diag02 = (c2[0] - c0[0]).hypot(c2[1] - c0[1]);
        let diag13 = (c3[0] - c1[0]).hypot(c3[1] - c1[1]);
        let gap = (mid02[0] - mid13[0]).hypot(mid02[1] - mid13[1]);

        gap <= PARALLELOGRAM_REL_TOL * diag02.max(diag13)
    }
}

/// Forward-map the four pixel corners of a `img_w` by `img_h` image into map
/// space. Pure; re-run whenever the transform changes.
pub fn project_footprint(transform: &AffineTransform, img_w: f64, img_h: f64) -> FootprintPolygon {
    FootprintPolygon::new([
        transform.apply([0.0, 0.0]),
        transform.apply([img_w, 0.0]),
        transform.apply([img_w, img_h]),
        transform.apply([0.0, img_h]),
    ])
}

/// Reconstruct the transform from a user-edited footprint.
///
/// An affine transform sends the image rectangle only to a parallelogram, so
/// the polygon is gated on [`FootprintPolygon::is_parallelogram`] first.
/// On success the four pixel corners are paired with the polygon corners in
/// matching winding order and passed to the least-squares solver branch.
///
/// # Errors
///
/// [`TransformError::NonParallelogramEdit`] when the gate fails; the caller
/// must leave its current transform in place (and revert the displayed
/// polygon, see `GeorefSession::sync_from_polygon`). Degenerate polygons
/// (collapsed corners) surface the solver's errors.
pub fn transform_from_footprint(
    polygon: &FootprintPolygon,
    img_w: f64,
    img_h: f64,
) -> Result<AffineTransform, TransformError> {
    if !polygon.is_parallelogram() {
        return Err(TransformError::NonParallelogramEdit);
    }

    let pixel_corners = [[0.0, 0.0], [img_w, 0.0], [img_w, img_h], [0.0, img_h]];
    let gcps: Vec<Gcp> = pixel_corners
        .iter()
        .zip(polygon.corners())
        .enumerate()
        .map(|(i, (&pixel, &map))| Gcp::new(i as u64, pixel, map))
        .collect();

    solve_affine(&gcps)
}
