use std::sync::atomic::{AtomicU64, Ordering};

use georef_raster::{RasterSize, RgbaRaster};
use georef_transform::{
    evaluate_fit, project_footprint, solve_affine, transform_from_footprint, validate_gcps,
    AffineTransform, FitReport, FootprintPolygon, Gcp, TransformError, ValidationReport,
};
use georef_warp::{warp, InterpolationMode, MapExtent, WarpError, WarpOptions};

/// Errors raised by session-level operations.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// The correspondence set has hard validation errors and was not applied.
    #[error("correspondence validation failed: {0}")]
    ValidationFailed(ValidationReport),

    /// An estimation or footprint operation failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// A warp pass failed.
    #[error(transparent)]
    Warp(#[from] WarpError),
}

/// A completed warp pass, tagged with the session generation it was
/// submitted under. Compare with [`GeorefSession::is_current`] before
/// committing it to the display; a stale output must be discarded.
#[derive(Debug, Clone)]
pub struct WarpOutput {
    /// Session generation observed when the warp was submitted.
    pub generation: u64,
    /// The rendered RGBA viewport.
    pub raster: RgbaRaster,
}

/// The owning aggregate of one georeferenced image.
///
/// Holds the immutable source raster, the current forward transform, the
/// footprint polygon derived from it, and the correspondence set the
/// transform was estimated from. There is no ambient state: every operation
/// takes the session it works on.
///
/// Interactive edits outpace full-resolution warps, so the session carries a
/// monotonically increasing generation counter. Every mutation bumps it and
/// replaces the transform and footprint by whole-value swap; a warp output
/// tagged with an older generation is stale and must not be committed.
#[derive(Debug)]
pub struct GeorefSession {
    raster: RgbaRaster,
    transform: AffineTransform,
    footprint: FootprintPolygon,
    gcps: Vec<Gcp>,
    opacity: f32,
    generation: AtomicU64,
}

impl GeorefSession {
    /// Create a session from a decoded raster and its correspondences.
    ///
    /// Runs the validator first; hard errors refuse the set. Validation
    /// warnings (anisotropic scale) do not block and are left for the
    /// caller to surface via [`georef_transform::validate_gcps`].
    pub fn new(raster: RgbaRaster, gcps: Vec<Gcp>) -> Result<Self, SessionError> {
        let report = validate_gcps(&gcps);
        if !report.is_valid() {
            return Err(SessionError::ValidationFailed(report));
        }

        let transform = solve_affine(&gcps)?;
        let footprint =
            project_footprint(&transform, raster.width() as f64, raster.height() as f64);
        log::debug!(
            "session created: {} gcps, footprint {:?}",
            gcps.len(),
            footprint.corners()
        );

        Ok(Self {
            raster,
            transform,
            footprint,
            gcps,
            opacity: 1.0,
            generation: AtomicU64::new(0),
        })
    }

    /// The source raster.
    pub fn raster(&self) -> &RgbaRaster {
        &self.raster
    }

    /// The current forward transform (pixel to map).
    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    /// The current footprint polygon.
    pub fn footprint(&self) -> &FootprintPolygon {
        &self.footprint
    }

    /// The current correspondence set. Empty after [`Self::clear_gcps`].
    pub fn gcps(&self) -> &[Gcp] {
        &self.gcps
    }

    /// The render opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the render opacity; invalidates in-flight warps.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.bump();
    }

    /// The current generation counter value.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether a warp output is still current and may be committed.
    pub fn is_current(&self, output: &WarpOutput) -> bool {
        output.generation == self.generation()
    }

    /// Fit quality of the current transform against the stored GCPs.
    pub fn fit_report(&self) -> FitReport {
        evaluate_fit(&self.gcps, &self.transform)
    }

    /// Drop the correspondence set once it has been applied. The transform
    /// and footprint survive; subsequent fit reports are unverifiable.
    pub fn clear_gcps(&mut self) {
        self.gcps.clear();
    }

    /// Replace the correspondence set and re-estimate the transform.
    ///
    /// Validation and solve errors leave the session unchanged.
    pub fn refit(&mut self, gcps: Vec<Gcp>) -> Result<(), SessionError> {
        let report = validate_gcps(&gcps);
        if !report.is_valid() {
            return Err(SessionError::ValidationFailed(report));
        }

        let transform = solve_affine(&gcps)?;
        self.transform = transform;
        self.footprint = project_footprint(
            &transform,
            self.raster.width() as f64,
            self.raster.height() as f64,
        );
        self.gcps = gcps;
        self.bump();

        Ok(())
    }

    /// Re-derive the transform from a user-edited footprint polygon.
    ///
    /// An affine transform can only send the image rectangle to a
    /// parallelogram. Edits that fail that gate return
    /// [`TransformError::NonParallelogramEdit`] and leave the session
    /// completely unchanged, transform and stored footprint both; the
    /// caller must revert its displayed polygon to [`Self::footprint`] so
    /// the display never diverges from the warp.
    ///
    /// On success the transform is re-estimated from the four corner
    /// correspondences and the footprint is re-projected through it for
    /// consistency.
    pub fn sync_from_polygon(&mut self, polygon: &FootprintPolygon) -> Result<(), TransformError> {
        let (img_w, img_h) = (self.raster.width() as f64, self.raster.height() as f64);

        let transform = match transform_from_footprint(polygon, img_w, img_h) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("footprint edit rejected: {e}");
                return Err(e);
            }
        };

        self.transform = transform;
        self.footprint = project_footprint(&transform, img_w, img_h);
        self.bump();
        log::debug!("footprint synced: {:?}", self.footprint.corners());

        Ok(())
    }

    /// Warp the source raster into a viewport, tagged with the generation
    /// observed at submission.
    ///
    /// The source buffer is only read, so concurrent warps of the same
    /// session are safe. Cancellation is by staleness, not preemption: an
    /// edit that lands while a warp runs bumps the generation, and the
    /// finished output fails [`Self::is_current`].
    pub fn warp(
        &self,
        extent: &MapExtent,
        out_size: RasterSize,
        interpolation: InterpolationMode,
    ) -> Result<WarpOutput, WarpError> {
        let generation = self.generation();
        let options = WarpOptions {
            interpolation,
            opacity: self.opacity,
        };

        let raster = warp(
            &self.raster,
            &self.transform,
            &self.footprint,
            extent,
            out_size,
            &options,
        )?;

        Ok(WarpOutput { generation, raster })
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use georef_transform::FitStatus;

    fn checker_raster(width: usize, height: usize) -> RgbaRaster {
        let mut data = Vec::with_capacity(width * height * 4);
        for row in 0..height {
            for col in 0..width {
                let v = if (row + col) % 2 == 0 { 255 } else { 0 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        RgbaRaster::new(RasterSize { width, height }, data).unwrap()
    }

    fn corner_gcps() -> Vec<Gcp> {
        // 8x4 image onto a map box, y flipped
        vec![
            Gcp::new(0, [0.0, 0.0], [1000.0, 500.0]),
            Gcp::new(1, [8.0, 0.0], [1080.0, 500.0]),
            Gcp::new(2, [8.0, 4.0], [1080.0, 460.0]),
            Gcp::new(3, [0.0, 4.0], [1000.0, 460.0]),
        ]
    }

    fn session() -> GeorefSession {
        GeorefSession::new(checker_raster(8, 4), corner_gcps()).unwrap()
    }

    #[test]
    fn new_solves_and_projects() {
        let s = session();
        assert_eq!(s.generation(), 0);
        assert_eq!(
            s.footprint().corners(),
            &[
                [1000.0, 500.0],
                [1080.0, 500.0],
                [1080.0, 460.0],
                [1000.0, 460.0],
            ]
        );

        let report = s.fit_report();
        assert_eq!(report.status, FitStatus::Verified);
        assert_relative_eq!(report.rmse.unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn new_refuses_invalid_gcps() {
        let mut gcps = corner_gcps();
        gcps.truncate(2);
        let res = GeorefSession::new(checker_raster(8, 4), gcps);
        assert!(matches!(res, Err(SessionError::ValidationFailed(_))));
    }

    #[test]
    fn clear_gcps_keeps_transform() {
        let mut s = session();
        let before = *s.transform();
        s.clear_gcps();
        assert!(s.gcps().is_empty());
        assert_eq!(s.transform(), &before);
        assert_eq!(s.fit_report().status, FitStatus::Unverifiable);
    }

    #[test]
    fn translated_footprint_syncs() {
        let mut s = session();
        let moved = FootprintPolygon::new(s.footprint().corners().map(|c| [c[0] + 10.0, c[1] - 5.0]));

        s.sync_from_polygon(&moved).unwrap();
        assert_eq!(s.generation(), 1);
        for (got, want) in s.footprint().corners().iter().zip(moved.corners()) {
            assert_relative_eq!(got[0], want[0], epsilon = 1e-9);
            assert_relative_eq!(got[1], want[1], epsilon = 1e-9);
        }

        // the re-estimated transform maps the pixel corners onto the moved
        // polygon
        let mapped = s.transform().apply([0.0, 0.0]);
        assert_relative_eq!(mapped[0], 1010.0, epsilon = 1e-9);
        assert_relative_eq!(mapped[1], 495.0, epsilon = 1e-9);
    }

    #[test]
    fn non_parallelogram_edit_leaves_session_unchanged() {
        let mut s = session();
        let before_transform = *s.transform();
        let before_footprint = *s.footprint();

        let mut corners = *s.footprint().corners();
        corners[1] = [corners[1][0] + 7.0, corners[1][1] + 3.0];
        let res = s.sync_from_polygon(&FootprintPolygon::new(corners));

        assert_eq!(res, Err(TransformError::NonParallelogramEdit));
        assert_eq!(s.transform(), &before_transform);
        assert_eq!(s.footprint(), &before_footprint);
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn stale_warp_is_detected() {
        let mut s = session();
        let extent = MapExtent::new(1000.0, 460.0, 1080.0, 500.0);
        let out_size = RasterSize {
            width: 16,
            height: 8,
        };

        let output = s
            .warp(&extent, out_size, InterpolationMode::Bilinear)
            .unwrap();
        assert!(s.is_current(&output));

        // an edit lands while the output is in flight
        let moved = FootprintPolygon::new(s.footprint().corners().map(|c| [c[0] + 1.0, c[1]]));
        s.sync_from_polygon(&moved).unwrap();
        assert!(!s.is_current(&output));

        // a re-submitted warp under the new generation is current again
        let output = s
            .warp(&extent, out_size, InterpolationMode::Bilinear)
            .unwrap();
        assert!(s.is_current(&output));
    }

    #[test]
    fn opacity_change_invalidates_warps() {
        let mut s = session();
        let extent = MapExtent::new(1000.0, 460.0, 1080.0, 500.0);
        let out_size = RasterSize {
            width: 8,
            height: 4,
        };

        let output = s
            .warp(&extent, out_size, InterpolationMode::Nearest)
            .unwrap();
        s.set_opacity(0.25);
        assert!(!s.is_current(&output));
    }

    #[test]
    fn refit_replaces_the_estimate() {
        let mut s = session();
        let mut gcps = corner_gcps();
        // shift the whole map target box
        for gcp in gcps.iter_mut() {
            gcp.map[0] += 100.0;
        }

        s.refit(gcps).unwrap();
        assert_eq!(s.generation(), 1);
        let mapped = s.transform().apply([0.0, 0.0]);
        assert_relative_eq!(mapped[0], 1100.0, epsilon = 1e-9);
        assert_relative_eq!(mapped[1], 500.0, epsilon = 1e-9);
    }
}
