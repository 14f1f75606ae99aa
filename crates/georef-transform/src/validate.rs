use thiserror::Error;

use crate::gcp::Gcp;
use crate::solve::solve_affine;

/// Two pixel coordinates closer than this are the same sample.
const DUPLICATE_PIXEL_DIST: f64 = 1.0;

/// Two map coordinates closer than this are the same sample.
const DUPLICATE_MAP_DIST: f64 = 0.01;

/// Twice-the-triangle-area threshold below which the first three pixel
/// coordinates count as collinear. Matches the solver's exact-branch
/// degeneracy, evaluated up front so validation can reject before a solve.
const COLLINEAR_AREA: f64 = 1.0;

/// Axis scale ratio above which the fit is suspiciously anisotropic.
const ANISOTROPY_RATIO: f64 = 10.0;

/// A hard validation failure; any of these blocks the correspondence set.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationIssue {
    /// Fewer correspondences than an affine solve needs.
    #[error("at least {required} ground control points are required, got {actual}")]
    TooFewPoints {
        /// Minimum number of correspondences required.
        required: usize,
        /// Actual number of correspondences provided.
        actual: usize,
    },

    /// Two GCPs sample (nearly) the same source pixel.
    #[error("gcp {first} and gcp {second} have duplicate pixel coordinates")]
    DuplicatePixel {
        /// Identifier of the first GCP of the pair.
        first: u64,
        /// Identifier of the second GCP of the pair.
        second: u64,
    },

    /// Two GCPs reference (nearly) the same map location.
    #[error("gcp {first} and gcp {second} have duplicate map coordinates")]
    DuplicateMap {
        /// Identifier of the first GCP of the pair.
        first: u64,
        /// Identifier of the second GCP of the pair.
        second: u64,
    },

    /// The first three pixel coordinates are (near-)collinear, so the exact
    /// solve would be degenerate.
    #[error("the first three gcps are collinear in pixel space")]
    CollinearPixels,
}

/// A non-blocking validation warning; callers may proceed after surfacing it.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationWarning {
    /// The fitted axis scales differ by more than [`ANISOTROPY_RATIO`],
    /// which usually means a mis-picked point rather than a real map.
    #[error("axis scales differ by a factor of {ratio:.1}; check the picked points")]
    AnisotropicScale {
        /// `max(sx, sy) / min(sx, sy)` of the trial fit.
        ratio: f64,
    },
}

/// Outcome of validating a correspondence set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    /// Hard failures; the set must not be applied while any are present.
    pub errors: Vec<ValidationIssue>,
    /// Non-blocking warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Whether the correspondence set may be applied. Warnings never block.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        )?;
        for e in &self.errors {
            write!(f, "; {e}")?;
        }
        for w in &self.warnings {
            write!(f, "; {w}")?;
        }
        Ok(())
    }
}

fn dist(p: [f64; 2], q: [f64; 2]) -> f64 {
    (p[0] - q[0]).hypot(p[1] - q[1])
}

/// Validate a correspondence set before it is applied.
///
/// Hard errors: fewer than three points, duplicate pixel samples (pairwise
/// distance below one pixel unit), duplicate map samples (below 0.01 map
/// units), and near-collinear first three pixel coordinates. Warning:
/// strongly anisotropic axis scales on a trial solve, which is allowed to
/// proceed but logged and reported for the caller to surface.
pub fn validate_gcps(gcps: &[Gcp]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if gcps.len() < 3 {
        errors.push(ValidationIssue::TooFewPoints {
            required: 3,
            actual: gcps.len(),
        });
    }

    for (i, first) in gcps.iter().enumerate() {
        for second in gcps.iter().skip(i + 1) {
            if dist(first.pixel, second.pixel) < DUPLICATE_PIXEL_DIST {
                errors.push(ValidationIssue::DuplicatePixel {
                    first: first.id,
                    second: second.id,
                });
            }
            if dist(first.map, second.map) < DUPLICATE_MAP_DIST {
                errors.push(ValidationIssue::DuplicateMap {
                    first: first.id,
                    second: second.id,
                });
            }
        }
    }

    if let [p1, p2, p3, ..] = gcps {
        let [u1, v1] = p1.pixel;
        let [u2, v2] = p2.pixel;
        let [u3, v3] = p3.pixel;
        let area2 = (u1 * (v2 - v3) + u2 * (v3 - v1) + u3 * (v1 - v2)).abs();
        if area2 < COLLINEAR_AREA {
            errors.push(ValidationIssue::CollinearPixels);
        }
    }

    // the anisotropy check needs a trial fit, which only makes sense once
    // the set is otherwise sound
    if errors.is_empty() {
        if let Ok(transform) = solve_affine(gcps) {
            let [sx, sy] = transform.scale();
            let ratio = sx.max(sy) / sx.min(sy);
            if ratio > ANISOTROPY_RATIO {
                log::warn!("anisotropic fit: sx={sx:.4} sy={sy:.4} ratio={ratio:.1}");
                warnings.push(ValidationWarning::AnisotropicScale { ratio });
            }
        }
    }

    ValidationReport { errors, warnings }
}
