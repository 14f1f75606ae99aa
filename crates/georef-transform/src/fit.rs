use crate::affine::AffineTransform;
use crate::gcp::Gcp;

/// Whether a fit could be checked against spare correspondences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitStatus {
    /// Three or fewer correspondences: the fit is exact by construction and
    /// there are no residual degrees of freedom to verify it with.
    Unverifiable,
    /// Residuals were computed against spare correspondences.
    Verified,
}

/// Per-point fit error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Residual {
    /// Identifier of the contributing GCP.
    pub id: u64,
    /// Euclidean distance between predicted and observed map coordinates.
    pub error: f64,
    /// The observed map coordinate of the GCP.
    pub observed: [f64; 2],
    /// The map coordinate predicted by the transform.
    pub predicted: [f64; 2],
}

/// Fit quality report for a solved transform.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitReport {
    /// Whether residuals could be computed at all.
    pub status: FitStatus,
    /// Root-mean-square residual in map units, `None` when unverifiable.
    pub rmse: Option<f64>,
    /// Largest single residual in map units, `None` when unverifiable.
    pub max_error: Option<f64>,
    /// Per-point residuals, empty when unverifiable.
    pub residuals: Vec<Residual>,
}

/// Evaluate how well a transform reproduces its correspondences.
///
/// With three or fewer GCPs the report is [`FitStatus::Unverifiable`]: an
/// exact three-point fit has zero residual by construction, so an RMSE of
/// zero would say nothing about the model and must not be presented as
/// meaningful. Otherwise each GCP's pixel coordinate is mapped forward and
/// compared against its observed map coordinate.
pub fn evaluate_fit(gcps: &[Gcp], transform: &AffineTransform) -> FitReport {
    if gcps.len() <= 3 {
        return FitReport {
            status: FitStatus::Unverifiable,
            rmse: None,
            max_error: None,
            residuals: Vec::new(),
        };
    }

    let mut residuals = Vec::with_capacity(gcps.len());
    let mut sum_sq = 0.0f64;
    let mut max_error = 0.0f64;

    for gcp in gcps {
        let predicted = transform.apply(gcp.pixel);
        let error = (predicted[0] - gcp.map[0]).hypot(predicted[1] - gcp.map[1]);
        sum_sq += error * error;
        max_error = max_error.max(error);
        residuals.push(Residual {
            id: gcp.id,
            error,
            observed: gcp.map,
            predicted,
        });
    }

    FitReport {
        status: FitStatus::Verified,
        rmse: Some((sum_sq / gcps.len() as f64).sqrt()),
        max_error: Some(max_error),
        residuals,
    }
}
