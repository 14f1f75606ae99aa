use crate::affine::AffineTransform;

/// Shear discrepancy above this fraction of `sx + sy` sets the shear flag.
const SHEAR_TOLERANCE: f64 = 0.01;

/// Center/scale/rotation view of an affine transform.
///
/// This is a lossy export kept for consumers that require the legacy
/// parameterization: a general affine transform carries shear that
/// center/scale/rotation cannot represent. When the reconstruction from
/// scale and rotation alone deviates from the actual matrix,
/// `shear_detected` is set and the caller must treat the values as an
/// approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decomposition {
    /// Map coordinate of the image's pixel center.
    pub center: [f64; 2],
    /// Per-axis scale factors `[sx, sy]`.
    pub scale: [f64; 2],
    /// Rotation angle `atan2(c, a)` in radians. Positive when the image's
    /// +u axis rotates toward map +y, i.e. counter-clockwise in a y-up map
    /// plane.
    pub rotation_rad: f64,
    /// True when the matrix carries shear the decomposition cannot express.
    pub shear_detected: bool,
}

/// Decompose a transform into center, scale and rotation for an image of
/// `img_w` by `img_h` pixels.
///
/// The shear check rebuilds the `b` and `d` entries from scale and rotation
/// only and compares them against the actual matrix; a discrepancy above 1%
/// of `sx + sy` sets [`Decomposition::shear_detected`].
pub fn decompose(transform: &AffineTransform, img_w: f64, img_h: f64) -> Decomposition {
    let [a, b, _, c, d, _] = *transform.params();

    let center = transform.apply([img_w / 2.0, img_h / 2.0]);
    let [sx, sy] = transform.scale();
    let rotation_rad = c.atan2(a);

    // b and d as a pure scale+rotation would produce them; the sign of sy
    // follows the determinant so a y-flip is not misread as shear
    let sy_signed = if transform.determinant() < 0.0 { -sy } else { sy };
    let b_pred = -sy_signed * rotation_rad.sin();
    let d_pred = sy_signed * rotation_rad.cos();
    let discrepancy = (b - b_pred).abs() + (d - d_pred).abs();
    let shear_detected = discrepancy > SHEAR_TOLERANCE * (sx + sy);

    Decomposition {
        center,
        scale: [sx, sy],
        rotation_rad,
        shear_detected,
    }
}
