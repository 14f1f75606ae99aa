use crate::error::TransformError;

/// Epsilon below which a determinant is treated as zero.
///
/// Shared by the constructor invariant, the inverter and the linear solver so
/// there is a single notion of "singular" across the crate.
pub const DET_EPSILON: f64 = 1e-12;

/// A 2-D affine transform from pixel space to map space.
///
/// Six scalars `(a, b, tx, c, d, ty)` stored flat in row-major 2x3 order
/// `[a, b, tx, c, d, ty]`, defining
///
/// ```text
/// map_x = a * u + b * v + tx
/// map_y = c * u + d * v + ty
/// ```
///
/// The constructor rejects parameters whose determinant `a * d - b * c` is
/// within [`DET_EPSILON`] of zero, so every constructed value is invertible.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform {
    params: [f64; 6],
}

impl AffineTransform {
    /// Create a transform from flat parameters `[a, b, tx, c, d, ty]`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] when `|a * d - b * c|` is
    /// below [`DET_EPSILON`].
    ///
    /// # Examples
    ///
    /// ```
    /// use georef_transform::AffineTransform;
    ///
    /// let t = AffineTransform::new([2.0, 0.0, 10.0, 0.0, -2.0, 50.0]).unwrap();
    /// assert_eq!(t.apply([1.0, 1.0]), [12.0, 48.0]);
    ///
    /// assert!(AffineTransform::new([1.0, 2.0, 0.0, 2.0, 4.0, 0.0]).is_err());
    /// ```
    pub fn new(params: [f64; 6]) -> Result<Self, TransformError> {
        let det = params[0] * params[4] - params[1] * params[3];
        if det.abs() < DET_EPSILON {
            return Err(TransformError::NonInvertible);
        }
        Ok(Self { params })
    }

    /// The flat parameters `[a, b, tx, c, d, ty]`.
    pub fn params(&self) -> &[f64; 6] {
        &self.params
    }

    /// The determinant of the linear part, `a * d - b * c`.
    pub fn determinant(&self) -> f64 {
        self.params[0] * self.params[4] - self.params[1] * self.params[3]
    }

    /// Apply the transform to a pixel coordinate, producing a map coordinate.
    pub fn apply(&self, point: [f64; 2]) -> [f64; 2] {
        let [a, b, tx, c, d, ty] = self.params;
        [
            a * point[0] + b * point[1] + tx,
            c * point[0] + d * point[1] + ty,
        ]
    }

    /// Compute the inverse transform (map space to pixel space).
    ///
    /// The linear part is inverted algebraically and the translation follows
    /// as `-inv * (tx, ty)`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] when the determinant is
    /// below [`DET_EPSILON`]. Unreachable for values built through
    /// [`AffineTransform::new`], but kept so the inverse is safe on its own.
    pub fn invert(&self) -> Result<Self, TransformError> {
        let [a, b, tx, c, d, ty] = self.params;

        let det = a * d - b * c;
        if det.abs() < DET_EPSILON {
            return Err(TransformError::NonInvertible);
        }

        let inv_a = d / det;
        let inv_b = -b / det;
        let inv_c = -c / det;
        let inv_d = a / det;
        let inv_tx = -(inv_a * tx + inv_b * ty);
        let inv_ty = -(inv_c * tx + inv_d * ty);

        Ok(Self {
            params: [inv_a, inv_b, inv_tx, inv_c, inv_d, inv_ty],
        })
    }

    /// Per-axis scale factors `[sx, sy]` of the linear part,
    /// `sx = sqrt(a^2 + c^2)` and `sy = sqrt(b^2 + d^2)`.
    pub fn scale(&self) -> [f64; 2] {
        let [a, b, _, c, d, _] = self.params;
        [a.hypot(c), b.hypot(d)]
    }
}
