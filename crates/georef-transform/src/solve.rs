use crate::affine::{AffineTransform, DET_EPSILON};
use crate::error::TransformError;
use crate::gcp::Gcp;

/// Solve `A * x = b` for a 3x3 system by Cramer's rule.
///
/// Returns `None` when `|det(A)|` is below [`DET_EPSILON`]. This routine is
/// the single source of truth for the determinant arithmetic of both the
/// exact and the least-squares solver branch.
pub(crate) fn solve_linear_3x3(a: &[[f64; 3]; 3], b: &[f64; 3]) -> Option<[f64; 3]> {
    let det = det_3x3(a);
    if det.abs() < DET_EPSILON {
        return None;
    }

    // substitute b into each column in turn
    let mut x = [0.0f64; 3];
    for (col, out) in x.iter_mut().enumerate() {
        let mut m = *a;
        for (row, &rhs) in b.iter().enumerate() {
            m[row][col] = rhs;
        }
        *out = det_3x3(&m) / det;
    }

    Some(x)
}

fn det_3x3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Estimate the forward affine transform (pixel to map) from GCPs.
///
/// With exactly three correspondences the two 3x3 systems with rows
/// `[u, v, 1]` are solved directly, one per map axis. With four or more the
/// normal equations `A^T A * p = A^T b` are accumulated by summation and
/// solved the same way, which is the ordinary least-squares fit minimizing
/// total squared map-space residual.
///
/// # Errors
///
/// * [`TransformError::InsufficientPoints`] for fewer than three GCPs.
/// * [`TransformError::DegenerateGeometry`] when the pixel coordinates are
///   collinear or duplicated and the solve matrix is singular.
/// * [`TransformError::NonInvertible`] when the solved transform collapses
///   the map plane (e.g. all map coordinates collinear).
pub fn solve_affine(gcps: &[Gcp]) -> Result<AffineTransform, TransformError> {
    if gcps.len() < 3 {
        return Err(TransformError::InsufficientPoints {
            required: 3,
            actual: gcps.len(),
        });
    }

    let (coeffs, bx, by) = if gcps.len() == 3 {
        let mut coeffs = [[0.0f64; 3]; 3];
        let mut bx = [0.0f64; 3];
        let mut by = [0.0f64; 3];
        for (row, gcp) in gcps.iter().enumerate() {
            coeffs[row] = [gcp.pixel[0], gcp.pixel[1], 1.0];
            bx[row] = gcp.map[0];
            by[row] = gcp.map[1];
        }
        (coeffs, bx, by)
    } else {
        // accumulate A^T A and the two right-hand sides over all points
        let mut ata = [[0.0f64; 3]; 3];
        let mut bx = [0.0f64; 3];
        let mut by = [0.0f64; 3];
        for gcp in gcps {
            let row = [gcp.pixel[0], gcp.pixel[1], 1.0];
            for i in 0..3 {
                for j in 0..3 {
                    ata[i][j] += row[i] * row[j];
                }
                bx[i] += row[i] * gcp.map[0];
                by[i] += row[i] * gcp.map[1];
            }
        }
        (ata, bx, by)
    };

    let px = solve_linear_3x3(&coeffs, &bx).ok_or(TransformError::DegenerateGeometry)?;
    let py = solve_linear_3x3(&coeffs, &by).ok_or(TransformError::DegenerateGeometry)?;

    let transform = AffineTransform::new([px[0], px[1], px[2], py[0], py[1], py[2]])?;
    log::debug!(
        "solved affine from {} gcps: params={:?} det={:.6e}",
        gcps.len(),
        transform.params(),
        transform.determinant()
    );

    Ok(transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_too_few_points() {
        let gcps = vec![
            Gcp::new(0, [0.0, 0.0], [0.0, 0.0]),
            Gcp::new(1, [1.0, 0.0], [1.0, 0.0]),
        ];
        assert_eq!(
            solve_affine(&gcps),
            Err(TransformError::InsufficientPoints {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn rejects_collinear_pixels() {
        let gcps = vec![
            Gcp::new(0, [0.0, 0.0], [0.0, 0.0]),
            Gcp::new(1, [1.0, 1.0], [10.0, 0.0]),
            Gcp::new(2, [2.0, 2.0], [0.0, 10.0]),
        ];
        assert_eq!(solve_affine(&gcps), Err(TransformError::DegenerateGeometry));
    }

    #[test]
    fn exact_fit_reproduces_all_points() -> Result<(), TransformError> {
        let gcps = vec![
            Gcp::new(0, [3.0, 7.0], [52.0, -11.0]),
            Gcp::new(1, [90.0, 12.0], [410.5, 3.25]),
            Gcp::new(2, [15.0, 80.0], [97.0, -310.0]),
        ];

        let t = solve_affine(&gcps)?;
        for gcp in &gcps {
            let predicted = t.apply(gcp.pixel);
            assert_relative_eq!(predicted[0], gcp.map[0], epsilon = 1e-8);
            assert_relative_eq!(predicted[1], gcp.map[1], epsilon = 1e-8);
        }

        Ok(())
    }

    #[test]
    fn scale_and_flip_scenario() -> Result<(), TransformError> {
        // pixel y grows downward, map y grows upward
        let gcps = vec![
            Gcp::new(0, [0.0, 0.0], [100.0, 100.0]),
            Gcp::new(1, [10.0, 0.0], [110.0, 100.0]),
            Gcp::new(2, [0.0, 10.0], [100.0, 90.0]),
        ];

        let t = solve_affine(&gcps)?;
        let [a, b, _, c, d, _] = *t.params();
        assert_relative_eq!(a, 1.0, epsilon = 1e-9);
        assert_relative_eq!(b, 0.0, epsilon = 1e-9);
        assert_relative_eq!(c, 0.0, epsilon = 1e-9);
        assert_relative_eq!(d, -1.0, epsilon = 1e-9);

        let mapped = t.apply([10.0, 10.0]);
        assert_relative_eq!(mapped[0], 110.0, epsilon = 1e-9);
        assert_relative_eq!(mapped[1], 90.0, epsilon = 1e-9);

        Ok(())
    }

    #[test]
    fn least_squares_recovers_exact_affine() -> Result<(), TransformError> {
        // five consistent points: the normal equations must reproduce the
        // generating transform
        let truth = AffineTransform::new([1.5, -0.3, 200.0, 0.2, -1.1, 50.0])?;
        let pixels = [
            [0.0, 0.0],
            [100.0, 0.0],
            [100.0, 60.0],
            [0.0, 60.0],
            [37.0, 22.0],
        ];
        let gcps: Vec<Gcp> = pixels
            .iter()
            .enumerate()
            .map(|(i, &p)| Gcp::new(i as u64, p, truth.apply(p)))
            .collect();

        let t = solve_affine(&gcps)?;
        for (got, want) in t.params().iter().zip(truth.params()) {
            assert_relative_eq!(got, want, epsilon = 1e-7);
        }

        Ok(())
    }

    #[test]
    fn solve_linear_3x3_known_system() {
        let a = [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]];
        let b = [2.0, 6.0, 12.0];
        let x = solve_linear_3x3(&a, &b).unwrap();
        assert_relative_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 2.0);
        assert_relative_eq!(x[2], 3.0);
    }

    #[test]
    fn solve_linear_3x3_singular() {
        let a = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 0.0]];
        assert!(solve_linear_3x3(&a, &[1.0, 2.0, 3.0]).is_none());
    }
}
