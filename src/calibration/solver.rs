//! Least squares through the normal equations.
//!
//! The systems solved here are tiny (one unknown per basis term), so the
//! normal matrix is formed explicitly and reduced by Gaussian elimination
//! with partial pivoting. Columns whose pivot vanishes are left out of the
//! solve and their coefficient is pinned to zero instead of failing the
//! whole fit.

use crate::{constants::PIVOT_EPSILON, Error, Result};
use nalgebra::{SMatrix, SVector};

/// Solve `min ||X c - y||` for `c` given the rows of `X` paired with `y`.
///
/// # Errors
///
/// Returns `Error::SingularSystem` if the normal equations or the solution
/// contain non-finite values.
pub fn least_squares<const D: usize, I>(rows: I) -> Result<SVector<f64, D>>
where
    I: IntoIterator<Item = (SVector<f64, D>, f64)>,
{
    let mut xtx = SMatrix::<f64, D, D>::zeros();
    let mut xty = SVector::<f64, D>::zeros();

    for (x, y) in rows {
        xtx += x * x.transpose();
        xty += x * y;
    }

    if !xtx.iter().chain(xty.iter()).all(|v| v.is_finite()) {
        return Err(Error::SingularSystem(
            "normal equations contain non-finite values".to_string(),
        ));
    }

    gauss_elimination(xtx, xty)
}

/// Solve `A x = b` by Gaussian elimination with partial pivoting.
///
/// At step `i` the row with the largest `|A[k][i]|` (k >= i) is swapped
/// into place. If the pivot is still below `PIVOT_EPSILON` the column is
/// skipped and back substitution sets `x[i] = 0`.
///
/// # Errors
///
/// Returns `Error::SingularSystem` if the result is not finite.
pub fn gauss_elimination<const D: usize>(
    mut a: SMatrix<f64, D, D>,
    mut b: SVector<f64, D>,
) -> Result<SVector<f64, D>> {
    for i in 0..D {
        let max_row = (i + 1..D).fold(i, |best, k| {
            if a[(k, i)].abs() > a[(best, i)].abs() {
                k
            } else {
                best
            }
        });
        if max_row != i {
            a.swap_rows(i, max_row);
            b.swap_rows(i, max_row);
        }

        if a[(i, i)].abs() < PIVOT_EPSILON {
            continue;
        }

        for k in i + 1..D {
            let factor = a[(k, i)] / a[(i, i)];
            for j in i..D {
                a[(k, j)] -= factor * a[(i, j)];
            }
            b[k] -= factor * b[i];
        }
    }

    let mut x = SVector::<f64, D>::zeros();
    for i in (0..D).rev() {
        if a[(i, i)].abs() < PIVOT_EPSILON {
            x[i] = 0.0;
            continue;
        }

        let mut acc = b[i];
        for j in i + 1..D {
            acc -= a[(i, j)] * x[j];
        }
        x[i] = acc / a[(i, i)];
    }

    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(Error::SingularSystem(format!("solution is not finite: {:?}", x.as_slice())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix3, Vector2, Vector3};

    #[test]
    fn test_solve_requires_pivoting() {
        // Zero in the top-left corner: fails without a row swap.
        let a = Matrix3::new(0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0);
        let expected = Vector3::new(1.0, -2.0, 3.0);
        let b = a * expected;

        let x = gauss_elimination(a, b).unwrap();
        assert!((x - expected).norm() < 1e-12);
    }

    #[test]
    fn test_singular_column_is_zeroed() {
        // Second unknown never appears in the system.
        let a = Matrix3::new(2.0, 0.0, 1.0, 1.0, 0.0, 3.0, 0.0, 0.0, 0.0);
        let b = Vector3::new(3.0, 4.0, 0.0);

        let x = gauss_elimination(a, b).unwrap();
        assert_eq!(x[1], 0.0);
        assert!((2.0 * x[0] + x[2] - 3.0).abs() < 1e-12);
        assert!((x[0] + 3.0 * x[2] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_system() {
        let x = gauss_elimination(Matrix3::zeros(), Vector3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(x, Vector3::zeros());
    }

    #[test]
    fn test_non_finite_system_fails() {
        let a = Matrix3::new(f64::NAN, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let result = gauss_elimination(a, Vector3::new(1.0, 1.0, 1.0));
        assert!(matches!(result, Err(Error::SingularSystem(_))));
    }

    #[test]
    fn test_least_squares_line_fit() {
        // y = 3x + 1 sampled exactly
        let rows = (0..5).map(|i| {
            let x = f64::from(i);
            (Vector2::new(x, 1.0), 3.0 * x + 1.0)
        });
        let c = least_squares(rows).unwrap();
        assert!((c[0] - 3.0).abs() < 1e-10);
        assert!((c[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_least_squares_averages_noise() {
        // Constant model fitted to symmetric noise recovers the mean.
        let rows = [9.0, 11.0, 10.5, 9.5].into_iter().map(|y| (SVector::<f64, 1>::new(1.0), y));
        let c = least_squares(rows).unwrap();
        assert!((c[0] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_least_squares_rejects_infinite_rows() {
        let rows = [(Vector2::new(f64::INFINITY, 1.0), 1.0)];
        assert!(least_squares(rows).is_err());
    }
}
