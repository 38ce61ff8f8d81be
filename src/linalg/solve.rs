//! Factorization and solve for symmetric positive definite systems.
//!
//! The normal equations assembled by the estimators are symmetric and, in
//! well-posed problems, positive definite. Near-singular systems still occur
//! on short or degenerate series, so the factorization optionally bounds the
//! condition number by clamping small pivots instead of failing outright.

use crate::error::{ForecastError, Result};
use crate::linalg::{Matrix, Vector};

/// The result of factorizing a symmetric matrix: a unit-diagonal factor `l`
/// stored symmetrically, the diagonal scale vector `d`, and a record of the
/// pivot signs seen during elimination.
///
/// A factorization is bound to the matrix and condition bound it was built
/// from. Solving under a different bound requires a fresh [`factorize`] call.
#[derive(Debug, Clone)]
pub struct SpdFactorization {
    d: Vec<f64>,
    l: Matrix,
    saw_positive: bool,
    saw_negative: bool,
    saw_zero: bool,
}

/// Factorize a symmetric matrix in one backward-marching pass.
///
/// Each reduced pivot `a[j][j] - sum(d[k] * l[j][k]^2)` is classified by
/// sign before regularization; a pivot that is NaN classifies as zero. With
/// `condition_bound = None` an exact zero pivot is an error. With a bound,
/// pivots are kept within `running_max / bound` of the largest pivot seen so
/// far: a zero first pivot becomes 1.0, a later zero becomes the clamp
/// magnitude, and a small nonzero pivot is clamped with its sign preserved.
pub fn factorize(a: &Matrix, condition_bound: Option<f64>) -> Result<SpdFactorization> {
    if a.rows() != a.cols() {
        return Err(ForecastError::DimensionMismatch {
            expected: a.rows(),
            got: a.cols(),
        });
    }
    let n = a.rows();
    let mut d = vec![0.0; n];
    let mut l = Matrix::new(n, n)?;
    let mut saw_positive = false;
    let mut saw_negative = false;
    let mut saw_zero = false;
    let mut current_max = -1.0_f64;
    for j in 0..n {
        let mut reduced = 0.0;
        for k in 0..j {
            reduced += d[k] * l.get(j, k) * l.get(j, k);
        }
        let mut diag = a.get(j, j) - reduced;
        let sign = if diag > 0.0 {
            1
        } else if diag < 0.0 {
            -1
        } else {
            0
        };
        match sign {
            1 => saw_positive = true,
            -1 => saw_negative = true,
            _ => saw_zero = true,
        }
        match condition_bound {
            None => {
                if sign == 0 {
                    return Err(ForecastError::SingularSystem { pivot: j });
                }
            }
            Some(bound) => {
                if current_max <= 0.0 {
                    if sign == 0 {
                        diag = 1.0;
                    }
                } else if sign == 0 {
                    diag = (current_max / bound).abs();
                } else if (diag * bound).abs() < current_max {
                    diag = sign as f64 * (current_max / bound).abs();
                }
            }
        }
        d[j] = diag;
        if diag.abs() > current_max {
            current_max = diag.abs();
        }
        l.set(j, j, 1.0);
        for i in j + 1..n {
            let mut sum = 0.0;
            for k in 0..j {
                sum += d[k] * l.get(j, k) * l.get(i, k);
            }
            let value = ((a.get(i, j) + a.get(j, i)) / 2.0 - sum) / d[j];
            l.set(j, i, value);
            l.set(i, j, value);
        }
    }
    Ok(SpdFactorization {
        d,
        l,
        saw_positive,
        saw_negative,
        saw_zero,
    })
}

impl SpdFactorization {
    /// Order of the factorized system.
    pub fn order(&self) -> usize {
        self.d.len()
    }

    /// Whether a positive reduced pivot was seen.
    pub fn saw_positive_pivot(&self) -> bool {
        self.saw_positive
    }

    /// Whether a negative reduced pivot was seen. A truly positive definite
    /// system never sets this.
    pub fn saw_negative_pivot(&self) -> bool {
        self.saw_negative
    }

    /// Whether an exactly-zero (or NaN) reduced pivot was seen, before any
    /// regularization replaced it.
    pub fn saw_zero_pivot(&self) -> bool {
        self.saw_zero
    }

    /// Solve `A x = b` for the matrix this factorization was built from,
    /// by forward substitution through `l` and back substitution through
    /// `d` and `l` transposed.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        let n = self.order();
        if b.len() != n {
            return Err(ForecastError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += self.l.get(i, j) * y[j];
            }
            y[i] = b[i] - sum;
        }
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in i + 1..n {
                sum += self.l.get(i, j) * x[j];
            }
            x[i] = y[i] / self.d[i] - sum;
        }
        Vector::new(x)
    }
}
