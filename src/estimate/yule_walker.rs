//! Yule-Walker estimation of a pure AR model.

use crate::error::{ForecastError, Result};
use crate::linalg::{factorize, Matrix, Vector};

/// Fit AR(`order`) coefficients to a zero-mean series by solving the
/// Yule-Walker equations: a Toeplitz system over the empirical
/// autocovariances, each normalized by the full series length. Index `i` of
/// the returned vector is the coefficient of lag `i + 1`.
///
/// The system is solved under the bounded pivot policy, so near-singular
/// autocovariance structure degrades gracefully instead of failing.
pub fn fit(data: &[f64], order: usize, max_condition_number: f64) -> Result<Vec<f64>> {
    let length = data.len();
    if length == 0 || order < 1 {
        return Err(ForecastError::InvalidParameter(format!(
            "Yule-Walker needs a non-empty series and a positive order, got length {length} and order {order}"
        )));
    }

    let mut r = vec![0.0; order + 1];
    for x in data {
        r[0] += x * x;
    }
    r[0] /= length as f64;
    for j in 1..=order {
        for i in 0..length.saturating_sub(j) {
            r[j] += data[i] * data[i + j];
        }
        r[j] /= length as f64;
    }

    let toeplitz = Matrix::toeplitz(&r[..order])?;
    let rhs = Vector::new(r[1..=order].to_vec())?;
    let solution = factorize(&toeplitz, Some(max_condition_number))?.solve(&rhs)?;
    Ok(solution.into_vec())
}
