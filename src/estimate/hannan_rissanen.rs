//! Hannan-Rissanen two-stage least-squares estimation of ARMA parameters.
//!
//! Stage one bootstraps an error series from a long autoregression fitted
//! with Yule-Walker. Stage two alternates least-squares fits of the ARMA
//! coefficients against the bootstrapped errors with error refreshes from
//! the fitted model, keeping the parameter vector that forecasts a held-out
//! tail of the series best.

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::estimate::yule_walker;
use crate::lag::LagSet;
use crate::linalg::{factorize, Matrix, Vector};
use crate::model::ModelParameters;
use crate::solver;

/// Estimate the AR and MA coefficients of `params` on a stationary
/// zero-mean series, holding out the trailing `forecast_length` points for
/// iterate selection.
pub fn estimate(
    data: &[f64],
    params: &mut ModelParameters,
    forecast_length: usize,
    config: &ForecastConfig,
) -> Result<()> {
    let total_length = data.len();
    let r = 1 + params.degree_ar().max(params.degree_ma());
    let length =
        total_length
            .checked_sub(forecast_length)
            .ok_or(ForecastError::InsufficientData {
                needed: 2 * r + forecast_length,
                got: total_length,
            })?;
    if length < 2 * r {
        return Err(ForecastError::InsufficientData {
            needed: 2 * r,
            got: length,
        });
    }
    if params.num_params() == 0 {
        return Err(ForecastError::InvalidParameter(
            "model has no AR or MA terms to estimate".into(),
        ));
    }
    if config.max_iterations == 0 {
        return Err(ForecastError::InvalidParameter(
            "estimation needs at least one iteration".into(),
        ));
    }
    let size = length - r;

    // Stage one: long AR(r) on the full series, then residuals as the
    // initial error estimates. The first r errors stay zero.
    let long_ar_coeffs = yule_walker::fit(data, r, config.max_condition_number)?;
    let mut long_ar = LagSet::dense(r).freeze(false);
    for (j, coeff) in long_ar_coeffs.iter().enumerate() {
        long_ar.set_coeff(j + 1, *coeff)?;
    }
    let mut errors = vec![0.0; length];
    for t in r..length {
        errors[t] = data[t] - long_ar.evaluate(data, t)?;
    }

    // Stage two: least squares against the current errors, then refresh the
    // errors from the fitted model. The holdout RMSE picks the winner; a
    // candidate only displaces the incumbent when strictly better.
    let mut best_rmse = -1.0_f64;
    let mut best_params: Option<Vector> = None;
    for _ in 0..config.max_iterations {
        let estimated = iteration_step(params, data, &errors, r, size, config)?;
        params.set_params_from_vector(&estimated)?;

        let forecasts = solver::forecast_arma(params, data, length, total_length)?;
        let rmse = solver::compute_rmse(data, &forecasts, length, 0, forecast_length)?;

        let train_forecasts = solver::forecast_arma(params, data, r, total_length)?;
        for j in 0..size {
            errors[j + r] = data[j + r] - train_forecasts[j];
        }

        if best_rmse < 0.0 || rmse < best_rmse {
            best_params = Some(estimated);
            best_rmse = rmse;
        }
    }
    let best = best_params.ok_or_else(|| {
        ForecastError::InvalidParameter("estimation produced no candidate parameters".into())
    })?;
    params.set_params_from_vector(&best)
}

/// One least-squares pass: stack lagged data per AR offset over lagged
/// errors per MA offset, then solve the normal equations under the bounded
/// pivot policy.
fn iteration_step(
    params: &ModelParameters,
    data: &[f64],
    errors: &[f64],
    r: usize,
    size: usize,
    config: &ForecastConfig,
) -> Result<Vector> {
    let mut design = Matrix::new(params.num_params(), size)?;
    let mut row = 0;
    for &offset in params.offsets_ar() {
        for k in 0..size {
            design.set(row, k, data[r - offset + k]);
        }
        row += 1;
    }
    for &offset in params.offsets_ma() {
        for k in 0..size {
            design.set(row, k, errors[r - offset + k]);
        }
        row += 1;
    }
    let target = Vector::new(data[r..r + size].to_vec())?;

    let zy = design.times_vector(&target)?;
    let zzt = design.aat();
    factorize(&zzt, Some(config.max_condition_number))?.solve(&zy)
}
