//! Fit and forecast pipeline.
//!
//! Every run walks the same stages in order: difference the training
//! window, center it, estimate or forecast on the stationary series,
//! un-center, and integrate back to the original levels. The stationary
//! ARMA recursion itself lives in [`forecast_arma`]; the surrounding
//! stages own all differencing and centering state.

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::estimate::hannan_rissanen;
use crate::forecast::ForecastResult;
use crate::model::{FittedModel, ModelOrder, ModelParameters};
use crate::stats;

/// Run the ARMA recursion over a stationary series: reconstruct in-sample
/// one-step errors up to `start_index`, then forecast through `end_index`
/// feeding each forecast back into the history with a zero error.
pub fn forecast_arma(
    params: &ModelParameters,
    stationary: &[f64],
    start_index: usize,
    end_index: usize,
) -> Result<Vec<f64>> {
    if end_index < start_index {
        return Err(ForecastError::InvalidParameter(format!(
            "forecast window start {start_index} is past its end {end_index}"
        )));
    }
    if stationary.len() < start_index {
        return Err(ForecastError::InsufficientData {
            needed: start_index,
            got: stationary.len(),
        });
    }
    let train_len = start_index;
    let total_len = end_index;
    let mut data = vec![0.0; total_len];
    data[..train_len].copy_from_slice(&stationary[..train_len]);
    let mut errors = vec![0.0; total_len];
    let mut forecasts = vec![0.0; total_len - train_len];

    // Errors before the largest lag stay zero; there is no full history to
    // evaluate either polynomial against yet.
    let warmup = params.degree_ar().max(params.degree_ma());
    for j in warmup..train_len {
        let forecast = params.forecast_one_point_arma(&data, &errors, j)?;
        errors[j] = data[j] - forecast;
    }
    for j in train_len..total_len {
        let forecast = params.forecast_one_point_arma(&data, &errors, j)?;
        data[j] = forecast;
        errors[j] = 0.0;
        forecasts[j - train_len] = forecast;
    }
    Ok(forecasts)
}

/// Estimate a model on `data[..forecast_start]`, holding out
/// `forecast_end - forecast_start` stationary points for iterate selection,
/// and bind the result to the full series.
pub fn estimate(
    data: &[f64],
    order: ModelOrder,
    forecast_start: usize,
    forecast_end: usize,
    config: &ForecastConfig,
) -> Result<FittedModel> {
    check_data_length(order, data, forecast_start, forecast_end)?;
    let forecast_length = forecast_end - forecast_start;
    let mut params = ModelParameters::new(order);
    let mut stationary = difference_training(&mut params, &data[..forecast_start])?;
    let mean = stats::mean(&stationary);
    stats::shift(&mut stationary, -mean);
    hannan_rissanen::estimate(&stationary, &mut params, forecast_length, config)?;
    Ok(FittedModel::new(params, data.to_vec(), forecast_start))
}

/// Forecast `[forecast_start, forecast_end)` from fitted parameters,
/// differencing and centering the training window, running the ARMA
/// recursion past its end, then integrating back to the original levels.
pub fn forecast(
    params: &mut ModelParameters,
    data: &[f64],
    forecast_start: usize,
    forecast_end: usize,
) -> Result<ForecastResult> {
    check_data_length(params.order(), data, forecast_start, forecast_end)?;
    let forecast_length = forecast_end - forecast_start;
    let mut stationary = difference_training(params, &data[..forecast_start])?;
    let mean = stats::mean(&stationary);
    stats::shift(&mut stationary, -mean);
    let data_variance = stats::variance(&stationary);

    let train_len = stationary.len();
    let forecast_stationary =
        forecast_arma(params, &stationary, train_len, train_len + forecast_length)?;
    let mut merged = stationary;
    merged.extend_from_slice(&forecast_stationary);
    stats::shift(&mut merged, mean);

    let rebuilt = integrate_forecast(params, &merged)?;
    let forecast = rebuilt[forecast_start..forecast_end].to_vec();
    Ok(ForecastResult::new(forecast, data_variance))
}

/// Validation RMSE over a holdout tail: refit on the remaining prefix,
/// forecast the tail, and compare against the observed values.
pub fn validation_rmse(data: &[f64], order: ModelOrder, config: &ForecastConfig) -> Result<f64> {
    let holdout = (data.len() as f64 * config.holdout_fraction) as usize;
    let train_end = data.len().checked_sub(holdout).ok_or_else(|| {
        ForecastError::InvalidParameter(format!(
            "holdout fraction {} exceeds the series length",
            config.holdout_fraction
        ))
    })?;
    let mut model = estimate(data, order, train_end, data.len(), config)?;
    let result = model.forecast(holdout)?;
    compute_rmse(data, result.forecast(), train_end, 0, result.forecast().len())
}

/// Root mean squared error between `left[start + left_offset ..]` and
/// `right[start..end]`.
pub fn compute_rmse(
    left: &[f64],
    right: &[f64],
    left_offset: usize,
    start: usize,
    end: usize,
) -> Result<f64> {
    if start >= end || right.len() < end || left.len() < end + left_offset {
        return Err(ForecastError::InvalidParameter(format!(
            "invalid RMSE window [{start}, {end}) over {} values offset by {left_offset} against {} values",
            left.len(),
            right.len()
        )));
    }
    let mut square_sum = 0.0;
    for i in start..end {
        let error = left[i + left_offset] - right[i];
        square_sum += error * error;
    }
    Ok((square_sum / (end - start) as f64).sqrt())
}

/// Convert ARMA coefficients to the psi weights of the equivalent pure MA
/// representation, returned with a leading 1: `[1, psi_1, ..., psi_{lag_max-1}]`.
/// The inputs are dense coefficient vectors indexed by lag.
pub fn arma_to_ma(ar: &[f64], ma: &[f64], lag_max: usize) -> Vec<f64> {
    if lag_max == 0 {
        return Vec::new();
    }
    let p = ar.len();
    let q = ma.len();
    let mut psi = vec![0.0; lag_max];
    for i in 0..lag_max {
        let mut value = if i < q { ma[i] } else { 0.0 };
        for j in 0..(i + 1).min(p) {
            value += ar[j] * if i >= j + 1 { psi[i - j - 1] } else { 1.0 };
        }
        psi[i] = value;
    }
    let mut with_leading_one = vec![0.0; lag_max];
    with_leading_one[0] = 1.0;
    for i in 1..lag_max {
        with_leading_one[i] = psi[i - 1];
    }
    with_leading_one
}

/// Square roots of the running sums of squared coefficients. Step `i` of a
/// forecast interval scales with the accumulated psi-weight mass up to `i`.
pub fn cumulative_coeff_sums(coeffs: &[f64]) -> Vec<f64> {
    let mut sums = Vec::with_capacity(coeffs.len());
    let mut cumulative = 0.0;
    for coeff in coeffs {
        cumulative += coeff * coeff;
        sums.push(cumulative.sqrt());
    }
    sums
}

/// Widen a result's confidence bounds from the fitted coefficients: psi
/// weights over the forecast horizon, cumulative sums, then the interval at
/// the configured z-score. Stores the resulting max normalized variance on
/// the result.
pub fn apply_confidence_interval(
    params: &ModelParameters,
    result: &mut ForecastResult,
    config: &ForecastConfig,
) -> Result<()> {
    let horizon = result.forecast().len();
    let psi = arma_to_ma(
        &params.ar_dense_coefficients(),
        &params.ma_dense_coefficients(),
        horizon,
    );
    let sums = cumulative_coeff_sums(&psi);
    let max_normalized_variance = result.set_confidence_interval(config.confidence_z, &sums)?;
    result.set_max_normalized_variance(max_normalized_variance);
    Ok(())
}

/// The training window must cover the initial conditions of every
/// differencing level, and the forecast window must be non-empty and start
/// inside the series.
fn check_data_length(
    order: ModelOrder,
    data: &[f64],
    forecast_start: usize,
    forecast_end: usize,
) -> Result<()> {
    let needed = order.initial_condition_len();
    if data.len() < needed || forecast_start < needed || forecast_end <= forecast_start {
        return Err(ForecastError::InsufficientData {
            needed,
            got: data.len(),
        });
    }
    if forecast_start > data.len() {
        return Err(ForecastError::InsufficientData {
            needed: forecast_start,
            got: data.len(),
        });
    }
    Ok(())
}

/// Seasonal differencing first, then non-seasonal, returning the stationary
/// series. Initial windows stay captured in `params` for integration.
fn difference_training(params: &mut ModelParameters, train: &[f64]) -> Result<Vec<f64>> {
    let order = params.order();
    let has_seasonal = order.has_seasonal_differencing();
    let has_non_seasonal = order.d > 0;
    if has_seasonal {
        params.difference_seasonal(train)?;
        if has_non_seasonal {
            let seasonal = params.differenced_seasonal()?.to_vec();
            params.difference_non_seasonal(&seasonal)?;
            Ok(params.differenced_non_seasonal()?.to_vec())
        } else {
            Ok(params.differenced_seasonal()?.to_vec())
        }
    } else if has_non_seasonal {
        params.difference_non_seasonal(train)?;
        Ok(params.differenced_non_seasonal()?.to_vec())
    } else {
        Ok(train.to_vec())
    }
}

/// Integration inverts differencing stage by stage: non-seasonal levels
/// first, then seasonal, each stage replaying its levels in reverse
/// capture order.
fn integrate_forecast(params: &mut ModelParameters, series: &[f64]) -> Result<Vec<f64>> {
    let order = params.order();
    let has_seasonal = order.has_seasonal_differencing();
    let has_non_seasonal = order.d > 0;
    if has_non_seasonal {
        params.integrate_non_seasonal(series)?;
        if has_seasonal {
            let rebuilt = params.integrated_non_seasonal()?.to_vec();
            params.integrate_seasonal(&rebuilt)?;
            Ok(params.integrated_seasonal()?.to_vec())
        } else {
            Ok(params.integrated_non_seasonal()?.to_vec())
        }
    } else if has_seasonal {
        params.integrate_seasonal(series)?;
        Ok(params.integrated_seasonal()?.to_vec())
    } else {
        Ok(series.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Vector;
    use approx::assert_relative_eq;

    fn ar_one(coeff: f64) -> ModelParameters {
        let mut params = ModelParameters::new(ModelOrder::new(1, 0, 0, 0, 0, 0, 0));
        params
            .set_params_from_vector(&Vector::new(vec![coeff]).unwrap())
            .unwrap();
        params
    }

    #[test]
    fn ar_recursion_feeds_forecasts_back_into_history() {
        let params = ar_one(0.5);
        let stationary = [1.0, 0.5, 0.25, 0.125];
        let forecasts = forecast_arma(&params, &stationary, 4, 6).unwrap();
        assert_relative_eq!(forecasts[0], 0.0625);
        assert_relative_eq!(forecasts[1], 0.03125);
    }

    #[test]
    fn ma_recursion_tracks_in_sample_errors() {
        let mut params = ModelParameters::new(ModelOrder::new(0, 0, 1, 0, 0, 0, 0));
        params
            .set_params_from_vector(&Vector::new(vec![0.5]).unwrap())
            .unwrap();
        // In-sample error at index 1 is 2.0, so the first forecast beyond
        // the window is 0.5 * 2.0; past that the errors are zero.
        let stationary = [0.0, 2.0];
        let forecasts = forecast_arma(&params, &stationary, 2, 4).unwrap();
        assert_relative_eq!(forecasts[0], 1.0);
        assert_relative_eq!(forecasts[1], 0.0);
    }

    #[test]
    fn forecast_window_must_follow_the_training_window() {
        let params = ar_one(0.5);
        assert!(matches!(
            forecast_arma(&params, &[1.0, 2.0], 3, 2),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(matches!(
            forecast_arma(&params, &[1.0, 2.0], 5, 6),
            Err(ForecastError::InsufficientData { needed: 5, got: 2 })
        ));
    }

    #[test]
    fn rmse_window_is_checked_and_computed() {
        let left = [0.0, 0.0, 1.0, 2.0, 3.0];
        let right = [1.0, 2.0, 2.0];
        let rmse = compute_rmse(&left, &right, 2, 0, 3).unwrap();
        assert_relative_eq!(rmse, (1.0_f64 / 3.0).sqrt());

        assert!(matches!(
            compute_rmse(&left, &right, 2, 3, 3),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(matches!(
            compute_rmse(&left, &right, 2, 0, 4),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(matches!(
            compute_rmse(&left, &right, 3, 0, 3),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn psi_weights_match_the_reference_expansion() {
        let psi = arma_to_ma(&[1.0, -0.25], &[1.0, 2.0], 10);
        let expected = [
            1.0, 2.0, 3.75, 3.25, 2.3125, 1.5, 0.921875, 0.546875, 0.31640625, 0.1796875,
        ];
        assert_eq!(psi.len(), expected.len());
        for (got, want) in psi.iter().zip(expected.iter()) {
            assert_relative_eq!(got, want, epsilon = 1e-6);
        }
    }

    #[test]
    fn cumulative_sums_accumulate_squared_coefficients() {
        let sums = cumulative_coeff_sums(&[1.0, 2.0, 2.0]);
        assert_relative_eq!(sums[0], 1.0);
        assert_relative_eq!(sums[1], 5.0_f64.sqrt());
        assert_relative_eq!(sums[2], 3.0);
    }

    #[test]
    fn guard_requires_initial_conditions_and_a_forecast_window() {
        let order = ModelOrder::new(0, 1, 0, 0, 1, 0, 4);
        let config = ForecastConfig::default();
        let short = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(
            estimate(&short, order, 4, 5, &config),
            Err(ForecastError::InsufficientData { needed: 5, got: 4 })
        ));

        let data = [1.0; 12];
        assert!(matches!(
            estimate(&data, order, 3, 5, &config),
            Err(ForecastError::InsufficientData { needed: 5, got: 12 })
        ));
        assert!(matches!(
            estimate(&data, order, 12, 12, &config),
            Err(ForecastError::InsufficientData { .. })
        ));
        assert!(matches!(
            estimate(&data, order, 13, 14, &config),
            Err(ForecastError::InsufficientData { needed: 13, got: 12 })
        ));
    }

    #[test]
    fn validation_rmse_is_zero_on_a_constant_series() {
        let data = [2.0; 16];
        let order = ModelOrder::new(0, 0, 1, 0, 0, 0, 0);
        let rmse = validation_rmse(&data, order, &ForecastConfig::default()).unwrap();
        assert_relative_eq!(rmse, 0.0);
    }

    #[test]
    fn forecast_differences_and_integrates_around_the_recursion() {
        // With no ARMA terms the stationary forecast is the centered mean,
        // so after integration each step extends the last level by the mean
        // first difference.
        let mut params = ModelParameters::new(ModelOrder::new(0, 1, 0, 0, 0, 0, 0));
        let data = [1.0, 3.0, 5.0, 7.0, 9.0];
        let result = forecast(&mut params, &data, 5, 7).unwrap();
        assert_relative_eq!(result.forecast()[0], 11.0);
        assert_relative_eq!(result.forecast()[1], 13.0);
        assert_relative_eq!(result.data_variance(), 0.0);
    }
}
