//! Top-level forecast entry points.
//!
//! These wrap the full pipeline (estimate, validate, forecast, interval)
//! and collapse any internal failure into a single
//! [`ForecastError::ForecastFailed`] carrying the cause. Callers that want
//! the distinct error kinds should drive [`crate::solver`] directly.

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::forecast::ForecastResult;
use crate::model::ModelOrder;
use crate::solver;

/// Fit an ARIMA model of the given order to `data` and forecast `horizon`
/// steps ahead, using the default configuration.
pub fn forecast(data: &[f64], order: ModelOrder, horizon: usize) -> Result<ForecastResult> {
    forecast_with_config(data, order, horizon, &ForecastConfig::default())
}

/// Same as [`forecast`] with explicit configuration.
pub fn forecast_with_config(
    data: &[f64],
    order: ModelOrder,
    horizon: usize,
    config: &ForecastConfig,
) -> Result<ForecastResult> {
    run_forecast(data, order, horizon, config)
        .map_err(|err| ForecastError::ForecastFailed(err.to_string()))
}

fn run_forecast(
    data: &[f64],
    order: ModelOrder,
    horizon: usize,
    config: &ForecastConfig,
) -> Result<ForecastResult> {
    if data.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "input series is empty".into(),
        ));
    }
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "forecast horizon must be at least 1".into(),
        ));
    }

    // Fit on the full series with a single held-out point, then measure
    // out-of-sample error on a fresh fit over the holdout tail. The
    // validation RMSE scales the confidence interval.
    let mut model = solver::estimate(data, order, data.len(), data.len() + 1, config)?;
    let validation_rmse = solver::validation_rmse(data, order, config)?;
    model.set_rmse(validation_rmse);

    let mut result = model.forecast(horizon)?;
    solver::apply_confidence_interval(model.params(), &mut result, config)?;
    result.append_log(&format!(
        "{{\"model\": \"{}\", \"horizon\": {}, \"input size\": {}}}",
        model.params().summary(),
        horizon,
        data.len()
    ));
    Ok(result)
}
