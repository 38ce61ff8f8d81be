//! Forecast output: point forecasts, confidence bounds, and diagnostics.

use crate::error::{ForecastError, Result};

/// The output of a forecast: point forecasts with confidence bounds, the
/// variance of the stationary training series, the model RMSE, and an
/// append-only diagnostic log.
///
/// Until an interval is computed the bounds are copies of the forecast;
/// RMSE and max normalized variance read -1 until set.
#[derive(Debug, Clone)]
pub struct ForecastResult {
    forecast: Vec<f64>,
    upper: Vec<f64>,
    lower: Vec<f64>,
    data_variance: f64,
    rmse: f64,
    max_normalized_variance: f64,
    log: String,
}

impl ForecastResult {
    pub(crate) fn new(forecast: Vec<f64>, data_variance: f64) -> Self {
        let upper = forecast.clone();
        let lower = forecast.clone();
        Self {
            forecast,
            upper,
            lower,
            data_variance,
            rmse: -1.0,
            max_normalized_variance: -1.0,
            log: String::new(),
        }
    }

    /// Point forecasts.
    pub fn forecast(&self) -> &[f64] {
        &self.forecast
    }

    /// Upper confidence bounds.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Lower confidence bounds.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Model RMSE carried by this result.
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Variance of the centered stationary training series.
    pub fn data_variance(&self) -> f64 {
        self.data_variance
    }

    /// Largest normalized bound variance seen while computing the interval.
    pub fn max_normalized_variance(&self) -> f64 {
        self.max_normalized_variance
    }

    /// Accumulated diagnostic log.
    pub fn log(&self) -> &str {
        &self.log
    }

    pub(crate) fn set_rmse(&mut self, rmse: f64) {
        self.rmse = rmse;
    }

    pub(crate) fn set_max_normalized_variance(&mut self, value: f64) {
        self.max_normalized_variance = value;
    }

    pub(crate) fn append_log(&mut self, message: &str) {
        self.log.push_str(message);
        self.log.push('\n');
    }

    /// A bound variance normalized against the training variance. Keeps the
    /// raw value when the training variance is effectively zero, and the -1
    /// sentinel when either input is invalid.
    fn normalized_variance(&self, v: f64) -> f64 {
        if v < -0.5 || self.data_variance < -0.5 {
            -1.0
        } else if self.data_variance < 1e-7 {
            v
        } else {
            (v / self.data_variance).abs()
        }
    }

    /// Widen the bounds to `forecast ± constant * rmse * sums[i]` and return
    /// the max normalized variance of the squared bounds. The sums must
    /// cover every forecast step.
    pub(crate) fn set_confidence_interval(
        &mut self,
        constant: f64,
        cumulative_sums: &[f64],
    ) -> Result<f64> {
        if cumulative_sums.len() < self.forecast.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.forecast.len(),
                got: cumulative_sums.len(),
            });
        }
        let mut max_normalized_variance = -1.0_f64;
        for i in 0..self.forecast.len() {
            let bound = constant * self.rmse * cumulative_sums[i];
            self.upper[i] = self.forecast[i] + bound;
            self.lower[i] = self.forecast[i] - bound;
            let normalized = self.normalized_variance(bound * bound);
            if normalized > max_normalized_variance {
                max_normalized_variance = normalized;
            }
        }
        Ok(max_normalized_variance)
    }
}
