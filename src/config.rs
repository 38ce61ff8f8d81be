//! Run configuration for estimation and forecasting.

use statrs::distribution::{ContinuousCDF, Normal};

/// Configuration shared by the estimators and the forecast pipeline.
///
/// Every tunable the pipeline consumes lives here so that alternate values
/// can be exercised deterministically in tests instead of hiding behind
/// process-wide constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    /// Maximum condition number for the SPD solves. The factorization clamps
    /// near-singular pivots against this bound instead of failing.
    pub max_condition_number: f64,
    /// Two-sided z-score used for the confidence bounds.
    pub confidence_z: f64,
    /// Fraction of the series held out when computing the validation RMSE.
    pub holdout_fraction: f64,
    /// Maximum number of Hannan-Rissanen refinement iterations.
    pub max_iterations: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            max_condition_number: 100.0,
            confidence_z: 1.959963984540054,
            holdout_fraction: 0.15,
            max_iterations: 5,
        }
    }
}

impl ForecastConfig {
    /// Set the maximum condition number for the SPD solves.
    pub fn with_max_condition_number(mut self, bound: f64) -> Self {
        self.max_condition_number = bound;
        self
    }

    /// Set the confidence z-score directly.
    pub fn with_confidence_z(mut self, z: f64) -> Self {
        self.confidence_z = z;
        self
    }

    /// Set the z-score from a two-sided confidence level, e.g. 0.95.
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        let normal = Normal::new(0.0, 1.0).unwrap();
        self.confidence_z = normal.inverse_cdf((1.0 + level) / 2.0);
        self
    }

    /// Set the validation holdout fraction.
    pub fn with_holdout_fraction(mut self, fraction: f64) -> Self {
        self.holdout_fraction = fraction;
        self
    }

    /// Set the maximum number of estimation iterations.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }
}
