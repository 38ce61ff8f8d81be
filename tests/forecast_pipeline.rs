//! End-to-end forecast pipeline tests.
//!
//! These drive the public API from raw series to forecast with bounds,
//! covering repeating patterns, trends, seasonal differencing, and the
//! degenerate inputs the pipeline must reject.

use approx::assert_relative_eq;
use sarima_forecast::api;
use sarima_forecast::config::ForecastConfig;
use sarima_forecast::error::ForecastError;
use sarima_forecast::model::ModelOrder;
use sarima_forecast::solver;

/// AR(1) series with standard normal innovations from a fixed seed.
fn seeded_ar1(n: usize, phi: f64, seed: u64) -> Vec<f64> {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);
    let mut series = Vec::with_capacity(n);
    let mut previous = 0.0;
    for _ in 0..n {
        let u1: f64 = rng.gen();
        let u2: f64 = rng.gen();
        let noise = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        let value = phi * previous + noise;
        series.push(value);
        previous = value;
    }
    series
}

#[test]
fn repeating_pattern_forecasts_the_next_value_exactly() {
    let data = [
        2.0, 1.0, 2.0, 5.0, 2.0, 1.0, 2.0, 5.0, 2.0, 1.0, 2.0, 5.0, 2.0, 1.0, 2.0, 5.0,
    ];
    let order = ModelOrder::new(3, 0, 3, 1, 1, 0, 0);
    let result = api::forecast(&data, order, 1).unwrap();
    assert_eq!(result.forecast().len(), 1);
    assert_relative_eq!(result.forecast()[0], 2.0, epsilon = 1e-8);
    assert!(result.lower()[0] <= result.forecast()[0]);
    assert!(result.forecast()[0] <= result.upper()[0]);
}

#[test]
fn constant_series_forecasts_the_constant_with_tight_bounds() {
    let data = [2.0; 16];
    let order = ModelOrder::new(0, 0, 1, 0, 0, 0, 0);
    let result = api::forecast(&data, order, 4).unwrap();
    for step in 0..4 {
        assert_relative_eq!(result.forecast()[step], 2.0, epsilon = 1e-8);
        assert_relative_eq!(result.upper()[step], 2.0, epsilon = 1e-8);
        assert_relative_eq!(result.lower()[step], 2.0, epsilon = 1e-8);
    }
    assert_relative_eq!(result.rmse(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(result.max_normalized_variance(), 0.0, epsilon = 1e-12);
}

#[test]
fn differenced_model_continues_a_linear_trend_exactly() {
    let data: Vec<f64> = (0..16).map(|t| 2.0 * t as f64 + 1.0).collect();
    let order = ModelOrder::new(1, 1, 0, 0, 0, 0, 0);
    let result = api::forecast(&data, order, 2).unwrap();
    assert_relative_eq!(result.forecast()[0], 33.0, epsilon = 1e-8);
    assert_relative_eq!(result.forecast()[1], 35.0, epsilon = 1e-8);
    assert_relative_eq!(result.rmse(), 0.0, epsilon = 1e-8);
}

#[test]
fn seasonal_differencing_continues_a_periodic_series_exactly() {
    let mut data = Vec::new();
    for _ in 0..6 {
        data.extend_from_slice(&[10.0, 20.0, 30.0, 40.0]);
    }
    let order = ModelOrder::new(0, 0, 1, 1, 1, 0, 4);
    let result = api::forecast(&data, order, 4).unwrap();
    for (step, expected) in [10.0, 20.0, 30.0, 40.0].iter().enumerate() {
        assert_relative_eq!(result.forecast()[step], expected, epsilon = 1e-8);
    }
}

#[test]
fn order_without_parameters_is_rejected() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let order = ModelOrder::new(0, 0, 0, 0, 0, 0, 0);
    let err = api::forecast(&data, order, 1).unwrap_err();
    assert!(matches!(err, ForecastError::ForecastFailed(_)));

    let config = ForecastConfig::default();
    let inner = solver::estimate(&data, order, 8, 9, &config).unwrap_err();
    assert!(matches!(inner, ForecastError::InvalidParameter(_)));
}

#[test]
fn autoregressive_coefficient_is_recovered_from_a_long_series() {
    let data = seeded_ar1(200, 0.6, 42);
    let order = ModelOrder::new(1, 0, 0, 0, 0, 0, 0);
    let config = ForecastConfig::default();
    let model = solver::estimate(&data, order, data.len(), data.len() + 1, &config).unwrap();
    let phi = model.params().ar().coeff(1).unwrap();
    assert!(
        (phi - 0.6).abs() < 0.2,
        "expected the lag-1 coefficient near 0.6, got {phi}"
    );
}

#[test]
fn noisy_series_yields_ordered_widening_bounds() {
    let data = seeded_ar1(200, 0.6, 7);
    let order = ModelOrder::new(1, 0, 0, 0, 0, 0, 0);
    let result = api::forecast(&data, order, 10).unwrap();
    assert_eq!(result.forecast().len(), 10);
    assert!(result.rmse() > 0.0);
    assert!(result.data_variance() > 0.0);
    assert!(result.max_normalized_variance() >= -1.0);

    let mut previous_width = 0.0;
    for step in 0..10 {
        assert!(result.forecast()[step].is_finite());
        assert!(result.lower()[step] <= result.forecast()[step]);
        assert!(result.forecast()[step] <= result.upper()[step]);
        let width = result.upper()[step] - result.lower()[step];
        assert!(
            width >= previous_width - 1e-12,
            "interval width shrank at step {step}"
        );
        previous_width = width;
    }
}

#[test]
fn custom_configuration_changes_the_interval_constant() {
    let data = seeded_ar1(120, 0.5, 11);
    let order = ModelOrder::new(1, 0, 0, 0, 0, 0, 0);
    let narrow = ForecastConfig::default().with_confidence_z(1.0);
    let wide = ForecastConfig::default().with_confidence_z(3.0);
    let narrow_result = api::forecast_with_config(&data, order, 5, &narrow).unwrap();
    let wide_result = api::forecast_with_config(&data, order, 5, &wide).unwrap();
    for step in 0..5 {
        let narrow_width = narrow_result.upper()[step] - narrow_result.lower()[step];
        let wide_width = wide_result.upper()[step] - wide_result.lower()[step];
        assert!(
            wide_width >= narrow_width,
            "wider z must not tighten the interval at step {step}"
        );
    }
}
