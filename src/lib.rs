//! # sarima-forecast
//!
//! Seasonal ARIMA estimation and forecasting for univariate time series.
//!
//! Fits ARIMA(p,d,q)(P,D,Q)[m] models by Hannan-Rissanen two-stage least
//! squares and produces multi-step forecasts with confidence bounds,
//! along with the supporting lag-polynomial algebra, differencing and
//! integration transforms, and dense linear solves.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod api;
pub mod config;
pub mod diff;
pub mod error;
pub mod estimate;
pub mod forecast;
pub mod lag;
pub mod linalg;
pub mod model;
pub mod solver;
pub mod stats;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::api::{forecast, forecast_with_config};
    pub use crate::config::ForecastConfig;
    pub use crate::error::{ForecastError, Result};
    pub use crate::forecast::ForecastResult;
    pub use crate::model::{FittedModel, ModelOrder, ModelParameters};
}
