//! A fitted model bound to its training series.

use crate::error::Result;
use crate::forecast::ForecastResult;
use crate::model::ModelParameters;
use crate::solver;

/// An estimated model together with the series it was fitted on, ready to
/// forecast any horizon past the training window.
#[derive(Debug, Clone)]
pub struct FittedModel {
    params: ModelParameters,
    data: Vec<f64>,
    train_size: usize,
    rmse: f64,
}

impl FittedModel {
    /// Bind estimated parameters to the series they were fitted on. The
    /// first `train_size` points are the training window.
    pub fn new(params: ModelParameters, data: Vec<f64>, train_size: usize) -> Self {
        Self {
            params,
            data,
            train_size,
            rmse: 0.0,
        }
    }

    /// The fitted parameters.
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// The model RMSE, 0.0 until [`Self::set_rmse`] stores one.
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Store the model RMSE carried into every forecast result.
    pub fn set_rmse(&mut self, rmse: f64) {
        self.rmse = rmse;
    }

    /// Forecast `horizon` points past the training window. Differencing
    /// state is rebuilt from the stored series on every call.
    pub fn forecast(&mut self, horizon: usize) -> Result<ForecastResult> {
        let mut result = solver::forecast(
            &mut self.params,
            &self.data,
            self.train_size,
            self.train_size + horizon,
        )?;
        result.set_rmse(self.rmse);
        Ok(result)
    }
}
