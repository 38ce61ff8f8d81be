//! Parameter state for a seasonal ARIMA model.
//!
//! A [`ModelParameters`] value owns the merged AR and MA backshift
//! polynomials plus the per-level differencing state: one initial-condition
//! window per differencing level and the differenced/integrated series each
//! level produced. Every fit owns its parameters exclusively.

use crate::diff;
use crate::error::{ForecastError, Result};
use crate::lag::{LagPolynomial, LagSet};
use crate::linalg::Vector;
use crate::model::ModelOrder;

/// Coefficients and differencing state for one model order.
#[derive(Debug, Clone)]
pub struct ModelParameters {
    order: ModelOrder,
    op_ar: LagPolynomial,
    op_ma: LagPolynomial,
    init_seasonal: Vec<Vec<f64>>,
    diff_seasonal: Vec<Vec<f64>>,
    integ_seasonal: Vec<Vec<f64>>,
    init_non_seasonal: Vec<Vec<f64>>,
    diff_non_seasonal: Vec<Vec<f64>>,
    integ_non_seasonal: Vec<Vec<f64>>,
}

/// The merged operator for one side of the model: the seasonal lag set
/// composed with the dense non-seasonal set, frozen without lag zero.
fn merged_operator(non_seasonal: usize, seasonal: usize, period: usize) -> LagPolynomial {
    LagSet::seasonal(seasonal, period)
        .compose(&LagSet::dense(non_seasonal))
        .freeze(false)
}

impl ModelParameters {
    /// Build zeroed parameters for the given order.
    pub fn new(order: ModelOrder) -> Self {
        let op_ar = merged_operator(order.p, order.cap_p, order.s);
        let op_ma = merged_operator(order.q, order.cap_q, order.s);
        let seasonal_levels = if order.has_seasonal_differencing() {
            order.cap_d
        } else {
            0
        };
        Self {
            order,
            op_ar,
            op_ma,
            init_seasonal: vec![vec![0.0; order.s]; seasonal_levels],
            diff_seasonal: vec![Vec::new(); seasonal_levels],
            integ_seasonal: vec![Vec::new(); seasonal_levels],
            init_non_seasonal: vec![vec![0.0; 1]; order.d],
            diff_non_seasonal: vec![Vec::new(); order.d],
            integ_non_seasonal: vec![Vec::new(); order.d],
        }
    }

    /// The order this parameter set was built for.
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// The merged AR polynomial.
    pub fn ar(&self) -> &LagPolynomial {
        &self.op_ar
    }

    /// The merged MA polynomial.
    pub fn ma(&self) -> &LagPolynomial {
        &self.op_ma
    }

    /// Maximum AR lag.
    pub fn degree_ar(&self) -> usize {
        self.op_ar.degree()
    }

    /// Maximum MA lag.
    pub fn degree_ma(&self) -> usize {
        self.op_ma.degree()
    }

    /// Number of free AR coefficients.
    pub fn num_params_ar(&self) -> usize {
        self.op_ar.num_params()
    }

    /// Number of free MA coefficients.
    pub fn num_params_ma(&self) -> usize {
        self.op_ma.num_params()
    }

    /// Total number of free coefficients.
    pub fn num_params(&self) -> usize {
        self.num_params_ar() + self.num_params_ma()
    }

    /// Active AR lags in ascending order.
    pub fn offsets_ar(&self) -> &[usize] {
        self.op_ar.offsets()
    }

    /// Active MA lags in ascending order.
    pub fn offsets_ma(&self) -> &[usize] {
        self.op_ma.offsets()
    }

    /// One-step ARMA forecast at `index`: the AR polynomial applied to the
    /// series history plus the MA polynomial applied to the error history.
    pub fn forecast_one_point_arma(
        &self,
        data: &[f64],
        errors: &[f64],
        index: usize,
    ) -> Result<f64> {
        Ok(self.op_ar.evaluate(data, index)? + self.op_ma.evaluate(errors, index)?)
    }

    /// Install coefficients from a packed vector: AR coefficients in offset
    /// order, then MA coefficients.
    pub fn set_params_from_vector(&mut self, params: &Vector) -> Result<()> {
        if params.len() != self.num_params() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.num_params(),
                got: params.len(),
            });
        }
        let mut index = 0;
        let ar_offsets = self.op_ar.offsets().to_vec();
        for lag in ar_offsets {
            self.op_ar.set_coeff(lag, params[index])?;
            index += 1;
        }
        let ma_offsets = self.op_ma.offsets().to_vec();
        for lag in ma_offsets {
            self.op_ma.set_coeff(lag, params[index])?;
            index += 1;
        }
        Ok(())
    }

    /// Pack the current coefficients into a vector, AR first then MA.
    /// Fails when the model has no free coefficients.
    pub fn params_to_vector(&self) -> Result<Vector> {
        let packed: Vec<f64> = self
            .op_ar
            .coefficients()
            .iter()
            .chain(self.op_ma.coefficients().iter())
            .copied()
            .collect();
        Vector::new(packed)
    }

    /// AR coefficients scattered densely by lag, for the psi-weight
    /// recursion.
    pub fn ar_dense_coefficients(&self) -> Vec<f64> {
        self.op_ar.dense_coefficients()
    }

    /// MA coefficients scattered densely by lag.
    pub fn ma_dense_coefficients(&self) -> Vec<f64> {
        self.op_ma.dense_coefficients()
    }

    /// Human-readable order summary.
    pub fn summary(&self) -> String {
        self.order.to_string()
    }

    /// Apply every seasonal differencing level in order, capturing each
    /// level's initial window.
    pub fn difference_seasonal(&mut self, data: &[f64]) -> Result<()> {
        let period = self.order.s;
        for level in 0..self.init_seasonal.len() {
            let src: &[f64] = if level == 0 {
                data
            } else {
                self.diff_seasonal[level - 1].as_slice()
            };
            let mut next = vec![0.0; src.len().saturating_sub(period)];
            diff::difference(src, &mut next, &mut self.init_seasonal[level], period)?;
            self.diff_seasonal[level] = next;
        }
        Ok(())
    }

    /// Apply every non-seasonal differencing level in order.
    pub fn difference_non_seasonal(&mut self, data: &[f64]) -> Result<()> {
        for level in 0..self.init_non_seasonal.len() {
            let src: &[f64] = if level == 0 {
                data
            } else {
                self.diff_non_seasonal[level - 1].as_slice()
            };
            let mut next = vec![0.0; src.len().saturating_sub(1)];
            diff::difference(src, &mut next, &mut self.init_non_seasonal[level], 1)?;
            self.diff_non_seasonal[level] = next;
        }
        Ok(())
    }

    /// Replay the seasonal differencing levels in reverse capture order,
    /// rebuilding levels from the captured initial windows. The deepest
    /// level is inverted first so the replay is the exact inverse of
    /// [`Self::difference_seasonal`] at any depth.
    pub fn integrate_seasonal(&mut self, data: &[f64]) -> Result<()> {
        let period = self.order.s;
        let levels = self.init_seasonal.len();
        for level in (0..levels).rev() {
            let src: &[f64] = if level == levels - 1 {
                data
            } else {
                self.integ_seasonal[level + 1].as_slice()
            };
            let mut next = vec![0.0; src.len() + period];
            diff::integrate(src, &mut next, &self.init_seasonal[level], period)?;
            self.integ_seasonal[level] = next;
        }
        Ok(())
    }

    /// Replay the non-seasonal differencing levels in reverse capture order.
    pub fn integrate_non_seasonal(&mut self, data: &[f64]) -> Result<()> {
        let levels = self.init_non_seasonal.len();
        for level in (0..levels).rev() {
            let src: &[f64] = if level == levels - 1 {
                data
            } else {
                self.integ_non_seasonal[level + 1].as_slice()
            };
            let mut next = vec![0.0; src.len() + 1];
            diff::integrate(src, &mut next, &self.init_non_seasonal[level], 1)?;
            self.integ_non_seasonal[level] = next;
        }
        Ok(())
    }

    /// The most-differenced seasonal series from the last
    /// [`Self::difference_seasonal`] call.
    pub fn differenced_seasonal(&self) -> Result<&[f64]> {
        self.diff_seasonal
            .last()
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(
                    "model applies no seasonal differencing".into(),
                )
            })
    }

    /// The most-differenced non-seasonal series from the last
    /// [`Self::difference_non_seasonal`] call.
    pub fn differenced_non_seasonal(&self) -> Result<&[f64]> {
        self.diff_non_seasonal
            .last()
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(
                    "model applies no non-seasonal differencing".into(),
                )
            })
    }

    /// The fully rebuilt series from the last [`Self::integrate_seasonal`]
    /// call. Level 0 is replayed last, so it holds the complete result.
    pub fn integrated_seasonal(&self) -> Result<&[f64]> {
        self.integ_seasonal
            .first()
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(
                    "model applies no seasonal differencing".into(),
                )
            })
    }

    /// The fully rebuilt series from the last
    /// [`Self::integrate_non_seasonal`] call.
    pub fn integrated_non_seasonal(&self) -> Result<&[f64]> {
        self.integ_non_seasonal
            .first()
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(
                    "model applies no non-seasonal differencing".into(),
                )
            })
    }
}
