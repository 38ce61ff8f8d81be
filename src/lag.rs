//! Polynomials in the backshift operator.
//!
//! Seasonal and non-seasonal ARIMA operators are products of backshift
//! polynomials. Which lags participate is decided first, by composing lag
//! sets; coefficients exist only after the set is frozen into a
//! [`LagPolynomial`]. Freezing consumes the set, so the active lags of a
//! polynomial can never change once coefficients are attached.

use crate::error::{ForecastError, Result};

/// The composition phase of a backshift polynomial: a membership mask over
/// lags `0..=degree`. Lag zero is always a member while composing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LagSet {
    degree: usize,
    members: Vec<bool>,
}

impl LagSet {
    /// The full set {0, 1, ..., degree}.
    pub fn dense(degree: usize) -> Self {
        Self {
            degree,
            members: vec![true; degree + 1],
        }
    }

    /// The seasonal set {0, period, 2·period, ..., order·period}. Degenerates
    /// to {0} when either `order` or `period` is zero.
    pub fn seasonal(order: usize, period: usize) -> Self {
        let degree = order * period;
        let mut members = vec![false; degree + 1];
        members[0] = true;
        for k in 1..=order {
            if k * period <= degree {
                members[k * period] = true;
            }
        }
        Self { degree, members }
    }

    /// Maximum lag of the set.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Whether `lag` is a member.
    pub fn contains(&self, lag: usize) -> bool {
        lag <= self.degree && self.members[lag]
    }

    /// Union over lag sums: the result contains `j + k` for every member `j`
    /// of `self` and member `k` of `other`. This is the support of the
    /// product polynomial; coefficients are not tracked until freezing.
    pub fn compose(&self, other: &LagSet) -> LagSet {
        let degree = self.degree + other.degree;
        let mut members = vec![false; degree + 1];
        for j in 0..=self.degree {
            if self.members[j] {
                for k in 0..=other.degree {
                    if other.members[k] {
                        members[j + k] = true;
                    }
                }
            }
        }
        LagSet { degree, members }
    }

    /// Consume the set and attach zeroed coefficients to its members.
    /// Lag zero participates only when `include_zero` is set; the AR and MA
    /// operators drop it because the lag-zero term is the series itself.
    pub fn freeze(mut self, include_zero: bool) -> LagPolynomial {
        self.members[0] = include_zero;
        let offsets: Vec<usize> = (0..=self.degree).filter(|&j| self.members[j]).collect();
        let coeffs = vec![0.0; offsets.len()];
        LagPolynomial {
            degree: self.degree,
            offsets,
            coeffs,
        }
    }
}

/// A frozen backshift polynomial: an ascending list of active lags and one
/// coefficient per lag.
#[derive(Debug, Clone, PartialEq)]
pub struct LagPolynomial {
    degree: usize,
    offsets: Vec<usize>,
    coeffs: Vec<f64>,
}

impl LagPolynomial {
    /// Maximum lag the polynomial was frozen with, whether or not a
    /// coefficient lives there.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of coefficients.
    pub fn num_params(&self) -> usize {
        self.offsets.len()
    }

    /// Active lags in ascending order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Coefficients in offset order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    fn position_of(&self, lag: usize) -> Result<usize> {
        self.offsets
            .iter()
            .position(|&offset| offset == lag)
            .ok_or_else(|| ForecastError::InvalidParameter(format!("no coefficient at lag {lag}")))
    }

    /// Read the coefficient at an active lag.
    pub fn coeff(&self, lag: usize) -> Result<f64> {
        Ok(self.coeffs[self.position_of(lag)?])
    }

    /// Write the coefficient at an active lag.
    pub fn set_coeff(&mut self, lag: usize, value: f64) -> Result<()> {
        let position = self.position_of(lag)?;
        self.coeffs[position] = value;
        Ok(())
    }

    /// Evaluate the polynomial against a series at position `t`:
    /// Σ coeff·series[t − lag]. Every active lag must land inside the
    /// series.
    pub fn evaluate(&self, series: &[f64], t: usize) -> Result<f64> {
        let mut sum = 0.0;
        for (offset, coeff) in self.offsets.iter().zip(self.coeffs.iter()) {
            let index = t
                .checked_sub(*offset)
                .filter(|&index| index < series.len())
                .ok_or(ForecastError::IndexOutOfRange {
                    position: t,
                    lag: *offset,
                })?;
            sum += series[index] * coeff;
        }
        Ok(sum)
    }

    /// Coefficients scattered into a dense vector indexed by lag, sized
    /// `1 + max_offset`. Empty when the degree is zero or no lag is active.
    /// Inactive lags, including lag zero, read as 0.0.
    pub fn dense_coefficients(&self) -> Vec<f64> {
        if self.degree == 0 || self.offsets.is_empty() {
            return Vec::new();
        }
        let len = 1 + self.offsets[self.offsets.len() - 1];
        let mut dense = vec![0.0; len];
        for (offset, coeff) in self.offsets.iter().zip(self.coeffs.iter()) {
            dense[*offset] = *coeff;
        }
        dense
    }
}
