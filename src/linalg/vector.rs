//! Fixed-length numeric vector.

use crate::error::{ForecastError, Result};
use std::ops::{Index, IndexMut};

/// A fixed-length vector of real numbers. The length is set at construction
/// and is always at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Create a vector from existing values. Fails on an empty input.
    pub fn new(data: Vec<f64>) -> Result<Self> {
        if data.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "vector length must be positive".into(),
            ));
        }
        Ok(Self { data })
    }

    /// Create a vector of the given length filled with one value.
    pub fn filled(len: usize, value: f64) -> Result<Self> {
        Self::new(vec![value; len])
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the elements as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the vector and return its elements.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Dot product with another vector of the same length.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        if self.len() != other.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}
