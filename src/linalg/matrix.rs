//! Dense row-major matrix with the handful of products the estimators need.

use crate::error::{ForecastError, Result};
use crate::linalg::Vector;

/// A dense matrix of real numbers stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero matrix with the given shape. Both dimensions must be
    /// positive.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ForecastError::InvalidParameter(
                "matrix dimensions must be positive".into(),
            ));
        }
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        })
    }

    /// Create a matrix from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let row_count = rows.len();
        if row_count == 0 || rows[0].is_empty() {
            return Err(ForecastError::InvalidParameter(
                "matrix dimensions must be positive".into(),
            ));
        }
        let col_count = rows[0].len();
        let mut data = Vec::with_capacity(row_count * col_count);
        for row in &rows {
            if row.len() != col_count {
                return Err(ForecastError::DimensionMismatch {
                    expected: col_count,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: row_count,
            cols: col_count,
            data,
        })
    }

    /// Build the symmetric Toeplitz matrix whose (i, j) entry is
    /// `diagonals[|i - j|]`. The first element supplies the main diagonal.
    pub fn toeplitz(diagonals: &[f64]) -> Result<Self> {
        let n = diagonals.len();
        let mut out = Self::new(n, n)?;
        for i in 0..n {
            for j in 0..n {
                out.set(i, j, diagonals[i.abs_diff(j)]);
            }
        }
        Ok(out)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read the entry at (row, col). Panics when either index is out of
    /// bounds, matching slice indexing.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    /// Write the entry at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    /// Matrix-vector product. The vector length must equal the column count.
    pub fn times_vector(&self, v: &Vector) -> Result<Vector> {
        if self.cols != v.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.cols,
                got: v.len(),
            });
        }
        let mut out = vec![0.0; self.rows];
        for (i, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for j in 0..self.cols {
                sum += self.get(i, j) * v[j];
            }
            *slot = sum;
        }
        Vector::new(out)
    }

    /// The product of this matrix with its own transpose, a symmetric
    /// rows-by-rows matrix. Used to form normal equations from a design
    /// matrix without materializing the transpose.
    pub fn aat(&self) -> Matrix {
        let mut out = Self {
            rows: self.rows,
            cols: self.rows,
            data: vec![0.0; self.rows * self.rows],
        };
        for i in 0..self.rows {
            for j in i..self.rows {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * self.get(j, k);
                }
                out.set(i, j, sum);
                out.set(j, i, sum);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn construction_rejects_zero_dimensions() {
        assert!(matches!(
            Matrix::new(0, 3),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(matches!(
            Matrix::new(3, 0),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            err,
            Err(ForecastError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn get_and_set_round_trip() {
        let mut m = Matrix::new(2, 3).unwrap();
        m.set(1, 2, 4.5);
        assert_relative_eq!(m.get(1, 2), 4.5);
        assert_relative_eq!(m.get(0, 0), 0.0);
    }

    #[test]
    fn times_vector_matches_hand_computation() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let v = Vector::new(vec![1.0, -1.0]).unwrap();
        let out = m.times_vector(&v).unwrap();
        assert_eq!(out.len(), 3);
        assert_relative_eq!(out[0], -1.0);
        assert_relative_eq!(out[1], -1.0);
        assert_relative_eq!(out[2], -1.0);

        let m = Matrix::from_rows(vec![vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
        let v = Vector::new(vec![3.0, 4.0]).unwrap();
        let out = m.times_vector(&v).unwrap();
        assert_relative_eq!(out[0], 7.0);
        assert_relative_eq!(out[1], 14.0);
    }

    #[test]
    fn times_vector_rejects_length_mismatch() {
        let m = Matrix::new(3, 3).unwrap();
        let v = Vector::filled(4, 1.0).unwrap();
        assert!(matches!(
            m.times_vector(&v),
            Err(ForecastError::DimensionMismatch { expected: 3, got: 4 })
        ));
    }

    #[test]
    fn aat_is_symmetric_and_correct() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let p = m.aat();
        assert_eq!(p.rows(), 2);
        assert_eq!(p.cols(), 2);
        assert_relative_eq!(p.get(0, 0), 14.0);
        assert_relative_eq!(p.get(0, 1), 32.0);
        assert_relative_eq!(p.get(1, 0), 32.0);
        assert_relative_eq!(p.get(1, 1), 77.0);
    }

    #[test]
    fn toeplitz_uses_distance_from_diagonal() {
        let t = Matrix::toeplitz(&[2.0, 1.0, 0.5]).unwrap();
        assert_relative_eq!(t.get(0, 0), 2.0);
        assert_relative_eq!(t.get(1, 1), 2.0);
        assert_relative_eq!(t.get(0, 1), 1.0);
        assert_relative_eq!(t.get(1, 0), 1.0);
        assert_relative_eq!(t.get(0, 2), 0.5);
        assert_relative_eq!(t.get(2, 0), 0.5);
    }
}
