//! Linear algebra primitives sized for the estimation problems in this
//! crate: dense vectors and matrices plus a condition-bounded SPD solve.

pub mod matrix;
pub mod solve;
pub mod vector;

pub use matrix::Matrix;
pub use solve::{factorize, SpdFactorization};
pub use vector::Vector;
