//! Parameter estimation for stationary series.

pub mod hannan_rissanen;
pub mod yule_walker;
