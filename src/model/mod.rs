//! Model orders, parameter state, and fitted models.

pub mod fitted;
pub mod order;
pub mod params;

pub use fitted::FittedModel;
pub use order::ModelOrder;
pub use params::ModelParameters;
