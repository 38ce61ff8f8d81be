//! Lag-`order` differencing and its exact inverse.
//!
//! A differencing pass shortens the series by `order` points and captures
//! the first `order` source values as the initial conditions that the
//! integration pass needs to rebuild the original levels.

use crate::error::{ForecastError, Result};

fn check_initial(initial_len: usize, order: usize) -> Result<()> {
    if order == 0 || initial_len != order {
        return Err(ForecastError::InvalidParameter(format!(
            "initial condition length {initial_len} does not match differencing order {order}"
        )));
    }
    Ok(())
}

/// Difference `src` at lag `order` into `dst`, capturing the leading window
/// into `initial`. `dst` must be exactly `order` shorter than `src`.
pub fn difference(src: &[f64], dst: &mut [f64], initial: &mut [f64], order: usize) -> Result<()> {
    check_initial(initial.len(), order)?;
    if src.len() <= order {
        return Err(ForecastError::InvalidParameter(format!(
            "source length {} is too short to difference at order {order}",
            src.len()
        )));
    }
    if dst.len() != src.len() - order {
        return Err(ForecastError::InvalidParameter(format!(
            "destination length {} does not match source length {} minus order {order}",
            dst.len(),
            src.len()
        )));
    }
    initial.copy_from_slice(&src[..order]);
    for k in 0..dst.len() {
        dst[k] = src[order + k] - src[k];
    }
    Ok(())
}

/// Integrate `src` at lag `order` into `dst`, seeding the leading window
/// from `initial`. Exact left inverse of [`difference`] under the captured
/// initial conditions. `dst` must be exactly `order` longer than `src`.
pub fn integrate(src: &[f64], dst: &mut [f64], initial: &[f64], order: usize) -> Result<()> {
    check_initial(initial.len(), order)?;
    if dst.len() <= order {
        return Err(ForecastError::InvalidParameter(format!(
            "destination length {} is too short to integrate at order {order}",
            dst.len()
        )));
    }
    if src.len() != dst.len() - order {
        return Err(ForecastError::InvalidParameter(format!(
            "source length {} does not match destination length {} minus order {order}",
            src.len(),
            dst.len()
        )));
    }
    dst[..order].copy_from_slice(initial);
    for k in 0..src.len() {
        dst[order + k] = dst[k] + src[k];
    }
    Ok(())
}
