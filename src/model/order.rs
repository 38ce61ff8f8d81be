//! Seasonal ARIMA model orders.

use std::fmt;

/// Model order (p, d, q, P, D, Q, s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOrder {
    /// Non-seasonal AR order.
    pub p: usize,
    /// Non-seasonal differencing order.
    pub d: usize,
    /// Non-seasonal MA order.
    pub q: usize,
    /// Seasonal AR order.
    pub cap_p: usize,
    /// Seasonal differencing order.
    pub cap_d: usize,
    /// Seasonal MA order.
    pub cap_q: usize,
    /// Seasonal period.
    pub s: usize,
}

impl ModelOrder {
    /// Construct an order from the seven components in the conventional
    /// (p, d, q)(P, D, Q)[s] reading.
    pub fn new(
        p: usize,
        d: usize,
        q: usize,
        cap_p: usize,
        cap_d: usize,
        cap_q: usize,
        s: usize,
    ) -> Self {
        Self {
            p,
            d,
            q,
            cap_p,
            cap_d,
            cap_q,
            s,
        }
    }

    /// Check if any seasonal component is active.
    pub fn is_seasonal(&self) -> bool {
        self.s > 0 && (self.cap_p > 0 || self.cap_d > 0 || self.cap_q > 0)
    }

    /// Whether fitting will apply seasonal differencing.
    pub fn has_seasonal_differencing(&self) -> bool {
        self.cap_d > 0 && self.s > 0
    }

    /// Number of leading observations consumed by differencing before any
    /// stationary point exists: d plus D seasonal windows of length s.
    pub fn initial_condition_len(&self) -> usize {
        self.d + self.cap_d * self.s
    }
}

impl fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ARIMA({},{},{})({},{},{})[{}]",
            self.p, self.d, self.q, self.cap_p, self.cap_d, self.cap_q, self.s
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasonality_requires_period_and_component() {
        assert!(ModelOrder::new(1, 0, 1, 1, 0, 0, 12).is_seasonal());
        assert!(!ModelOrder::new(1, 0, 1, 0, 0, 0, 12).is_seasonal());
        assert!(!ModelOrder::new(1, 0, 1, 1, 1, 1, 0).is_seasonal());
    }

    #[test]
    fn initial_condition_len_counts_both_differencing_kinds() {
        assert_eq!(ModelOrder::new(1, 1, 1, 0, 1, 0, 4).initial_condition_len(), 5);
        assert_eq!(ModelOrder::new(2, 0, 2, 0, 0, 0, 0).initial_condition_len(), 0);
        assert_eq!(ModelOrder::new(0, 2, 0, 1, 2, 0, 12).initial_condition_len(), 26);
    }

    #[test]
    fn display_follows_standard_notation() {
        let order = ModelOrder::new(2, 1, 1, 1, 1, 0, 12);
        assert_eq!(order.to_string(), "ARIMA(2,1,1)(1,1,0)[12]");
    }
}
