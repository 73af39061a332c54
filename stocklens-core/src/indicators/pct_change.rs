//! Percentage change over N rows, as a fraction.
//!
//! PCT[t] = (x[t] - x[t-period]) / x[t-period]
//! Lookback: period. A zero base yields NaN rather than infinity.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct PctChange {
    period: usize,
    name: String,
}

impl PctChange {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "pct_change period must be >= 1");
        Self {
            period,
            name: format!("pct_change_{period}"),
        }
    }

    /// Day-over-day change.
    pub fn daily() -> Self {
        Self::new(1)
    }
}

impl Indicator for PctChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        for i in self.period..n {
            let prev = values[i - self.period];
            let curr = values[i];
            if prev.is_nan() || curr.is_nan() || prev == 0.0 {
                continue;
            }
            result[i] = (curr - prev) / prev;
        }

        result
    }
}
