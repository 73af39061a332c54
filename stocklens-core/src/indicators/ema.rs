//! Exponentially weighted mean with `alpha = 2 / (period + 1)`.
//!
//! The first defined row is `period - 1`, holding the plain mean of the
//! opening window. Every later row blends the new value into the previous
//! one. A NaN in the opening window leaves the whole output NaN; a later
//! NaN ends the series at that row.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }

    pub fn alpha(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let p = self.period;
        let mut result = vec![f64::NAN; values.len()];
        if values.len() < p || values[..p].iter().any(|v| v.is_nan()) {
            return result;
        }

        let alpha = self.alpha();
        let mut level = values[..p].iter().sum::<f64>() / p as f64;
        result[p - 1] = level;

        for (slot, &x) in result[p..].iter_mut().zip(&values[p..]) {
            if x.is_nan() {
                break;
            }
            level += alpha * (x - level);
            *slot = level;
        }

        result
    }
}
