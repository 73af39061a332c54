//! Trailing-window arithmetic mean.
//!
//! Row `t` averages `values[t + 1 - period ..= t]`; rows before `period - 1`
//! and any window holding a NaN are NaN.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let p = self.period;
        let mut result = vec![f64::NAN; values.len()];

        // Running sum of the finite values in the window, plus a count of
        // the NaNs it holds.
        let mut sum = 0.0;
        let mut gaps = 0usize;
        for (t, &entering) in values.iter().enumerate() {
            if entering.is_nan() {
                gaps += 1;
            } else {
                sum += entering;
            }
            if t >= p {
                let leaving = values[t - p];
                if leaving.is_nan() {
                    gaps -= 1;
                } else {
                    sum -= leaving;
                }
            }
            if t + 1 >= p && gaps == 0 {
                result[t] = sum / p as f64;
            }
        }

        result
    }
}
