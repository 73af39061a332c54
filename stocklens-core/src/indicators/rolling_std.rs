//! Rolling standard deviation over a trailing window.
//!
//! `ddof` selects the divisor: `period - ddof`. Sample (ddof = 1) is the
//! default and matches what Bollinger bands and volatility use here.
//! A window containing NaN yields NaN. Lookback: period - 1.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct RollingStd {
    period: usize,
    ddof: usize,
    name: String,
}

impl RollingStd {
    /// Sample standard deviation (ddof = 1).
    pub fn new(period: usize) -> Self {
        Self::with_ddof(period, 1)
    }

    pub fn with_ddof(period: usize, ddof: usize) -> Self {
        assert!(period > ddof, "rolling std period must exceed ddof");
        Self {
            period,
            ddof,
            name: format!("std_{period}"),
        }
    }
}

impl Indicator for RollingStd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &values[i + 1 - self.period..=i];
            if let Some((_, std)) = window_mean_std(window, self.ddof) {
                result[i] = std;
            }
        }

        result
    }
}

/// Mean and standard deviation of a window, `None` if it contains NaN.
///
/// Two-pass so that large price levels do not swamp small deviations.
pub(crate) fn window_mean_std(window: &[f64], ddof: usize) -> Option<(f64, f64)> {
    let len = window.len();
    if len <= ddof || window.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mean = window.iter().sum::<f64>() / len as f64;
    let ss: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some((mean, (ss / (len - ddof) as f64).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sample_std_known_values() {
        // Window [2,4,4,4,5,5,7,9]: mean 5, sum sq 32
        // sample var = 32/7, population var = 32/8 = 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sample = RollingStd::new(8).compute(&values);
        let population = RollingStd::with_ddof(8, 0).compute(&values);
        assert_approx(sample[7], (32.0_f64 / 7.0).sqrt(), DEFAULT_EPSILON);
        assert_approx(population[7], 2.0, DEFAULT_EPSILON);
        assert!(sample[6].is_nan());
    }

    #[test]
    fn constant_window_is_zero() {
        let result = RollingStd::new(3).compute(&[5.0, 5.0, 5.0, 5.0]);
        assert_approx(result[2], 0.0, DEFAULT_EPSILON);
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn leading_nan_shifts_first_value() {
        // Like returns: index 0 undefined → first full window ends at index 3
        let result = RollingStd::new(3).compute(&[f64::NAN, 0.1, -0.1, 0.2, 0.0]);
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan());
        assert!(!result[4].is_nan());
    }

    #[test]
    #[should_panic]
    fn period_must_exceed_ddof() {
        RollingStd::new(1);
    }
}
