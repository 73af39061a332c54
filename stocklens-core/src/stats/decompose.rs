//! Additive seasonal decomposition: x = trend + seasonal + residual.
//!
//! Trend is a centered moving average. For an even period it is the 2xN
//! average with weights [0.5, 1, ..., 1, 0.5] / period so that it stays
//! centered on a row. `period / 2` rows at each end have no trend and
//! therefore no residual. Seasonal is the per-phase mean of the detrended
//! series, shifted to sum to zero, repeated across the whole length.

use super::StatsError;

#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub period: usize,
    /// NaN where the centered window does not fit.
    pub trend: Vec<f64>,
    /// Defined on every row.
    pub seasonal: Vec<f64>,
    /// NaN wherever trend is NaN.
    pub residual: Vec<f64>,
}

/// Decompose `values` with a fixed seasonal `period`.
///
/// Needs at least two full cycles and only finite values.
pub fn seasonal_decompose(values: &[f64], period: usize) -> Result<Decomposition, StatsError> {
    if period < 2 {
        return Err(StatsError::InvalidParameter(format!(
            "seasonal period must be >= 2, got {period}"
        )));
    }
    let n = values.len();
    if n < 2 * period {
        return Err(StatsError::InsufficientData {
            needed: 2 * period,
            actual: n,
        });
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(StatsError::NonFinite(pos));
    }

    let trend = centered_moving_average(values, period);

    let mut phase_sum = vec![0.0; period];
    let mut phase_count = vec![0usize; period];
    for (i, (x, t)) in values.iter().zip(&trend).enumerate() {
        if t.is_finite() {
            phase_sum[i % period] += x - t;
            phase_count[i % period] += 1;
        }
    }
    let mut phase_mean: Vec<f64> = phase_sum
        .iter()
        .zip(&phase_count)
        .map(|(s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();
    let offset = phase_mean.iter().sum::<f64>() / period as f64;
    for m in &mut phase_mean {
        *m -= offset;
    }

    let seasonal: Vec<f64> = (0..n).map(|i| phase_mean[i % period]).collect();
    let residual = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((x, t), s)| x - t - s)
        .collect();

    Ok(Decomposition {
        period,
        trend,
        seasonal,
        residual,
    })
}

fn centered_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let half = period / 2;
    let weights: Vec<f64> = if period % 2 == 0 {
        let mut w = vec![1.0 / period as f64; period + 1];
        w[0] = 0.5 / period as f64;
        w[period] = 0.5 / period as f64;
        w
    } else {
        vec![1.0 / period as f64; period]
    };

    let mut trend = vec![f64::NAN; n];
    for (t, slot) in trend.iter_mut().enumerate().take(n - half).skip(half) {
        let start = t - half;
        *slot = weights
            .iter()
            .zip(&values[start..start + weights.len()])
            .map(|(w, x)| w * x)
            .sum();
    }
    trend
}
