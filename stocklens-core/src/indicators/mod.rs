//! Indicator library.
//!
//! Every indicator is a pure function of one numeric series: values in,
//! same-length values out. The first `lookback()` outputs are `f64::NAN`
//! (warmup), and a `NaN` input poisons every window that contains it.
//!
//! Multi-series indicators (Bollinger) are exposed as separate named
//! instances per band, keeping the single-series `Indicator` trait unchanged.

pub mod bollinger;
pub mod ema;
pub mod pct_change;
pub mod rolling_std;
pub mod rsi;
pub mod sma;

pub use bollinger::{Bollinger, BollingerBand};
pub use ema::Ema;
pub use pct_change::PctChange;
pub use rolling_std::RollingStd;
pub use rsi::Rsi;
pub use sma::Sma;

/// A windowed transform over a single numeric series.
///
/// # Look-ahead guard
/// No output at row t may depend on input from row t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading rows that are always `NaN`.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole series.
    ///
    /// Returns a `Vec<f64>` of the same length as `values`.
    fn compute(&self, values: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
