//! Property tests for indicator and statistic invariants.
//!
//! Uses proptest to verify:
//! 1. SMA matches the arithmetic mean of its trailing window
//! 2. RSI stays within [0, 100] once defined
//! 3. Daily returns match (close[t] - close[t-1]) / close[t-1]
//! 4. Correlation matrices are symmetric with a unit diagonal, even with a
//!    constant column
//! 5. Seasonal decomposition reassembles to the input where trend exists

use proptest::prelude::*;
use stocklens_core::indicators::{Bollinger, Indicator, PctChange, Rsi, Sma};
use stocklens_core::stats::{correlation_matrix, seasonal_decompose};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_prices(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..500.0_f64, min_len..max_len)
}

fn arb_volumes(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1_000_000.0_f64, len)
}

// ── 1. SMA definition ────────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_is_window_mean(prices in arb_prices(50, 200)) {
        let sma = Sma::new(50).compute(&prices);
        for (t, v) in sma.iter().enumerate() {
            if t < 49 {
                prop_assert!(v.is_nan());
            } else {
                let mean = prices[t - 49..=t].iter().sum::<f64>() / 50.0;
                prop_assert!((v - mean).abs() <= 1e-9 * mean.abs().max(1.0));
            }
        }
    }
}

// ── 2. RSI bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_is_bounded(prices in arb_prices(15, 300)) {
        let rsi = Rsi::new(14).compute(&prices);
        for v in rsi.iter().skip(14) {
            prop_assert!(v.is_finite());
            prop_assert!((0.0..=100.0).contains(v));
        }
        prop_assert!(rsi.iter().take(14).all(|v| v.is_nan()));
    }
}

// ── 3. Returns formula ───────────────────────────────────────────────

proptest! {
    #[test]
    fn daily_returns_formula(prices in arb_prices(2, 100)) {
        let returns = PctChange::daily().compute(&prices);
        prop_assert!(returns[0].is_nan());
        for t in 1..prices.len() {
            let expected = (prices[t] - prices[t - 1]) / prices[t - 1];
            prop_assert!((returns[t] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn bollinger_upper_above_lower(prices in arb_prices(20, 120)) {
        let upper = Bollinger::upper(20, 2.0).compute(&prices);
        let lower = Bollinger::lower(20, 2.0).compute(&prices);
        for t in 19..prices.len() {
            prop_assert!(upper[t] >= lower[t]);
        }
    }
}

// ── 4. Correlation symmetry ──────────────────────────────────────────

proptest! {
    #[test]
    fn correlation_matrix_symmetric(
        (close, volume) in (2usize..80).prop_flat_map(|n| {
            (prop::collection::vec(1.0..500.0_f64, n), arb_volumes(n))
        })
    ) {
        let m = correlation_matrix(&[("Close", &close), ("Volume", &volume)]).unwrap();
        prop_assert_eq!(m.values[0][0], Some(1.0));
        prop_assert_eq!(m.values[1][1], Some(1.0));
        prop_assert_eq!(m.values[0][1], m.values[1][0]);
        if let Some(r) = m.values[0][1] {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn constant_column_has_undefined_correlation(
        close in arb_prices(2, 60),
        level in 1.0..1_000_000.0_f64,
    ) {
        let volume = vec![level; close.len()];
        let m = correlation_matrix(&[("Close", &close), ("Volume", &volume)]).unwrap();
        prop_assert_eq!(m.values[0][0], Some(1.0));
        prop_assert_eq!(m.values[1][1], Some(1.0));
        prop_assert_eq!(m.values[0][1], None);
        prop_assert!(m.is_symmetric());
    }
}

// ── 5. Decomposition identity ────────────────────────────────────────

proptest! {
    #[test]
    fn decomposition_reassembles(prices in arb_prices(24, 120), period in 2usize..12) {
        prop_assume!(prices.len() >= 2 * period);
        let d = seasonal_decompose(&prices, period).unwrap();
        for t in 0..prices.len() {
            if d.trend[t].is_nan() {
                prop_assert!(d.residual[t].is_nan());
            } else {
                let sum = d.trend[t] + d.seasonal[t] + d.residual[t];
                prop_assert!((sum - prices[t]).abs() < 1e-9 * prices[t].abs().max(1.0));
            }
        }
    }
}
