//! StockLens Core: validated price tables, indicators, and series statistics.
//!
//! This crate holds everything that is a pure function of the input data:
//! - Domain types (bars, the validated time-series table, date-indexed series)
//! - CSV ingest with schema and quality checks
//! - Single-series rolling indicators behind the `Indicator` trait
//! - Whole-series statistics (correlation, PCA, seasonal decomposition)
//!
//! Orchestration, configuration, and persistence live in `stocklens-runner`.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod stats;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed to analyzer threads are Send + Sync.
    ///
    /// The runner fans the analyzers out on a rayon pool that shares one
    /// `&TimeSeriesTable`. If any type fails this check, the build breaks.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::TimeSeriesTable>();
        require_sync::<domain::TimeSeriesTable>();
        require_send::<domain::Series>();
        require_sync::<domain::Series>();
        require_send::<domain::Field>();
        require_sync::<domain::Field>();

        // Errors cross thread boundaries inside results
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<stats::StatsError>();
        require_sync::<stats::StatsError>();

        // Indicators
        require_send::<indicators::Sma>();
        require_sync::<indicators::Sma>();
        require_send::<indicators::Ema>();
        require_sync::<indicators::Ema>();
        require_send::<indicators::Rsi>();
        require_sync::<indicators::Rsi>();
        require_send::<indicators::Bollinger>();
        require_sync::<indicators::Bollinger>();
        require_send::<indicators::RollingStd>();
        require_sync::<indicators::RollingStd>();
        require_send::<indicators::PctChange>();
        require_sync::<indicators::PctChange>();

        // Statistics outputs
        require_send::<stats::CorrelationMatrix>();
        require_sync::<stats::CorrelationMatrix>();
        require_send::<stats::PcaResult>();
        require_sync::<stats::PcaResult>();
        require_send::<stats::Decomposition>();
        require_sync::<stats::Decomposition>();
    }

    /// Indicators are usable as trait objects, so a caller can hold a
    /// heterogeneous list of them.
    #[test]
    fn indicators_are_object_safe() {
        let list: Vec<Box<dyn indicators::Indicator>> = vec![
            Box::new(indicators::Sma::new(3)),
            Box::new(indicators::Ema::new(3)),
            Box::new(indicators::Rsi::new(3)),
        ];
        let values = [1.0, 2.0, 3.0, 2.0, 4.0, 5.0];
        for ind in &list {
            let out = ind.compute(&values);
            assert_eq!(out.len(), values.len());
            assert!(out[..ind.lookback()].iter().all(|v| v.is_nan()));
        }
    }
}
