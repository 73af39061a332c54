//! Market sentiment: returns, rolling volatility, and volume split by the
//! sign of the day's return.
//!
//! Rows with a zero return, and row 0 (no return), fall in neither volume
//! partition.

use serde::{Deserialize, Serialize};
use stocklens_core::domain::{Series, TimeSeriesTable};
use stocklens_core::indicators::{Indicator, PctChange, RollingStd};

use super::{check_window, Analyzer, TransformError};
use crate::config::AnalysisParams;
use crate::result::ModuleName;

/// Sparse series: each carries only the dates in its partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSentiment {
    pub positive_volume: Series,
    pub negative_volume: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub returns: Series,
    pub volatility: Series,
    pub volume_sentiment: VolumeSentiment,
}

#[derive(Debug, Clone, Copy)]
pub struct SentimentAnalyzer {
    pub volatility_window: usize,
}

impl SentimentAnalyzer {
    pub fn from_params(params: &AnalysisParams) -> Self {
        Self {
            volatility_window: params.volatility_window,
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::from_params(&AnalysisParams::default())
    }
}

impl Analyzer for SentimentAnalyzer {
    type Output = SentimentAnalysis;

    fn module(&self) -> ModuleName {
        ModuleName::SentimentAnalysis
    }

    fn analyze(&self, table: &TimeSeriesTable) -> Result<SentimentAnalysis, TransformError> {
        check_window("volatility_window", self.volatility_window, 2)?;

        let dates = table.dates();
        let returns = PctChange::daily().compute(table.close());
        let volatility = RollingStd::new(self.volatility_window).compute(&returns);

        let partition = |keep: fn(f64) -> bool| {
            Series::from_pairs(
                dates
                    .iter()
                    .zip(&returns)
                    .zip(table.volume())
                    .filter(|((_, r), _)| keep(**r))
                    .map(|((d, _), v)| (*d, *v)),
            )
        };

        Ok(SentimentAnalysis {
            returns: Series::aligned(dates, &returns),
            volatility: Series::aligned(dates, &volatility),
            volume_sentiment: VolumeSentiment {
                positive_volume: partition(|r| r > 0.0),
                negative_volume: partition(|r| r < 0.0),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{self, assert_approx, DEFAULT_EPSILON};
    use std::collections::HashSet;

    #[test]
    fn returns_formula() {
        let table = fixtures::table(&[100.0, 110.0, 99.0], &[1.0, 2.0, 3.0]);
        let out = SentimentAnalyzer::default().analyze(&table).unwrap();
        assert!(out.returns.get(0).is_none());
        assert_approx(out.returns.get(1).unwrap(), 0.1, DEFAULT_EPSILON);
        assert_approx(out.returns.get(2).unwrap(), -0.1, DEFAULT_EPSILON);
    }

    #[test]
    fn volume_partitions_are_disjoint_and_cover() {
        // Up, flat, down, up, down
        let closes = [10.0, 11.0, 11.0, 10.5, 12.0, 11.0];
        let volumes = [100.0, 200.0, 300.0, 400.0, 500.0, 600.0];
        let table = fixtures::table(&closes, &volumes);
        let out = SentimentAnalyzer::default().analyze(&table).unwrap();
        let vs = &out.volume_sentiment;

        let pos: HashSet<_> = vs.positive_volume.index.iter().collect();
        let neg: HashSet<_> = vs.negative_volume.index.iter().collect();
        assert!(pos.is_disjoint(&neg));
        assert_eq!(pos.len(), 2);
        assert_eq!(neg.len(), 2);
        // Row 0 and the flat row are the remainder
        assert_eq!(pos.len() + neg.len() + 2, table.len());

        let dates = table.dates();
        assert_eq!(vs.positive_volume.value_at(dates[1]), Some(200.0));
        assert_eq!(vs.positive_volume.value_at(dates[4]), Some(500.0));
        assert_eq!(vs.negative_volume.value_at(dates[3]), Some(400.0));
        assert_eq!(vs.negative_volume.value_at(dates[2]), None);
    }

    #[test]
    fn volatility_starts_one_row_after_window() {
        let table = fixtures::wavy_table(40);
        let out = SentimentAnalyzer::default().analyze(&table).unwrap();
        assert!(out.volatility.get(19).is_none());
        assert!(out.volatility.get(20).is_some());
        assert_eq!(out.volatility.len(), 40);
    }

    #[test]
    fn single_row_volatility_window_is_error() {
        let table = fixtures::wavy_table(30);
        let err = SentimentAnalyzer { volatility_window: 1 }
            .analyze(&table)
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidParameter("volatility_window must be >= 2, got 1".into())
        );
    }
}
