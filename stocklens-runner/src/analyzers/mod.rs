//! The six analysis modules.
//!
//! Each analyzer reads the shared, immutable `TimeSeriesTable` and produces
//! its own typed sub-bundle. Analyzers never see each other's output, so
//! they can run in any order or concurrently.

pub mod correlation;
pub mod price;
pub mod seasonal;
pub mod sentiment;
pub mod technical;
pub mod volume;

pub use correlation::{CorrelationAnalysis, CorrelationAnalyzer};
pub use price::{MovingAverages, PriceAnalyzer, PriceTrend};
pub use seasonal::{SeasonalAnalysis, SeasonalAnalyzer};
pub use sentiment::{SentimentAnalysis, SentimentAnalyzer, VolumeSentiment};
pub use technical::{BollingerBands, TechnicalAnalysis, TechnicalAnalyzer};
pub use volume::{VolumeAnalysis, VolumeAnalyzer, VolumeAverages};

use serde::Serialize;
use stocklens_core::domain::{Series, TimeSeriesTable};
use stocklens_core::indicators::Indicator;
use stocklens_core::stats::StatsError;
use thiserror::Error;

use crate::result::ModuleName;

/// A module-local failure. Recorded in the bundle; never aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("insufficient data: need at least {needed} rows, got {actual}")]
    InsufficientData { needed: usize, actual: usize },

    #[error("zero variance in {0}")]
    ZeroVariance(String),

    #[error("degenerate input: {0}")]
    Degenerate(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<StatsError> for TransformError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::InsufficientData { needed, actual } => {
                TransformError::InsufficientData { needed, actual }
            }
            StatsError::ZeroVariance(what) => TransformError::ZeroVariance(what),
            StatsError::InvalidParameter(what) => TransformError::InvalidParameter(what),
            other => TransformError::Degenerate(other.to_string()),
        }
    }
}

/// Reject a window shorter than `min` before any indicator is built.
pub(crate) fn check_window(name: &str, value: usize, min: usize) -> Result<(), TransformError> {
    if value < min {
        return Err(TransformError::InvalidParameter(format!(
            "{name} must be >= {min}, got {value}"
        )));
    }
    Ok(())
}

/// One analysis module.
///
/// # Isolation
/// `analyze` receives only the table. An analyzer cannot observe another
/// module's result or any mutable shared state.
pub trait Analyzer: Send + Sync {
    type Output: Serialize + Send;

    /// Canonical module this analyzer fills in the bundle.
    fn module(&self) -> ModuleName;

    fn analyze(&self, table: &TimeSeriesTable) -> Result<Self::Output, TransformError>;
}

/// Run an indicator over one column and index the result by the table dates.
pub(crate) fn apply(indicator: &dyn Indicator, table: &TimeSeriesTable, values: &[f64]) -> Series {
    Series::aligned(table.dates(), &indicator.compute(values))
}
