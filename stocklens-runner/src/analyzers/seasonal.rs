//! Seasonal decomposition of Close into trend, seasonal, and residual.

use serde::{Deserialize, Serialize};
use stocklens_core::domain::{Series, TimeSeriesTable};
use stocklens_core::stats::seasonal_decompose;

use super::{Analyzer, TransformError};
use crate::config::AnalysisParams;
use crate::result::ModuleName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAnalysis {
    pub trend: Series,
    pub seasonal: Series,
    pub residual: Series,
}

#[derive(Debug, Clone, Copy)]
pub struct SeasonalAnalyzer {
    /// Rows per cycle; the table needs at least two cycles.
    pub period: usize,
}

impl SeasonalAnalyzer {
    pub fn from_params(params: &AnalysisParams) -> Self {
        Self {
            period: params.seasonal_period,
        }
    }
}

impl Default for SeasonalAnalyzer {
    fn default() -> Self {
        Self::from_params(&AnalysisParams::default())
    }
}

impl Analyzer for SeasonalAnalyzer {
    type Output = SeasonalAnalysis;

    fn module(&self) -> ModuleName {
        ModuleName::SeasonalAnalysis
    }

    fn analyze(&self, table: &TimeSeriesTable) -> Result<SeasonalAnalysis, TransformError> {
        let dates = table.dates();
        let d = seasonal_decompose(table.close(), self.period)?;
        Ok(SeasonalAnalysis {
            trend: Series::aligned(dates, &d.trend),
            seasonal: Series::aligned(dates, &d.seasonal),
            residual: Series::aligned(dates, &d.residual),
        })
    }
}
