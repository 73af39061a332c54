//! Technical indicators over Close: RSI and Bollinger bands.

use serde::{Deserialize, Serialize};
use stocklens_core::domain::{Series, TimeSeriesTable};
use stocklens_core::indicators::{Bollinger, Rsi};

use super::{apply, check_window, Analyzer, TransformError};
use crate::config::AnalysisParams;
use crate::result::ModuleName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: Series,
    pub lower: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub rsi: Series,
    pub bollinger_bands: BollingerBands,
}

#[derive(Debug, Clone, Copy)]
pub struct TechnicalAnalyzer {
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_width: f64,
}

impl TechnicalAnalyzer {
    pub fn from_params(params: &AnalysisParams) -> Self {
        Self {
            rsi_period: params.rsi_period,
            bollinger_period: params.bollinger_period,
            bollinger_width: params.bollinger_width,
        }
    }
}

impl Default for TechnicalAnalyzer {
    fn default() -> Self {
        Self::from_params(&AnalysisParams::default())
    }
}

impl Analyzer for TechnicalAnalyzer {
    type Output = TechnicalAnalysis;

    fn module(&self) -> ModuleName {
        ModuleName::TechnicalAnalysis
    }

    fn analyze(&self, table: &TimeSeriesTable) -> Result<TechnicalAnalysis, TransformError> {
        check_window("rsi_period", self.rsi_period, 1)?;
        check_window("bollinger_period", self.bollinger_period, 2)?;
        if !(self.bollinger_width.is_finite() && self.bollinger_width > 0.0) {
            return Err(TransformError::InvalidParameter(format!(
                "bollinger_width must be a positive number, got {}",
                self.bollinger_width
            )));
        }

        let close = table.close();
        let (period, width) = (self.bollinger_period, self.bollinger_width);
        Ok(TechnicalAnalysis {
            rsi: apply(&Rsi::new(self.rsi_period), table, close),
            bollinger_bands: BollingerBands {
                upper: apply(&Bollinger::upper(period, width), table, close),
                lower: apply(&Bollinger::lower(period, width), table, close),
            },
        })
    }
}
