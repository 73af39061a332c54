//! Price trend: moving averages of Close and its daily percentage change.

use serde::{Deserialize, Serialize};
use stocklens_core::domain::{Series, TimeSeriesTable};
use stocklens_core::indicators::{Ema, PctChange, Sma};

use super::{apply, Analyzer, TransformError};
use crate::result::ModuleName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub sma_20: Series,
    pub sma_50: Series,
    pub ema_20: Series,
    pub ema_50: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTrend {
    pub moving_averages: MovingAverages,
    pub price_change: Series,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PriceAnalyzer;

impl Analyzer for PriceAnalyzer {
    type Output = PriceTrend;

    fn module(&self) -> ModuleName {
        ModuleName::PriceTrend
    }

    fn analyze(&self, table: &TimeSeriesTable) -> Result<PriceTrend, TransformError> {
        let close = table.close();
        Ok(PriceTrend {
            moving_averages: MovingAverages {
                sma_20: apply(&Sma::new(20), table, close),
                sma_50: apply(&Sma::new(50), table, close),
                ema_20: apply(&Ema::new(20), table, close),
                ema_50: apply(&Ema::new(50), table, close),
            },
            price_change: apply(&PctChange::daily(), table, close),
        })
    }
}
