//! Volume analysis: moving averages of Volume and its daily change.

use serde::{Deserialize, Serialize};
use stocklens_core::domain::{Series, TimeSeriesTable};
use stocklens_core::indicators::{PctChange, Sma};

use super::{apply, Analyzer, TransformError};
use crate::result::ModuleName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAverages {
    pub volume_ma_20: Series,
    pub volume_ma_50: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAnalysis {
    pub volume_averages: VolumeAverages,
    pub volume_change: Series,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeAnalyzer;

impl Analyzer for VolumeAnalyzer {
    type Output = VolumeAnalysis;

    fn module(&self) -> ModuleName {
        ModuleName::VolumeAnalysis
    }

    fn analyze(&self, table: &TimeSeriesTable) -> Result<VolumeAnalysis, TransformError> {
        let volume = table.volume();
        Ok(VolumeAnalysis {
            volume_averages: VolumeAverages {
                volume_ma_20: apply(&Sma::new(20), table, volume),
                volume_ma_50: apply(&Sma::new(50), table, volume),
            },
            volume_change: apply(&PctChange::daily(), table, volume),
        })
    }
}
