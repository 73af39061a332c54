//! The result bundle: one outcome per analysis module.
//!
//! `ResultBundle` has exactly one field per canonical module name, so the
//! serialized JSON always carries all six keys. Each field is either the
//! module's data or a failure record; a failure in one module never hides
//! another module's data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analyzers::{
    CorrelationAnalysis, PriceTrend, SeasonalAnalysis, SentimentAnalysis, TechnicalAnalysis,
    TransformError, VolumeAnalysis,
};

/// Canonical module identifiers, in bundle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleName {
    PriceTrend,
    VolumeAnalysis,
    TechnicalAnalysis,
    SentimentAnalysis,
    SeasonalAnalysis,
    CorrelationAnalysis,
}

impl ModuleName {
    pub const ALL: [ModuleName; 6] = [
        ModuleName::PriceTrend,
        ModuleName::VolumeAnalysis,
        ModuleName::TechnicalAnalysis,
        ModuleName::SentimentAnalysis,
        ModuleName::SeasonalAnalysis,
        ModuleName::CorrelationAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleName::PriceTrend => "price_trend",
            ModuleName::VolumeAnalysis => "volume_analysis",
            ModuleName::TechnicalAnalysis => "technical_analysis",
            ModuleName::SentimentAnalysis => "sentiment_analysis",
            ModuleName::SeasonalAnalysis => "seasonal_analysis",
            ModuleName::CorrelationAnalysis => "correlation_analysis",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    TransformError,
}

/// Serialized in place of a module's data when it failed:
/// `{"kind": "transform_error", "module": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformFailure {
    pub kind: FailureKind,
    pub module: ModuleName,
    pub message: String,
}

impl TransformFailure {
    pub fn new(module: ModuleName, err: &TransformError) -> Self {
        Self {
            kind: FailureKind::TransformError,
            module,
            message: err.to_string(),
        }
    }
}

/// A single module's outcome.
///
/// Untagged: a completed module serializes as its data object, a failed one
/// as a `TransformFailure`. `Failed` is listed first so deserialization tries
/// the strict failure shape before the data shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleOutcome<T> {
    Failed(TransformFailure),
    Completed(T),
}

impl<T> ModuleOutcome<T> {
    pub fn from_result(module: ModuleName, result: Result<T, TransformError>) -> Self {
        match result {
            Ok(data) => ModuleOutcome::Completed(data),
            Err(err) => ModuleOutcome::Failed(TransformFailure::new(module, &err)),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ModuleOutcome::Completed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ModuleOutcome::Completed(data) => Some(data),
            ModuleOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&TransformFailure> {
        match self {
            ModuleOutcome::Failed(failure) => Some(failure),
            ModuleOutcome::Completed(_) => None,
        }
    }
}

/// Aggregated output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultBundle {
    pub price_trend: ModuleOutcome<PriceTrend>,
    pub volume_analysis: ModuleOutcome<VolumeAnalysis>,
    pub technical_analysis: ModuleOutcome<TechnicalAnalysis>,
    pub sentiment_analysis: ModuleOutcome<SentimentAnalysis>,
    pub seasonal_analysis: ModuleOutcome<SeasonalAnalysis>,
    pub correlation_analysis: ModuleOutcome<CorrelationAnalysis>,
}

/// Per-module status, independent of the payload type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModuleStatus {
    Completed,
    Failed { message: String },
}

impl ResultBundle {
    /// Status of every module in canonical order.
    pub fn statuses(&self) -> Vec<(ModuleName, ModuleStatus)> {
        fn status<T>(outcome: &ModuleOutcome<T>) -> ModuleStatus {
            match outcome.failure() {
                Some(f) => ModuleStatus::Failed {
                    message: f.message.clone(),
                },
                None => ModuleStatus::Completed,
            }
        }
        vec![
            (ModuleName::PriceTrend, status(&self.price_trend)),
            (ModuleName::VolumeAnalysis, status(&self.volume_analysis)),
            (ModuleName::TechnicalAnalysis, status(&self.technical_analysis)),
            (ModuleName::SentimentAnalysis, status(&self.sentiment_analysis)),
            (ModuleName::SeasonalAnalysis, status(&self.seasonal_analysis)),
            (ModuleName::CorrelationAnalysis, status(&self.correlation_analysis)),
        ]
    }

    pub fn completed_count(&self) -> usize {
        self.statuses()
            .iter()
            .filter(|(_, s)| *s == ModuleStatus::Completed)
            .count()
    }

    pub fn failures(&self) -> Vec<(ModuleName, String)> {
        self.statuses()
            .into_iter()
            .filter_map(|(name, s)| match s {
                ModuleStatus::Failed { message } => Some((name, message)),
                ModuleStatus::Completed => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{Analyzer, PriceAnalyzer, SeasonalAnalyzer};
    use crate::analyzers::fixtures;

    #[test]
    fn module_names_match_serde() {
        for name in ModuleName::ALL {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.as_str()));
        }
    }

    #[test]
    fn failure_serializes_as_record() {
        let err = TransformError::InsufficientData {
            needed: 504,
            actual: 100,
        };
        let outcome: ModuleOutcome<PriceTrend> =
            ModuleOutcome::from_result(ModuleName::SeasonalAnalysis, Err(err));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["kind"], "transform_error");
        assert_eq!(value["module"], "seasonal_analysis");
        assert_eq!(
            value["message"],
            "insufficient data: need at least 504 rows, got 100"
        );
    }

    #[test]
    fn outcomes_roundtrip_untagged() {
        let table = fixtures::wavy_table(30);
        let ok = ModuleOutcome::from_result(ModuleName::PriceTrend, PriceAnalyzer.analyze(&table));
        let json = serde_json::to_string(&ok).unwrap();
        let back: ModuleOutcome<PriceTrend> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ok);
        assert!(back.is_completed());

        let failed = ModuleOutcome::from_result(
            ModuleName::SeasonalAnalysis,
            SeasonalAnalyzer::default().analyze(&table),
        );
        let json = serde_json::to_string(&failed).unwrap();
        let back: ModuleOutcome<SeasonalAnalysis> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, failed);
        assert_eq!(back.failure().unwrap().module, ModuleName::SeasonalAnalysis);
    }
}
