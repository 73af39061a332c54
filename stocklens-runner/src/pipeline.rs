//! Pipeline coordinator: load, fan out to the six analyzers, persist.
//!
//! State machine:
//!
//! ```text
//! NotStarted -> Loading -> LoadFailed            (terminal)
//!                       -> Running -> Completed  (terminal)
//! ```
//!
//! A load failure is fatal and no analyzer runs. Once `Running`, each
//! analyzer's result lands in its own bundle field; a failing analyzer is
//! recorded and the others still run.

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use stocklens_core::data::{load_table, DataError};
use stocklens_core::domain::TimeSeriesTable;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::analyzers::{
    Analyzer, CorrelationAnalyzer, PriceAnalyzer, SeasonalAnalyzer, SentimentAnalyzer,
    TechnicalAnalyzer, VolumeAnalyzer,
};
use crate::config::{AnalysisParams, ConfigError, PipelineConfig};
use crate::export::{save_bundle, BundleMetadata, ExportError};
use crate::result::{ModuleOutcome, ResultBundle};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to load input: {0}")]
    Load(#[from] DataError),

    #[error("failed to persist results: {0}")]
    Serialization(#[from] ExportError),

    #[error("illegal pipeline transition {from:?} -> {to:?}")]
    IllegalTransition {
        from: PipelineState,
        to: PipelineState,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    NotStarted,
    Loading,
    LoadFailed,
    Running,
    Completed,
}

impl PipelineState {
    pub fn can_transition(self, to: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, to),
            (NotStarted, Loading) | (Loading, LoadFailed) | (Loading, Running) | (Running, Completed)
        )
    }

    pub fn transition(self, to: PipelineState) -> Result<PipelineState, PipelineError> {
        if self.can_transition(to) {
            debug!(from = ?self, to = ?to, "pipeline state transition");
            Ok(to)
        } else {
            Err(PipelineError::IllegalTransition { from: self, to })
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::LoadFailed | PipelineState::Completed)
    }
}

/// Everything one successful run produced.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub bundle: ResultBundle,
    pub metadata: BundleMetadata,
    pub bundle_path: PathBuf,
    pub state: PipelineState,
}

/// Runs the full analysis for one configuration.
///
/// Holds only its configuration; every run starts from `NotStarted`.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<AnalysisRun, PipelineError> {
        self.config.validate()?;
        let config = &self.config;

        let state = PipelineState::NotStarted.transition(PipelineState::Loading)?;
        let table = match load_table(&config.input_path) {
            Ok(table) => table,
            Err(err) => {
                state.transition(PipelineState::LoadFailed)?;
                error!(path = %config.input_path.display(), error = %err, "load failed, no analysis run");
                return Err(PipelineError::Load(err));
            }
        };

        let state = state.transition(PipelineState::Running)?;
        let started = Instant::now();
        let bundle = analyze(&table, &config.analysis, config.parallel);
        info!(
            completed = bundle.completed_count(),
            failed = bundle.failures().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis finished"
        );

        let metadata =
            BundleMetadata::describe(&config.input_path, &config.analysis, &table, &bundle);
        let bundle_path = save_bundle(&bundle, &metadata, &config.output_dir)?;
        let state = state.transition(PipelineState::Completed)?;
        info!(path = %bundle_path.display(), "results saved");

        Ok(AnalysisRun {
            bundle,
            metadata,
            bundle_path,
            state,
        })
    }
}

/// Run all six analyzers over a validated table.
///
/// With `parallel`, the analyzers run as a tree of `rayon::join` calls; the
/// bundle is identical either way since each result goes to its own field.
pub fn analyze(table: &TimeSeriesTable, params: &AnalysisParams, parallel: bool) -> ResultBundle {
    let price = PriceAnalyzer;
    let volume = VolumeAnalyzer;
    let technical = TechnicalAnalyzer::from_params(params);
    let sentiment = SentimentAnalyzer::from_params(params);
    let seasonal = SeasonalAnalyzer::from_params(params);
    let correlation = CorrelationAnalyzer;

    if parallel {
        let (left, right) = rayon::join(
            || rayon::join(|| run_module(&price, table), || run_module(&volume, table)),
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || run_module(&technical, table),
                            || run_module(&sentiment, table),
                        )
                    },
                    || {
                        rayon::join(
                            || run_module(&seasonal, table),
                            || run_module(&correlation, table),
                        )
                    },
                )
            },
        );
        let (price_trend, volume_analysis) = left;
        let ((technical_analysis, sentiment_analysis), (seasonal_analysis, correlation_analysis)) =
            right;
        ResultBundle {
            price_trend,
            volume_analysis,
            technical_analysis,
            sentiment_analysis,
            seasonal_analysis,
            correlation_analysis,
        }
    } else {
        ResultBundle {
            price_trend: run_module(&price, table),
            volume_analysis: run_module(&volume, table),
            technical_analysis: run_module(&technical, table),
            sentiment_analysis: run_module(&sentiment, table),
            seasonal_analysis: run_module(&seasonal, table),
            correlation_analysis: run_module(&correlation, table),
        }
    }
}

fn run_module<A: Analyzer>(analyzer: &A, table: &TimeSeriesTable) -> ModuleOutcome<A::Output> {
    let module = analyzer.module();
    let started = Instant::now();
    let result = analyzer.analyze(table);
    match &result {
        Ok(_) => info!(
            module = %module,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "module completed"
        ),
        Err(err) => warn!(module = %module, error = %err, "module failed"),
    }
    ModuleOutcome::from_result(module, result)
}
