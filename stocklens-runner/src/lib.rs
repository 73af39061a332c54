//! StockLens Runner: analysis modules, pipeline coordination, persistence.
//!
//! This crate builds on `stocklens-core` to provide:
//! - The six analyzers (price, volume, technical, sentiment, seasonal, correlation)
//! - The `ResultBundle` with one typed outcome per module
//! - The pipeline state machine with sequential or rayon fan-out
//! - TOML configuration
//! - Atomic JSON persistence with a provenance sidecar
//! - A per-module run summary

pub mod analyzers;
pub mod config;
pub mod export;
pub mod pipeline;
pub mod result;
pub mod summary;

pub use analyzers::{Analyzer, TransformError};
pub use config::{AnalysisParams, ConfigError, PipelineConfig};
pub use export::{load_bundle, load_metadata, save_bundle, BundleMetadata, ExportError, SCHEMA_VERSION};
pub use pipeline::{analyze, AnalysisRun, Pipeline, PipelineError, PipelineState};
pub use result::{ModuleName, ModuleOutcome, ModuleStatus, ResultBundle, TransformFailure};
pub use summary::BundleSummary;

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn result_bundle_is_send_sync() {
        assert_send::<ResultBundle>();
        assert_sync::<ResultBundle>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<PipelineConfig>();
        assert_sync::<PipelineConfig>();
        assert_send::<AnalysisParams>();
        assert_sync::<AnalysisParams>();
    }

    #[test]
    fn analyzers_are_send_sync() {
        assert_send::<analyzers::PriceAnalyzer>();
        assert_sync::<analyzers::PriceAnalyzer>();
        assert_send::<analyzers::TechnicalAnalyzer>();
        assert_sync::<analyzers::TechnicalAnalyzer>();
        assert_send::<analyzers::SeasonalAnalyzer>();
        assert_sync::<analyzers::SeasonalAnalyzer>();
        assert_send::<analyzers::CorrelationAnalyzer>();
        assert_sync::<analyzers::CorrelationAnalyzer>();
    }

    #[test]
    fn pipeline_is_send_sync() {
        assert_send::<Pipeline>();
        assert_sync::<Pipeline>();
        assert_send::<PipelineError>();
        assert_sync::<PipelineError>();
    }

    #[test]
    fn metadata_is_send_sync() {
        assert_send::<BundleMetadata>();
        assert_sync::<BundleMetadata>();
    }
}
