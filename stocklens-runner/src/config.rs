//! Serializable pipeline configuration.
//!
//! A run is fully described by a `PipelineConfig`: where to read, where to
//! write, whether to fan the analyzers out in parallel, and the analysis
//! parameters. Stored as TOML; every key is optional and falls back to the
//! defaults below.
//!
//! ```toml
//! input_path = "input_folder/stock_data.csv"
//! output_dir = "output"
//! parallel = true
//!
//! [analysis]
//! rsi_period = 14
//! bollinger_period = 20
//! bollinger_width = 2.0
//! volatility_window = 20
//! seasonal_period = 252
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INPUT_PATH: &str = "input_folder/stock_data.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Price CSV to analyze.
    pub input_path: PathBuf,

    /// Directory receiving `analysis_results.json` and its sidecar.
    pub output_dir: PathBuf,

    /// Run the six analyzers on the rayon pool.
    pub parallel: bool,

    pub analysis: AnalysisParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            parallel: true,
            analysis: AnalysisParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Enables or disables parallel analyzer execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_analysis(mut self, analysis: AnalysisParams) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("input_path must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output_dir must not be empty".into()));
        }
        self.analysis.validate()
    }
}

/// Tunable analysis parameters.
///
/// Moving-average windows are not here: 20 and 50 are part of the output
/// field names (`sma_20`, `volume_ma_50`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisParams {
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_width: f64,
    pub volatility_window: usize,
    /// Rows per seasonal cycle (252 trading days).
    pub seasonal_period: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_width: 2.0,
            volatility_window: 20,
            seasonal_period: 252,
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rsi_period < 1 {
            return Err(ConfigError::Invalid("rsi_period must be >= 1".into()));
        }
        if self.bollinger_period < 2 {
            return Err(ConfigError::Invalid("bollinger_period must be >= 2".into()));
        }
        if !(self.bollinger_width.is_finite() && self.bollinger_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bollinger_width must be a positive number, got {}",
                self.bollinger_width
            )));
        }
        if self.volatility_window < 2 {
            return Err(ConfigError::Invalid("volatility_window must be >= 2".into()));
        }
        if self.seasonal_period < 2 {
            return Err(ConfigError::Invalid("seasonal_period must be >= 2".into()));
        }
        Ok(())
    }
}
