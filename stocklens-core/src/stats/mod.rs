//! Whole-series statistics: correlation, PCA, seasonal decomposition.
//!
//! Unlike indicators these are not rolling transforms; each consumes one or
//! more complete series and can fail when the data cannot support the
//! statistic (too few rows, zero variance).

pub mod correlation;
pub mod decompose;
pub mod eigen;
pub mod pca;

pub use correlation::{correlation_matrix, pearson, CorrelationMatrix};
pub use decompose::{seasonal_decompose, Decomposition};
pub use eigen::{symmetric_eigen, SymmetricEigen};
pub use pca::{pca, PcaResult};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("insufficient data: need at least {needed} observations, got {actual}")]
    InsufficientData { needed: usize, actual: usize },

    #[error("zero variance in {0}")]
    ZeroVariance(String),

    #[error("series length mismatch: {0} vs {1}")]
    LengthMismatch(usize, usize),

    #[error("non-finite value at position {0}")]
    NonFinite(usize),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("eigen solver did not converge after {0} sweeps")]
    NoConvergence(usize),
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance with divisor `n - ddof`; NaN when `n <= ddof`.
pub fn variance(values: &[f64], ddof: usize) -> f64 {
    let n = values.len();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - ddof) as f64
}

pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    variance(values, ddof).sqrt()
}
