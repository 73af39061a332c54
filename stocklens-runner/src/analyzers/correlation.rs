//! Correlation between Close and Volume, and a two-component PCA of the pair.
//!
//! `pca_index[k]` is the date of the row that produced `pca_components[k]`,
//! so the projection stays attributable even if rows were dropped.
//! A constant column leaves its coefficients `null` but the PCA still runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stocklens_core::domain::TimeSeriesTable;
use stocklens_core::stats::{correlation_matrix, pca, CorrelationMatrix};

use super::{Analyzer, TransformError};
use crate::result::ModuleName;

const COMPONENTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationAnalysis {
    pub correlation_matrix: CorrelationMatrix,
    pub pca_components: Vec<[f64; COMPONENTS]>,
    pub pca_index: Vec<NaiveDate>,
    pub explained_variance_ratio: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationAnalyzer;

impl Analyzer for CorrelationAnalyzer {
    type Output = CorrelationAnalysis;

    fn module(&self) -> ModuleName {
        ModuleName::CorrelationAnalysis
    }

    fn analyze(&self, table: &TimeSeriesTable) -> Result<CorrelationAnalysis, TransformError> {
        let close = table.close();
        let volume = table.volume();

        let matrix = correlation_matrix(&[("Close", close), ("Volume", volume)])?;
        let projection = pca(&[close, volume], COMPONENTS)?;

        let dates = table.dates();
        Ok(CorrelationAnalysis {
            correlation_matrix: matrix,
            pca_components: projection
                .scores
                .iter()
                .map(|row| [row[0], row[1]])
                .collect(),
            pca_index: projection.rows.iter().map(|&i| dates[i]).collect(),
            explained_variance_ratio: projection.explained_variance_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{self, assert_approx};

    #[test]
    fn identical_columns_correlate_perfectly() {
        let values: Vec<f64> = (1..=30).map(|i| (i * 7 % 13) as f64 + 1.0).collect();
        let table = fixtures::table(&values, &values);
        let out = CorrelationAnalyzer.analyze(&table).unwrap();

        let m = &out.correlation_matrix;
        assert_eq!(m.columns, vec!["Close".to_string(), "Volume".to_string()]);
        assert_approx(m.get("Close", "Volume").unwrap(), 1.0, 1e-12);
        assert_eq!(m.values[0][1], m.values[1][0]);
        assert_eq!(m.values[0][0], Some(1.0));
        assert_eq!(m.values[1][1], Some(1.0));
        assert_approx(out.explained_variance_ratio[0], 1.0, 1e-9);
    }

    #[test]
    fn pca_index_follows_table() {
        let table = fixtures::wavy_table(25);
        let out = CorrelationAnalyzer.analyze(&table).unwrap();
        assert_eq!(out.pca_components.len(), 25);
        assert_eq!(out.pca_index, table.dates());
        let total: f64 = out.explained_variance_ratio.iter().sum();
        assert_approx(total, 1.0, 1e-12);
    }

    #[test]
    fn constant_volume_keeps_matrix_and_projection() {
        let closes: Vec<f64> = (50..80).map(f64::from).collect();
        let table = fixtures::table(&closes, &[1000.0; 30]);
        let out = CorrelationAnalyzer.analyze(&table).unwrap();

        let m = &out.correlation_matrix;
        assert_eq!(m.values[0][0], Some(1.0));
        assert_eq!(m.values[1][1], Some(1.0));
        assert_eq!(m.values[0][1], None);
        assert!(m.is_symmetric());

        assert_eq!(out.pca_components.len(), 30);
        assert_approx(out.explained_variance_ratio[0], 1.0, 1e-12);
        assert_approx(out.explained_variance_ratio[1], 0.0, 1e-12);
        assert!(out.pca_components.iter().all(|pc| pc[1].abs() < 1e-9));
    }

    #[test]
    fn constant_close_and_volume_still_complete() {
        let table = fixtures::table(&[42.0; 5], &[500.0; 5]);
        let out = CorrelationAnalyzer.analyze(&table).unwrap();
        assert_eq!(out.correlation_matrix.get("Close", "Volume"), None);
        assert_eq!(out.pca_components, vec![[0.0, 0.0]; 5]);
        assert_eq!(out.explained_variance_ratio, vec![0.0, 0.0]);
    }

    #[test]
    fn single_row_is_insufficient() {
        let table = fixtures::table(&[1.0], &[1.0]);
        let err = CorrelationAnalyzer.analyze(&table).unwrap_err();
        assert!(matches!(err, TransformError::InsufficientData { needed: 2, actual: 1 }));
    }
}
