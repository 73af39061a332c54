//! Principal component analysis over standardized columns.
//!
//! Rows with any non-finite value are dropped first. Each column is then
//! centered and scaled by its population standard deviation; a column with
//! zero spread is only centered. Components come from the eigenvectors of
//! the (ddof = 1) covariance of the standardized data, largest first, and
//! each is signed so that its largest-magnitude loading is positive.
//! When every column is constant the scores are all zero and every
//! explained-variance ratio is 0.

use super::eigen::symmetric_eigen;
use super::{mean, std_dev, StatsError};

#[derive(Debug, Clone, PartialEq)]
pub struct PcaResult {
    /// Indices into the input of the rows that were used.
    pub rows: Vec<usize>,
    /// Projected coordinates, one `Vec` of length `n_components` per used row.
    pub scores: Vec<Vec<f64>>,
    /// Loadings, one `Vec` per component.
    pub components: Vec<Vec<f64>>,
    pub explained_variance: Vec<f64>,
    pub explained_variance_ratio: Vec<f64>,
}

pub fn pca(columns: &[&[f64]], n_components: usize) -> Result<PcaResult, StatsError> {
    let k = columns.len();
    if n_components == 0 || n_components > k {
        return Err(StatsError::InvalidParameter(format!(
            "n_components must be in 1..={k}, got {n_components}"
        )));
    }
    let n = columns[0].len();
    if let Some(col) = columns.iter().find(|c| c.len() != n) {
        return Err(StatsError::LengthMismatch(n, col.len()));
    }

    let rows: Vec<usize> = (0..n)
        .filter(|&i| columns.iter().all(|c| c[i].is_finite()))
        .collect();
    if rows.len() < 2 {
        return Err(StatsError::InsufficientData {
            needed: 2,
            actual: rows.len(),
        });
    }

    // Standardized data, column-major.
    let standardized: Vec<Vec<f64>> = columns
        .iter()
        .map(|c| {
            let kept: Vec<f64> = rows.iter().map(|&i| c[i]).collect();
            let m = mean(&kept);
            let sd = std_dev(&kept, 0);
            let scale = if sd > 0.0 { sd } else { 1.0 };
            kept.iter().map(|v| (v - m) / scale).collect()
        })
        .collect();

    let m = rows.len();
    let mut cov = vec![vec![0.0; k]; k];
    for i in 0..k {
        for j in i..k {
            let s: f64 = standardized[i]
                .iter()
                .zip(&standardized[j])
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / (m - 1) as f64;
            cov[i][j] = s;
            cov[j][i] = s;
        }
    }

    let eig = symmetric_eigen(&cov)?;
    let total: f64 = eig.values.iter().map(|v| v.max(0.0)).sum();

    let components: Vec<Vec<f64>> = eig
        .vectors
        .iter()
        .take(n_components)
        .map(|vec| orient(vec))
        .collect();
    let explained_variance: Vec<f64> = eig
        .values
        .iter()
        .take(n_components)
        .map(|v| v.max(0.0))
        .collect();
    let explained_variance_ratio = explained_variance
        .iter()
        .map(|v| if total > 0.0 { v / total } else { 0.0 })
        .collect();

    let scores = (0..m)
        .map(|r| {
            components
                .iter()
                .map(|comp| (0..k).map(|c| standardized[c][r] * comp[c]).sum())
                .collect()
        })
        .collect();

    Ok(PcaResult {
        rows,
        scores,
        components,
        explained_variance,
        explained_variance_ratio,
    })
}

/// Flip the vector so its largest-magnitude entry is positive.
fn orient(vector: &[f64]) -> Vec<f64> {
    let pivot = vector
        .iter()
        .copied()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .unwrap_or(0.0);
    if pivot < 0.0 {
        vector.iter().map(|v| -v).collect()
    } else {
        vector.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn perfectly_correlated_columns_load_on_first_component() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [10.0, 20.0, 30.0, 40.0, 50.0];
        let res = pca(&[&a, &b], 2).unwrap();
        assert_approx(res.explained_variance_ratio[0], 1.0, 1e-9);
        assert_approx(res.explained_variance_ratio[1], 0.0, 1e-9);
        let h = 1.0 / 2.0_f64.sqrt();
        assert_approx(res.components[0][0], h, 1e-9);
        assert_approx(res.components[0][1], h, 1e-9);
    }

    #[test]
    fn scores_are_centered_with_component_variance() {
        let a = [1.0, 3.0, 2.0, 5.0, 4.0, 7.0];
        let b = [2.0, 1.0, 4.0, 3.0, 6.0, 5.0];
        let res = pca(&[&a, &b], 2).unwrap();
        assert_eq!(res.scores.len(), 6);
        for pc in 0..2 {
            let col: Vec<f64> = res.scores.iter().map(|s| s[pc]).collect();
            assert_approx(mean(&col), 0.0, 1e-9);
            assert_approx(std_dev(&col, 1).powi(2), res.explained_variance[pc], 1e-9);
        }
        let sum: f64 = res.explained_variance_ratio.iter().sum();
        assert_approx(sum, 1.0, 1e-12);
    }

    #[test]
    fn drops_incomplete_rows() {
        let a = [f64::NAN, 1.0, 2.0, 3.0];
        let b = [5.0, 2.0, 1.0, 4.0];
        let res = pca(&[&a, &b], 1).unwrap();
        assert_eq!(res.rows, vec![1, 2, 3]);
        assert_eq!(res.scores.len(), 3);
    }

    #[test]
    fn largest_loading_is_positive() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 3.0, 2.5, 1.0];
        let res = pca(&[&a, &b], 2).unwrap();
        for comp in &res.components {
            let pivot = comp.iter().copied().max_by(|x, y| x.abs().total_cmp(&y.abs())).unwrap();
            assert!(pivot > 0.0);
        }
    }

    #[test]
    fn constant_column_is_centered_only() {
        let a = [1.0, 2.0, 3.0];
        let b = [7.0, 7.0, 7.0];
        let res = pca(&[&a, &b], 2).unwrap();
        assert_approx(res.explained_variance_ratio[0], 1.0, 1e-12);
    }

    #[test]
    fn all_constant_columns_project_to_origin() {
        let a = [4.0, 4.0, 4.0];
        let b = [9.0, 9.0, 9.0];
        let res = pca(&[&a, &b], 2).unwrap();
        assert_eq!(res.rows, vec![0, 1, 2]);
        assert!(res.scores.iter().flatten().all(|&s| s == 0.0));
        assert_eq!(res.explained_variance_ratio, vec![0.0, 0.0]);
    }

    #[test]
    fn rejects_bad_component_count() {
        let a = [1.0, 2.0];
        assert!(matches!(
            pca(&[&a], 2),
            Err(StatsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn too_few_complete_rows() {
        let a = [1.0, f64::NAN];
        let b = [1.0, 2.0];
        assert_eq!(
            pca(&[&a, &b], 1),
            Err(StatsError::InsufficientData {
                needed: 2,
                actual: 1
            })
        );
    }
}
