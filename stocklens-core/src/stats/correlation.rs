//! Pearson correlation and correlation matrices.
//!
//! Each pair uses only the rows where both values are finite (pairwise
//! complete observations). The matrix is filled once per pair and mirrored,
//! and the diagonal is set to exactly 1.0, so symmetry holds bit-for-bit.
//! A pair with a constant column or fewer than two complete rows has no
//! coefficient and is stored as `None` (`null` in JSON).

use serde::{Deserialize, Serialize};

use super::StatsError;

/// Labeled square correlation matrix, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient between two labeled columns, `None` if either label is
    /// unknown or the coefficient is undefined.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        *self.values.get(i)?.get(j)?
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.values.len();
        (0..n).all(|i| (0..n).all(|j| self.values[i][j] == self.values[j][i]))
    }

    /// True when every off-diagonal coefficient is defined.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|row| row.iter().all(Option::is_some))
    }
}

/// Pearson correlation of `x` and `y` over pairwise-complete rows.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch(x.len(), y.len()));
    }
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect();
    let n = pairs.len();
    if n < 2 {
        return Err(StatsError::InsufficientData {
            needed: 2,
            actual: n,
        });
    }

    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n as f64;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 {
        return Err(StatsError::ZeroVariance("first series".into()));
    }
    if syy == 0.0 {
        return Err(StatsError::ZeroVariance("second series".into()));
    }
    Ok((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Correlation matrix over named columns of equal length.
///
/// Only a length mismatch is an error; undefined pairs become `None`.
pub fn correlation_matrix(columns: &[(&str, &[f64])]) -> Result<CorrelationMatrix, StatsError> {
    let k = columns.len();
    if let Some((_, first)) = columns.first() {
        if let Some((_, col)) = columns.iter().find(|(_, c)| c.len() != first.len()) {
            return Err(StatsError::LengthMismatch(first.len(), col.len()));
        }
    }

    let mut values = vec![vec![None; k]; k];
    for i in 0..k {
        values[i][i] = Some(1.0);
        for j in (i + 1)..k {
            let r = match pearson(columns[i].1, columns[j].1) {
                Ok(r) => Some(r),
                Err(StatsError::ZeroVariance(_) | StatsError::InsufficientData { .. }) => None,
                Err(other) => return Err(other),
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    Ok(CorrelationMatrix {
        columns: columns.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    })
}
