//! Symmetric eigendecomposition by cyclic Jacobi rotations.
//!
//! Small dense matrices only (the correlation module works with 2x2). Each
//! sweep rotates away every off-diagonal element in turn; iteration stops
//! once the off-diagonal mass is negligible relative to the matrix norm.

use super::StatsError;

const MAX_SWEEPS: usize = 100;
const TOLERANCE: f64 = 1e-24;

/// Eigenvalues sorted descending, with matching unit eigenvectors.
///
/// `vectors[k]` is the eigenvector for `values[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricEigen {
    pub values: Vec<f64>,
    pub vectors: Vec<Vec<f64>>,
}

pub fn symmetric_eigen(matrix: &[Vec<f64>]) -> Result<SymmetricEigen, StatsError> {
    let n = matrix.len();
    if let Some(row) = matrix.iter().find(|row| row.len() != n) {
        return Err(StatsError::LengthMismatch(n, row.len()));
    }
    if let Some(pos) = matrix.iter().flatten().position(|v| !v.is_finite()) {
        return Err(StatsError::NonFinite(pos));
    }

    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut v: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    let norm: f64 = a.iter().flatten().map(|x| x * x).sum();
    let mut converged = false;

    for _ in 0..MAX_SWEEPS {
        if off_diagonal_mass(&a) <= TOLERANCE * norm.max(f64::MIN_POSITIVE) {
            converged = true;
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                if a[p][q] != 0.0 {
                    rotate(&mut a, &mut v, p, q);
                }
            }
        }
    }
    if !converged && off_diagonal_mass(&a) > TOLERANCE * norm.max(f64::MIN_POSITIVE) {
        return Err(StatsError::NoConvergence(MAX_SWEEPS));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[j][j].total_cmp(&a[i][i]));

    Ok(SymmetricEigen {
        values: order.iter().map(|&k| a[k][k]).collect(),
        vectors: order
            .iter()
            .map(|&k| (0..n).map(|row| v[row][k]).collect())
            .collect(),
    })
}

fn off_diagonal_mass(a: &[Vec<f64>]) -> f64 {
    let n = a.len();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[i][j] * a[i][j];
            }
        }
    }
    sum
}

/// Apply A <- J^T A J and V <- V J, zeroing `a[p][q]`.
fn rotate(a: &mut [Vec<f64>], v: &mut [Vec<f64>], p: usize, q: usize) {
    let n = a.len();
    let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
    let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
    let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    for row in a.iter_mut() {
        let (akp, akq) = (row[p], row[q]);
        row[p] = c * akp - s * akq;
        row[q] = s * akp + c * akq;
    }
    for k in 0..n {
        let (apk, aqk) = (a[p][k], a[q][k]);
        a[p][k] = c * apk - s * aqk;
        a[q][k] = s * apk + c * aqk;
    }
    a[p][q] = 0.0;
    a[q][p] = 0.0;

    for row in v.iter_mut() {
        let (vkp, vkq) = (row[p], row[q]);
        row[p] = c * vkp - s * vkq;
        row[q] = s * vkp + c * vkq;
    }
}
