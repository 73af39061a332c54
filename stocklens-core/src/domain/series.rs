//! Series: a date-indexed numeric series with explicit gaps.
//!
//! Indicators work on `&[f64]` with `NaN` marking warmup/undefined rows.
//! `Series` is the persisted form: `NaN` becomes `None` so the value
//! serializes as JSON `null` and survives a round trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub index: Vec<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// Series aligned to `index`; non-finite values become `None`.
    pub fn aligned(index: &[NaiveDate], values: &[f64]) -> Self {
        debug_assert_eq!(index.len(), values.len(), "series/index length mismatch");
        Self {
            index: index.to_vec(),
            values: values
                .iter()
                .map(|v| if v.is_finite() { Some(*v) } else { None })
                .collect(),
        }
    }

    /// Sparse series from (date, value) pairs, kept in the given order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let (index, values): (Vec<NaiveDate>, Vec<Option<f64>>) =
            pairs.into_iter().map(|(d, v)| (d, Some(v))).unzip();
        Self { index, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at position `i`, `None` if absent or out of bounds.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied().flatten()
    }

    /// Value on `date`, `None` if the date is not in the index or the value is absent.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        let pos = self.index.binary_search(&date).ok()?;
        self.get(pos)
    }

    /// Iterate over defined (date, value) pairs.
    pub fn defined(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.index
            .iter()
            .zip(self.values.iter())
            .filter_map(|(d, v)| v.map(|v| (*d, v)))
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn last_defined(&self) -> Option<(NaiveDate, f64)> {
        self.index
            .iter()
            .zip(self.values.iter())
            .rev()
            .find_map(|(d, v)| v.map(|v| (*d, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        (0..n).map(|i| base + chrono::Duration::days(i as i64)).collect()
    }

    #[test]
    fn nan_becomes_none() {
        let s = Series::aligned(&dates(3), &[f64::NAN, 1.0, f64::INFINITY]);
        assert_eq!(s.values, vec![None, Some(1.0), None]);
        assert_eq!(s.defined_count(), 1);
    }

    #[test]
    fn value_lookup_by_date() {
        let idx = dates(3);
        let s = Series::aligned(&idx, &[1.0, 2.0, 3.0]);
        assert_eq!(s.value_at(idx[1]), Some(2.0));
        assert_eq!(s.value_at(idx[2] + chrono::Duration::days(1)), None);
    }

    #[test]
    fn last_defined_skips_trailing_gaps() {
        let idx = dates(4);
        let s = Series::aligned(&idx, &[1.0, 2.0, f64::NAN, f64::NAN]);
        assert_eq!(s.last_defined(), Some((idx[1], 2.0)));
    }

    #[test]
    fn sparse_series_keeps_subset_index() {
        let idx = dates(5);
        let s = Series::from_pairs(vec![(idx[1], 10.0), (idx[4], 40.0)]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.index, vec![idx[1], idx[4]]);
        assert_eq!(s.value_at(idx[4]), Some(40.0));
    }

    #[test]
    fn json_roundtrip_preserves_gaps() {
        let s = Series::aligned(&dates(3), &[f64::NAN, 1.5, 2.5]);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("null"));
        let back: Series = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
