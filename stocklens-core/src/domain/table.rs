//! TimeSeriesTable: the validated, immutable input of every analysis.
//!
//! Column-oriented storage keyed by an ascending, unique date index.
//! The only constructor is [`TimeSeriesTable::from_bars`], which enforces:
//! - at least one row
//! - every OHLCV value finite
//! - volume strictly positive
//! - unique dates (rows are sorted ascending)
//!
//! There are no `&mut` accessors: once built, a table is read-only and can be
//! shared by reference across analyzers (and threads).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::QualityError;
use crate::domain::Bar;

/// One of the five required numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
    ];

    /// Header name of the column in the input file.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    dates: Vec<NaiveDate>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
    warnings: Vec<String>,
}

impl TimeSeriesTable {
    /// Build a table from bars in any order.
    ///
    /// `row` numbers in errors are 1-based positions in `bars` as given.
    pub fn from_bars(mut bars: Vec<Bar>) -> Result<Self, QualityError> {
        if bars.is_empty() {
            return Err(QualityError::Empty);
        }

        for (i, bar) in bars.iter().enumerate() {
            let row = i + 1;
            for field in Field::ALL {
                let value = bar_value(bar, field);
                if !value.is_finite() {
                    return Err(QualityError::NonNumeric {
                        column: field.column_name().to_string(),
                        row,
                        value: value.to_string(),
                    });
                }
            }
            if bar.volume <= 0.0 {
                return Err(QualityError::NonPositiveVolume {
                    row,
                    value: bar.volume,
                });
            }
        }

        bars.sort_by_key(|b| b.date);
        if let Some(pair) = bars.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(QualityError::DuplicateDate { date: pair[0].date });
        }

        let warnings: Vec<String> = bars
            .iter()
            .filter(|b| !b.is_consistent())
            .map(|b| {
                format!(
                    "{}: OHLC out of range (open={}, high={}, low={}, close={})",
                    b.date, b.open, b.high, b.low, b.close
                )
            })
            .collect();

        let n = bars.len();
        let mut table = Self {
            dates: Vec::with_capacity(n),
            open: Vec::with_capacity(n),
            high: Vec::with_capacity(n),
            low: Vec::with_capacity(n),
            close: Vec::with_capacity(n),
            volume: Vec::with_capacity(n),
            warnings,
        };
        for bar in bars {
            table.dates.push(bar.date);
            table.open.push(bar.open);
            table.high.push(bar.high);
            table.low.push(bar.low);
            table.close.push(bar.close);
            table.volume.push(bar.volume);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The ascending date index shared by every aligned output series.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column(&self, field: Field) -> &[f64] {
        match field {
            Field::Open => &self.open,
            Field::High => &self.high,
            Field::Low => &self.low,
            Field::Close => &self.close,
            Field::Volume => &self.volume,
        }
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// Reassemble the bar at `index`.
    pub fn bar(&self, index: usize) -> Option<Bar> {
        Some(Bar {
            date: *self.dates.get(index)?,
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
        })
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Non-fatal data-quality findings collected during construction.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Deterministic BLAKE3 hash over the date index and all OHLCV values.
    pub fn dataset_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for i in 0..self.len() {
            hasher.update(self.dates[i].to_string().as_bytes());
            hasher.update(&self.open[i].to_le_bytes());
            hasher.update(&self.high[i].to_le_bytes());
            hasher.update(&self.low[i].to_le_bytes());
            hasher.update(&self.close[i].to_le_bytes());
            hasher.update(&self.volume[i].to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

fn bar_value(bar: &Bar, field: Field) -> f64 {
    match field {
        Field::Open => bar.open,
        Field::High => bar.high,
        Field::Low => bar.low,
        Field::Close => bar.close,
        Field::Volume => bar.volume,
    }
}

/// Build a table from close prices for tests.
///
/// Dates are consecutive calendar days from 2024-01-02, volume is constant.
#[cfg(test)]
pub fn table_from_closes(closes: &[f64]) -> TimeSeriesTable {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        })
        .collect();
    TimeSeriesTable::from_bars(bars).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64, volume: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
        }
    }

    #[test]
    fn rows_are_sorted_ascending() {
        let table =
            TimeSeriesTable::from_bars(vec![bar(5, 3.0, 10.0), bar(2, 1.0, 10.0), bar(3, 2.0, 10.0)])
                .unwrap();
        assert_eq!(table.close(), &[1.0, 2.0, 3.0]);
        assert!(table.dates().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(table.first_date(), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(table.last_date(), NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(
            TimeSeriesTable::from_bars(vec![]),
            Err(QualityError::Empty)
        ));
    }

    #[test]
    fn zero_volume_rejected() {
        let err = TimeSeriesTable::from_bars(vec![bar(2, 1.0, 10.0), bar(3, 2.0, 0.0)]).unwrap_err();
        assert!(matches!(err, QualityError::NonPositiveVolume { row: 2, .. }));
    }

    #[test]
    fn duplicate_date_rejected() {
        let err = TimeSeriesTable::from_bars(vec![bar(2, 1.0, 10.0), bar(2, 2.0, 10.0)]).unwrap_err();
        assert!(matches!(err, QualityError::DuplicateDate { .. }));
    }

    #[test]
    fn nan_rejected() {
        let err =
            TimeSeriesTable::from_bars(vec![bar(2, f64::NAN, 10.0), bar(3, 2.0, 10.0)]).unwrap_err();
        assert!(matches!(err, QualityError::NonNumeric { row: 1, .. }));
    }

    #[test]
    fn inconsistent_bar_is_a_warning_not_an_error() {
        let mut inverted = bar(3, 2.0, 10.0);
        inverted.high = 0.5;
        let table = TimeSeriesTable::from_bars(vec![bar(2, 1.0, 10.0), inverted]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.warnings().len(), 1);
        assert!(table.warnings()[0].contains("2024-01-03"));
    }

    #[test]
    fn bar_reassembly() {
        let table = table_from_closes(&[10.0, 11.0]);
        let b = table.bar(1).unwrap();
        assert_eq!(b.close, 11.0);
        assert_eq!(b.volume, 1000.0);
        assert!(table.bar(2).is_none());
    }

    #[test]
    fn dataset_hash_is_deterministic_and_content_sensitive() {
        let a = table_from_closes(&[10.0, 11.0, 12.0]);
        let b = table_from_closes(&[10.0, 11.0, 12.0]);
        let c = table_from_closes(&[10.0, 11.0, 12.5]);
        assert_eq!(a.dataset_hash(), b.dataset_hash());
        assert_ne!(a.dataset_hash(), c.dataset_hash());
    }
}
