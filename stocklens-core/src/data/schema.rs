//! Input schema contract: required header columns of the price file.
//!
//! The file must carry a header row with at least `Date, Open, High, Low,
//! Close, Volume`. Column order is free and extra columns are ignored.
//! Names are matched exactly after trimming surrounding whitespace.

use crate::domain::Field;

/// Name of the date column.
pub const DATE_COLUMN: &str = "Date";

/// Every column the validator requires, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Positions of the required columns within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub open: usize,
    pub high: usize,
    pub low: usize,
    pub close: usize,
    pub volume: usize,
}

impl ColumnMap {
    /// Record position of a numeric field.
    pub fn position(&self, field: Field) -> usize {
        match field {
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::Volume => self.volume,
        }
    }
}

/// Resolves header names to record positions.
pub struct BarSchema;

impl BarSchema {
    /// Locate every required column in `headers`.
    ///
    /// Reports all missing columns at once, in canonical order.
    pub fn resolve<'a, I>(headers: I) -> Result<ColumnMap, SchemaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = headers
            .into_iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').trim())
            .collect();
        let find = |wanted: &str| names.iter().position(|h| *h == wanted);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }

        // All present: the lookups below cannot miss.
        let pos = |wanted: &str| find(wanted).unwrap_or_default();
        Ok(ColumnMap {
            date: pos(DATE_COLUMN),
            open: pos(Field::Open.column_name()),
            high: pos(Field::High.column_name()),
            low: pos(Field::Low.column_name()),
            close: pos(Field::Close.column_name()),
            volume: pos(Field::Volume.column_name()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
