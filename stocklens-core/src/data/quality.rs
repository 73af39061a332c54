//! Data-quality failures: the input has the right columns but unusable values.

use chrono::NaiveDate;

/// Row numbers are 1-based data rows (the header is not counted).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QualityError {
    #[error("data contains no rows")]
    Empty,

    #[error("missing value in column {column} at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("non-numeric value '{value}' in column {column} at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("volume must be positive, got {value} at row {row}")]
    NonPositiveVolume { row: usize, value: f64 },

    #[error("unparseable date '{value}' at row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("duplicate date {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },
}
