//! CSV ingestion: raw delimited file in, validated `TimeSeriesTable` out.
//!
//! Validation happens in three stages, each with its own error class:
//! 1. The file must be readable → `DataError::NotFound`
//! 2. The header must carry every required column → `DataError::Schema`
//! 3. Every required cell must parse, volume must be positive, dates must be
//!    unique → `DataError::Quality`
//!
//! The source file is never modified.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::quality::QualityError;
use super::schema::{BarSchema, ColumnMap, SchemaError};
use crate::domain::{Bar, Field, TimeSeriesTable};

/// Errors from loading the input table. All of them are fatal to a run.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found or unreadable at: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("data quality error: {0}")]
    Quality(#[from] QualityError),
}

/// Load and validate a price file from disk.
pub fn load_table(path: &Path) -> Result<TimeSeriesTable, DataError> {
    info!(path = %path.display(), "loading price data");
    let file = File::open(path).map_err(|source| DataError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table(file, path)?;
    info!(
        rows = table.len(),
        first = ?table.first_date(),
        last = ?table.last_date(),
        "price data validated"
    );
    for warning in table.warnings() {
        warn!("data quality: {warning}");
    }
    Ok(table)
}

/// Parse and validate CSV content from any reader.
///
/// `origin` is only used in error messages.
pub fn read_table<R: Read>(reader: R, origin: &Path) -> Result<TimeSeriesTable, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| csv_error(origin, 0, e))?
        .clone();
    let columns = BarSchema::resolve(headers.iter())?;
    debug!(?columns, "resolved header columns");

    let mut bars = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| csv_error(origin, row, e))?;
        bars.push(parse_record(&record, &columns, row)?);
    }

    Ok(TimeSeriesTable::from_bars(bars)?)
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    row: usize,
) -> Result<Bar, QualityError> {
    let raw_date = record.get(columns.date).unwrap_or("");
    if raw_date.is_empty() {
        return Err(QualityError::MissingValue {
            column: "Date".into(),
            row,
        });
    }
    let date = parse_date(raw_date).ok_or_else(|| QualityError::InvalidDate {
        row,
        value: raw_date.to_string(),
    })?;

    let value = |field: Field| parse_number(record.get(columns.position(field)), field, row);
    let bar = Bar {
        date,
        open: value(Field::Open)?,
        high: value(Field::High)?,
        low: value(Field::Low)?,
        close: value(Field::Close)?,
        volume: value(Field::Volume)?,
    };

    if bar.volume <= 0.0 {
        return Err(QualityError::NonPositiveVolume {
            row,
            value: bar.volume,
        });
    }
    Ok(bar)
}

fn parse_number(raw: Option<&str>, field: Field, row: usize) -> Result<f64, QualityError> {
    let raw = raw.unwrap_or("").trim();
    if is_missing_marker(raw) {
        return Err(QualityError::MissingValue {
            column: field.column_name().to_string(),
            row,
        });
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(QualityError::NonNumeric {
            column: field.column_name().to_string(),
            row,
            value: raw.to_string(),
        }),
    }
}

fn is_missing_marker(raw: &str) -> bool {
    raw.is_empty()
        || raw.eq_ignore_ascii_case("nan")
        || raw.eq_ignore_ascii_case("na")
        || raw.eq_ignore_ascii_case("n/a")
        || raw.eq_ignore_ascii_case("null")
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a calendar date, dropping any time-of-day component.
///
/// Offset timestamps keep their local (wall-clock) date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(s, f).ok())
    {
        return Some(dt.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
}

fn csv_error(origin: &Path, row: usize, err: csv::Error) -> DataError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DataError::NotFound {
            path: origin.to_path_buf(),
            source,
        },
        _ => QualityError::MalformedRecord { row, reason }.into(),
    }
}
