//! Input validation: CSV ingestion, header schema, data-quality checks.

pub mod ingest;
pub mod quality;
pub mod schema;

pub use ingest::{load_table, parse_date, read_table, DataError};
pub use quality::QualityError;
pub use schema::{BarSchema, ColumnMap, SchemaError, REQUIRED_COLUMNS};
