//! Domain types: bars, the validated input table, and output series.

pub mod bar;
pub mod series;
pub mod table;

pub use bar::Bar;
pub use series::Series;
pub use table::{Field, TimeSeriesTable};
