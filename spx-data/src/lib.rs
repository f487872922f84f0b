//! Series transformations for S&P 500 observations.
//!
//! Turns the raw observation list FRED returns into the shapes charts need:
//! a chronological series, per-year groupings, and year-to-date ratio series
//! aligned by day-of-year so that different years can be overlaid.
//!
//! Everything here is pure: no I/O, no shared state, no mutation of inputs.

pub mod comparison;
pub mod error;
pub mod series;
pub mod yearly;

pub use comparison::{
    align_by_day, comparison_series, ComparisonPoint, ComparisonSeries, DayAlignedRow,
    DayAlignedTable, DEFAULT_MAX_DAY,
};
pub use error::TransformError;
pub use series::{normalize, normalize_strict, year_to_date_change, DataPoint};
pub use yearly::{
    available_years, default_visible_years, group_by_year, YearMap, YearlyGrouping,
    DEFAULT_VISIBLE_YEARS,
};
