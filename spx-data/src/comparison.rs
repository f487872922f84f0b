//! Year-to-date ratio series aligned by day-of-year.
//!
//! Each year is divided by its own first reading, so every year starts at
//! exactly 1.0 and years with very different index levels share one y-axis.

use crate::yearly::{YearMap, YearlyGrouping};
use log::warn;
use serde::{Deserialize, Serialize};
use spx_utils::dates::day_of_year;

/// Last day index of the default comparison grid (chart x-axis runs 0..=400).
pub const DEFAULT_MAX_DAY: u32 = 400;

/// A reading expressed as a ratio to its year's first reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    /// Zero-based day of the year, Jan 1 = 0
    pub day: u32,
    pub value: f64,
}

/// Year → ratio series, in the grouping's year order.
pub type ComparisonSeries = YearMap<ComparisonPoint>;

/// One row of a [`DayAlignedTable`]: a day and each selected year's ratio on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAlignedRow {
    pub day: u32,
    pub values: Vec<Option<f64>>,
}

/// Dense day grid for a set of years; `rows[d].values[i]` is year `years[i]` on day `d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAlignedTable {
    pub years: Vec<String>,
    pub rows: Vec<DayAlignedRow>,
}

/// Convert every year of `grouping` into ratios of its first reading.
///
/// Years without readings are left out, as are years whose first reading is
/// zero. Points whose date has no day-of-year are skipped with a warning; the
/// baseline is the first point that is kept, so each year still starts at 1.0.
pub fn comparison_series(grouping: &YearlyGrouping) -> ComparisonSeries {
    let mut result = Vec::with_capacity(grouping.len());
    for (year, points) in grouping.iter() {
        let days: Vec<(u32, f64)> = points
            .iter()
            .filter_map(|point| match day_of_year(&point.date) {
                Ok(day) => Some((day, point.value)),
                Err(e) => {
                    warn!("Skipping point in {year}: {e}");
                    None
                }
            })
            .collect();
        let Some(&(_, baseline)) = days.first() else {
            continue;
        };
        if baseline == 0.0 {
            warn!("Skipping {year}: first reading is zero");
            continue;
        }
        let ratios = days
            .into_iter()
            .map(|(day, value)| ComparisonPoint {
                day,
                value: value / baseline,
            })
            .collect();
        result.push((year.to_string(), ratios));
    }
    YearMap(result)
}

/// Lay the selected `years` of `comparison` out on a shared `0..=max_day` grid.
///
/// Days past `max_day` are dropped. A year missing from `comparison` yields an
/// empty column. If a year has two points on the same day the later one wins.
pub fn align_by_day(
    comparison: &ComparisonSeries,
    years: &[String],
    max_day: u32,
) -> DayAlignedTable {
    let mut rows: Vec<DayAlignedRow> = (0..=max_day)
        .map(|day| DayAlignedRow {
            day,
            values: vec![None; years.len()],
        })
        .collect();
    for (column, year) in years.iter().enumerate() {
        let Some(points) = comparison.get(year) else {
            continue;
        };
        for point in points.iter().filter(|point| point.day <= max_day) {
            rows[point.day as usize].values[column] = Some(point.value);
        }
    }
    DayAlignedTable {
        years: years.to_vec(),
        rows,
    }
}
