//! Cleaning raw observations into a chronological numeric series.

use crate::error::TransformError;
use log::warn;
use serde::{Deserialize, Serialize};
use spx_fred::observation::Observation;
use spx_utils::dates::{format_date, parse_date};

/// A cleaned observation: a date and a finite reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Observation date, "YYYY-MM-DD"
    pub date: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        DataPoint {
            date: date.into(),
            value,
        }
    }
}

impl From<&DataPoint> for Observation {
    fn from(point: &DataPoint) -> Self {
        Observation::new(point.date.clone(), point.value.to_string())
    }
}

impl TryFrom<&Observation> for DataPoint {
    type Error = TransformError;

    /// The date is stored in canonical "YYYY-MM-DD" form, whatever padding or
    /// suffix the observation carried.
    fn try_from(observation: &Observation) -> Result<Self, Self::Error> {
        let date = format_date(&parse_date(&observation.date)?);
        let malformed = || TransformError::MalformedValue {
            date: observation.date.clone(),
            value: observation.value.clone(),
        };
        let value: f64 = observation
            .value
            .trim()
            .parse()
            .map_err(|_| malformed())?;
        // "NaN" and "inf" parse fine but are not readings
        if !value.is_finite() {
            return Err(malformed());
        }
        Ok(DataPoint::new(date, value))
    }
}

/// Clean `observations` into an oldest-first series.
///
/// Records carrying the "no data" sentinel are dropped. Records whose value or
/// date cannot be read are dropped too, with a warning; use
/// [`normalize_strict`] to reject them instead.
///
/// Input may arrive in any order (FRED is usually asked for newest first).
/// The output is sorted ascending by date with a stable sort, so normalizing
/// an already normalized series returns it unchanged.
pub fn normalize(observations: &[Observation]) -> Vec<DataPoint> {
    let mut points: Vec<DataPoint> = observations
        .iter()
        .filter(|observation| !observation.is_missing())
        .filter_map(|observation| match DataPoint::try_from(observation) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!("Skipping observation: {e}");
                None
            }
        })
        .collect();
    sort_chronologically(&mut points);
    points
}

/// Like [`normalize`], but the first unreadable record is returned as an error.
pub fn normalize_strict(observations: &[Observation]) -> Result<Vec<DataPoint>, TransformError> {
    let mut points = observations
        .iter()
        .filter(|observation| !observation.is_missing())
        .map(DataPoint::try_from)
        .collect::<Result<Vec<DataPoint>, _>>()?;
    sort_chronologically(&mut points);
    Ok(points)
}

/// Percentage change of every point from the first one: `(v / first - 1) * 100`.
///
/// Returns an empty series when `series` is empty or starts at zero.
pub fn year_to_date_change(series: &[DataPoint]) -> Vec<DataPoint> {
    let Some(first) = series.first() else {
        return Vec::new();
    };
    if first.value == 0.0 {
        warn!("Cannot compute change from a zero reading on {}", first.date);
        return Vec::new();
    }
    let first_value = first.value;
    series
        .iter()
        .map(|point| DataPoint::new(point.date.clone(), (point.value / first_value - 1.0) * 100.0))
        .collect()
}

// dates are canonical "YYYY-MM-DD", so string order is date order
fn sort_chronologically(points: &mut [DataPoint]) {
    points.sort_by(|a, b| a.date.cmp(&b.date));
}
