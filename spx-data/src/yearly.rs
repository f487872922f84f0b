//! Per-year views of a chronological series.

use crate::series::DataPoint;
use serde::ser::{Serialize, SerializeMap, Serializer};
use spx_utils::dates::year_key;
use std::collections::{BTreeSet, HashMap};

/// Number of most recent years a comparison chart shows before the user
/// toggles any.
pub const DEFAULT_VISIBLE_YEARS: usize = 3;

/// Year key → sequence, kept in the order keys were first inserted.
///
/// Serializes as a map (a JSON object) in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearMap<T>(pub Vec<(String, Vec<T>)>);

/// Data points partitioned by year.
pub type YearlyGrouping = YearMap<DataPoint>;

impl<T> Default for YearMap<T> {
    fn default() -> Self {
        YearMap(Vec::new())
    }
}

impl<T> YearMap<T> {
    pub fn get(&self, year: &str) -> Option<&[T]> {
        self.0
            .iter()
            .find(|(key, _)| key == year)
            .map(|(_, values)| values.as_slice())
    }

    /// Year keys in insertion order.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.0
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Clone> YearMap<T> {
    /// Concatenate every year's sequence in key order.
    pub fn flatten(&self) -> Vec<T> {
        self.0
            .iter()
            .flat_map(|(_, values)| values.iter().cloned())
            .collect()
    }
}

impl<T: Serialize> Serialize for YearMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (year, values) in &self.0 {
            map.serialize_entry(year, values)?;
        }
        map.end()
    }
}

/// Partition `series` by year (the first four characters of each date).
///
/// Order inside each year is the input order, so a chronological input gives
/// chronological groups. Years appear in the order they are first seen; sort
/// with [`available_years`] when a stable ordering is needed.
pub fn group_by_year(series: &[DataPoint]) -> YearlyGrouping {
    let mut grouped: Vec<(String, Vec<DataPoint>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for point in series {
        let year = year_key(&point.date);
        let slot = *index.entry(year).or_insert_with(|| {
            grouped.push((year.to_string(), Vec::new()));
            grouped.len() - 1
        });
        grouped[slot].1.push(point.clone());
    }
    YearMap(grouped)
}

/// Distinct years in `series`, most recent first.
///
/// Relies on year keys being four-digit strings, where string order and
/// numeric order agree.
pub fn available_years(series: &[DataPoint]) -> Vec<String> {
    let years: BTreeSet<&str> = series.iter().map(|point| year_key(&point.date)).collect();
    years.into_iter().rev().map(str::to_string).collect()
}

/// The `count` most recent of `years`, most recent first.
pub fn default_visible_years(years: &[String], count: usize) -> Vec<String> {
    let mut sorted = years.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    sorted.truncate(count);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series() -> Vec<DataPoint> {
        vec![
            DataPoint::new("2022-12-29", 3849.28),
            DataPoint::new("2022-12-30", 3839.5),
            DataPoint::new("2023-01-03", 3824.14),
            DataPoint::new("2023-01-04", 3852.97),
            DataPoint::new("2024-01-02", 4742.83),
        ]
    }

    #[test]
    fn test_group_by_year() {
        let grouped = group_by_year(&series());
        assert_eq!(grouped.years().collect::<Vec<_>>(), vec!["2022", "2023", "2024"]);
        assert_eq!(grouped.get("2023").unwrap().len(), 2);
        assert_eq!(grouped.get("2023").unwrap()[0].date, "2023-01-03");
        assert!(grouped.get("2021").is_none());
    }

    #[test]
    fn test_group_by_year_keeps_first_occurrence_order() {
        let unsorted = vec![
            DataPoint::new("2024-01-02", 4742.83),
            DataPoint::new("2022-12-30", 3839.5),
            DataPoint::new("2024-01-03", 4704.81),
        ];
        let grouped = group_by_year(&unsorted);
        assert_eq!(grouped.years().collect::<Vec<_>>(), vec!["2024", "2022"]);
        assert_eq!(grouped.get("2024").unwrap().len(), 2);
    }

    #[test]
    fn test_group_by_year_empty() {
        let grouped = group_by_year(&[]);
        assert!(grouped.is_empty());
        assert_eq!(grouped.len(), 0);
    }

    #[test]
    fn test_available_years() {
        assert_eq!(available_years(&series()), vec!["2024", "2023", "2022"]);
        assert!(available_years(&[]).is_empty());
    }

    #[test]
    fn test_default_visible_years() {
        let years: Vec<String> = ["2019", "2024", "2021", "2023", "2022"]
            .iter()
            .map(|y| y.to_string())
            .collect();
        assert_eq!(
            default_visible_years(&years, DEFAULT_VISIBLE_YEARS),
            vec!["2024", "2023", "2022"]
        );
        assert_eq!(default_visible_years(&years[..1], 3), vec!["2019"]);
    }

    #[test]
    fn test_serialize_keeps_key_order() {
        let grouped = group_by_year(&[
            DataPoint::new("2024-01-02", 1.0),
            DataPoint::new("2023-01-03", 2.0),
        ]);
        let json = serde_json::to_string(&grouped).unwrap();
        assert_eq!(
            json,
            r#"{"2024":[{"date":"2024-01-02","value":1.0}],"2023":[{"date":"2023-01-03","value":2.0}]}"#
        );
    }

    fn arb_series() -> impl Strategy<Value = Vec<DataPoint>> {
        prop::collection::vec((1995i32..2030, 1u32..=365, 1.0f64..5000.0), 0..300).prop_map(
            |mut raw| {
                raw.sort_by_key(|(year, day, _)| (*year, *day));
                raw.into_iter()
                    .map(|(year, day, value)| {
                        let month = (day - 1) / 31 + 1;
                        let dom = (day - 1) % 28 + 1;
                        DataPoint::new(format!("{year:04}-{month:02}-{dom:02}"), value)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_group_then_flatten_is_identity(series in arb_series()) {
            prop_assert_eq!(group_by_year(&series).flatten(), series);
        }

        #[test]
        fn prop_available_years_distinct_descending(series in arb_series()) {
            let years = available_years(&series);
            prop_assert!(years.windows(2).all(|w| w[0] > w[1]));
            for point in &series {
                prop_assert!(years.iter().any(|y| y.as_str() == year_key(&point.date)));
            }
        }
    }
}
