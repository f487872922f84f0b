use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base URL of the FRED web service.
pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// FRED series id of the S&P 500 index.
pub const SP500_SERIES_ID: &str = "SP500";

/// Date format used for FRED query parameters: "YYYY-MM-DD"
pub const YEAR_FORMAT: &str = "%Y-%m-%d";

/// Observation frequency FRED aggregates to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    pub fn as_param(&self) -> &'static str {
        match self {
            Frequency::Daily => "d",
            Frequency::Weekly => "w",
            Frequency::Monthly => "m",
            Frequency::Quarterly => "q",
            Frequency::Annual => "a",
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "d" | "daily" => Ok(Frequency::Daily),
            "w" | "weekly" => Ok(Frequency::Weekly),
            "m" | "monthly" => Ok(Frequency::Monthly),
            "q" | "quarterly" => Ok(Frequency::Quarterly),
            "a" | "annual" => Ok(Frequency::Annual),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Order of observations in the response, by date.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameters of a `series/observations` request.
///
/// The API key is not part of the query so that queries can be logged and
/// used as cache keys.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct ObservationQuery {
    pub series_id: String,
    pub frequency: Frequency,
    pub sort_order: SortOrder,
    pub limit: Option<u32>,
    pub observation_start: Option<NaiveDate>,
    pub observation_end: Option<NaiveDate>,
}

impl ObservationQuery {
    pub fn new(series_id: impl Into<String>) -> Self {
        ObservationQuery {
            series_id: series_id.into(),
            frequency: Frequency::Daily,
            sort_order: SortOrder::Asc,
            limit: None,
            observation_start: None,
            observation_end: None,
        }
    }

    /// Last ten years of monthly readings, newest first.
    pub fn overview(series_id: impl Into<String>) -> Self {
        ObservationQuery::new(series_id)
            .frequency(Frequency::Monthly)
            .sort_order(SortOrder::Desc)
            .limit(120)
    }

    /// Enough daily readings, newest first, to compare recent years.
    pub fn year_comparison(series_id: impl Into<String>) -> Self {
        ObservationQuery::new(series_id)
            .frequency(Frequency::Daily)
            .sort_order(SortOrder::Desc)
            .limit(5000)
    }

    /// Monthly readings since 1950, oldest first.
    pub fn full_history(series_id: impl Into<String>) -> Self {
        ObservationQuery::new(series_id)
            .frequency(Frequency::Monthly)
            .sort_order(SortOrder::Asc)
            .observation_start(NaiveDate::from_ymd_opt(1950, 1, 1))
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn observation_start(mut self, start: Option<NaiveDate>) -> Self {
        self.observation_start = start;
        self
    }

    pub fn observation_end(mut self, end: Option<NaiveDate>) -> Self {
        self.observation_end = end;
        self
    }

    /// Query string parameters, without `api_key`.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("series_id", self.series_id.clone()),
            ("file_type", "json".to_string()),
            ("frequency", self.frequency.as_param().to_string()),
            ("sort_order", self.sort_order.as_param().to_string()),
        ];
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(start) = self.observation_start {
            params.push(("observation_start", start.format(YEAR_FORMAT).to_string()));
        }
        if let Some(end) = self.observation_end {
            params.push(("observation_end", end.format(YEAR_FORMAT).to_string()));
        }
        params
    }

    /// Full request URL. Pass a placeholder as `api_key` when logging.
    pub fn to_url(&self, base_url: &str, api_key: &str) -> String {
        let mut url = format!(
            "{}/series/observations?api_key={}",
            base_url.trim_end_matches('/'),
            api_key
        );
        for (key, value) in self.params() {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&value);
        }
        url
    }

    /// A file-name-safe key that identifies this query.
    pub fn cache_key(&self) -> String {
        let date_or = |date: Option<NaiveDate>| {
            date.map_or_else(|| "none".to_string(), |d| d.format("%Y%m%d").to_string())
        };
        let series: String = self
            .series_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!(
            "{}_{}_{}_{}_{}_{}",
            series,
            self.frequency.as_param(),
            self.sort_order.as_param(),
            self.limit.map_or_else(|| "all".to_string(), |l| l.to_string()),
            date_or(self.observation_start),
            date_or(self.observation_end),
        )
    }
}
