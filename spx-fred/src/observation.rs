/// Observation wire types for the FRED `series/observations` endpoint
use crate::error::{FredError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// FRED's placeholder for a date that has no reading (weekends, holidays).
pub const MISSING_VALUE: &str = ".";

/// A single observation as FRED returns it: both fields are strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date, "YYYY-MM-DD"
    pub date: String,
    /// Reading as text, or [`MISSING_VALUE`]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime_end: Option<String>,
}

impl Observation {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Observation {
            date: date.into(),
            value: value.into(),
            realtime_start: None,
            realtime_end: None,
        }
    }

    /// True when FRED has no reading for this date.
    pub fn is_missing(&self) -> bool {
        self.value.trim() == MISSING_VALUE
    }
}

/// The JSON envelope around a list of observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationsResponse {
    #[serde(default)]
    pub realtime_start: Option<String>,
    #[serde(default)]
    pub realtime_end: Option<String>,
    #[serde(default)]
    pub observation_start: Option<String>,
    #[serde(default)]
    pub observation_end: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    pub observations: Vec<Observation>,
}

impl ObservationsResponse {
    /// Parse a FRED response body.
    ///
    /// FRED reports failures as `{"error_code": .., "error_message": ..}`; those
    /// become [`FredError::Api`]. A body without an `observations` array is
    /// [`FredError::InvalidFormat`].
    pub fn from_json(body: &str) -> Result<ObservationsResponse> {
        let value: Value = serde_json::from_str(body)?;
        if let Some(code) = value.get("error_code") {
            return Err(FredError::Api {
                code: code.as_i64().unwrap_or_default(),
                message: value
                    .get("error_message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        match value.get("observations") {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(FredError::InvalidFormat(
                    "`observations` is not an array".to_string(),
                ))
            }
            None => {
                return Err(FredError::InvalidFormat(
                    "missing `observations`".to_string(),
                ))
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}
