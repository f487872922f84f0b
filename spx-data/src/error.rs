use spx_utils::error::DateError;
use thiserror::Error;

/// Records the transformer refuses to turn into data points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Value is neither the "no data" sentinel nor a finite number
    #[error("Malformed value {value:?} on {date}")]
    MalformedValue { date: String, value: String },

    /// Observation date is not a "YYYY-MM-DD" date
    #[error(transparent)]
    Date(#[from] DateError),
}
