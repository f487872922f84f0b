/// HTTP client for the FRED `series/observations` endpoint
use crate::{
    error::{FredError, Result},
    observation::{Observation, ObservationsResponse},
    query::{ObservationQuery, DEFAULT_BASE_URL},
};
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

/// Shown in place of the API key whenever a URL is logged.
const REDACTED: &str = "<redacted>";

/// Reusable FRED client: one HTTP connection pool plus credentials.
#[derive(Debug, Clone)]
pub struct FredClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FredClient {
    /// Build a client for `api_key`, talking to the public FRED service.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FredError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(FredClient {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at another FRED-compatible service.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw response body for `query`.
    pub async fn fetch_body(&self, query: &ObservationQuery) -> Result<String> {
        info!("GET {}", query.to_url(&self.base_url, REDACTED));
        let url = format!("{}/series/observations", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FredError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        let body = response.text().await?;
        debug!("received {} bytes for {}", body.len(), query.series_id);
        Ok(body)
    }

    /// Fetch and parse the observations for `query`.
    pub async fn fetch_observations(&self, query: &ObservationQuery) -> Result<Vec<Observation>> {
        let body = self.fetch_body(query).await?;
        let response = ObservationsResponse::from_json(&body)?;
        Ok(response.observations)
    }
}

#[cfg(test)]
mod tests {
    use super::FredClient;
    use crate::error::FredError;

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(FredClient::new(""), Err(FredError::MissingApiKey)));
        assert!(matches!(FredClient::new("   "), Err(FredError::MissingApiKey)));
    }

    #[test]
    fn test_with_base_url() {
        let client = FredClient::new("abc")
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/fred/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9000/fred");
    }
}
