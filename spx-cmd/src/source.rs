//! Where observations come from: FRED, the response cache, or a saved file.

use crate::cache::{ResponseCache, DEFAULT_MAX_AGE_SECS};
use anyhow::Context;
use clap::Args;
use log::info;
use spx_fred::client::FredClient;
use spx_fred::error::FredError;
use spx_fred::observation::{Observation, ObservationsResponse};
use spx_fred::query::{ObservationQuery, DEFAULT_BASE_URL, SP500_SERIES_ID};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// FRED API key
    #[arg(long, env = "FRED_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// FRED series id
    #[arg(long, default_value = SP500_SERIES_ID, global = true)]
    pub series: String,

    /// FRED service base URL
    #[arg(long, env = "FRED_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Directory for cached FRED responses (no caching when omitted)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Seconds a cached response stays fresh
    #[arg(long, default_value_t = DEFAULT_MAX_AGE_SECS, global = true)]
    pub max_age_secs: u64,

    /// Read a saved FRED JSON response instead of fetching
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,
}

impl SourceArgs {
    /// Observations for `query`, from `--input`, a fresh cache entry, or FRED.
    pub async fn load(&self, query: &ObservationQuery) -> anyhow::Result<Vec<Observation>> {
        let cache = self
            .cache_dir
            .as_ref()
            .map(|dir| ResponseCache::new(dir, Duration::from_secs(self.max_age_secs)));

        let (body, fetched) = match (&self.input, &cache) {
            (Some(path), _) => {
                info!("Reading observations from {}", path.display());
                let body = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                (body, false)
            }
            (None, Some(cache)) => match cache.read_fresh(query).await {
                Some(body) => (body, false),
                None => (self.fetch(query).await?, true),
            },
            (None, None) => (self.fetch(query).await?, true),
        };

        let response = ObservationsResponse::from_json(&body)
            .with_context(|| format!("Bad response for series {}", query.series_id))?;

        // only bodies that parsed are worth keeping
        if fetched {
            if let Some(cache) = &cache {
                info!("Caching response under {}", cache.dir().display());
                cache.write(query, &body).await;
            }
        }

        info!(
            "Loaded {} observations for {}",
            response.observations.len(),
            query.series_id
        );
        Ok(response.observations)
    }

    async fn fetch(&self, query: &ObservationQuery) -> anyhow::Result<String> {
        let api_key = self.api_key.as_deref().ok_or(FredError::MissingApiKey)?;
        let client = FredClient::new(api_key)?.with_base_url(self.base_url.as_str());
        let body = client
            .fetch_body(query)
            .await
            .context("Error fetching S&P 500 data")?;
        Ok(body)
    }
}
