use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::DayRecord;
use crate::config::Config;

/// Why the remote contribution feed produced nothing usable. Every variant is
/// soft: the caller recovers by synthesizing a grid, nothing propagates.
#[derive(Debug, Error)]
pub enum RemoteUnavailable {
    #[error("transport: {0}")]
    Transport(String),
    #[error("status {0}")]
    Status(u16),
    #[error("malformed document: {0}")]
    Malformed(String),
    #[error("no contribution data")]
    Empty,
}

#[async_trait]
pub trait ContributionSource: Send + Sync {
    /// Last-year contribution history for one identity. A single attempt,
    /// no retry; order and values of a well-formed document pass through
    /// untouched.
    async fn fetch_contributions(
        &self,
        identity: &str,
    ) -> Result<Vec<DayRecord>, RemoteUnavailable>;
}

#[derive(Deserialize)]
struct ContributionsDocument {
    #[serde(default)]
    contributions: Vec<DayRecord>,
}

pub struct HttpContributionSource {
    client: Client,
    base: String,
}

impl HttpContributionSource {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(cfg.http_timeout_secs))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base: cfg.contributions_base.clone(),
        }
    }

    fn year_url(&self, identity: &str) -> Result<Url, RemoteUnavailable> {
        let mut url = Url::parse(&format!("{}/{}", self.base.trim_end_matches('/'), identity))
            .map_err(|e| RemoteUnavailable::Transport(e.to_string()))?;
        url.query_pairs_mut().append_pair("y", "last");
        Ok(url)
    }
}

#[async_trait]
impl ContributionSource for HttpContributionSource {
    async fn fetch_contributions(
        &self,
        identity: &str,
    ) -> Result<Vec<DayRecord>, RemoteUnavailable> {
        let url = self.year_url(identity)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteUnavailable::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteUnavailable::Status(status.as_u16()));
        }
        let doc: ContributionsDocument = resp
            .json()
            .await
            .map_err(|e| RemoteUnavailable::Malformed(e.to_string()))?;
        if doc.contributions.is_empty() {
            return Err(RemoteUnavailable::Empty);
        }
        Ok(doc.contributions)
    }
}

/// Fixed in-memory source. Makes offline runs and page-level tests explicit
/// instead of routing them through live HTTP.
pub struct StaticSource {
    pub days: Vec<DayRecord>,
}

#[async_trait]
impl ContributionSource for StaticSource {
    async fn fetch_contributions(
        &self,
        _identity: &str,
    ) -> Result<Vec<DayRecord>, RemoteUnavailable> {
        if self.days.is_empty() {
            return Err(RemoteUnavailable::Empty);
        }
        Ok(self.days.clone())
    }
}
