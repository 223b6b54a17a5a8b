// src/providers/http.rs
use super::{FundingSource, ProviderError};
use crate::config::GmxConfig;
use crate::types::RawFundingResponse;
use std::time::Duration;

/// Funding data gateway over HTTP: `GET {endpoint}?symbol=..&chain=..`
/// returning the long/short JSON document.
pub struct HttpFundingSource {
    pub http: reqwest::Client,
    pub endpoint: String,
    pub chain: String,
}

impl HttpFundingSource {
    /// `timeout` bounds every request made through this source.
    pub fn new(
        endpoint: impl Into<String>,
        chain: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gmx-funding/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProviderError::Http)?;
        Ok(Self { http, endpoint: endpoint.into(), chain: chain.into() })
    }

    pub fn from_config(cfg: &GmxConfig) -> Result<Self, ProviderError> {
        let endpoint = cfg.endpoint.clone().ok_or(ProviderError::NotConfigured("endpoint"))?;
        Self::new(endpoint, cfg.chain.clone(), cfg.timeout())
    }
}

#[async_trait::async_trait]
impl FundingSource for HttpFundingSource {
    async fn fetch(&self, symbol: &str) -> Result<RawFundingResponse, ProviderError> {
        tracing::debug!(endpoint = %self.endpoint, symbol, chain = %self.chain, "fetching funding data");
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("symbol", symbol), ("chain", self.chain.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
