// src/providers/mod.rs
use async_trait::async_trait;

use crate::config::GmxConfig;
use crate::types::RawFundingResponse;

pub mod file;
pub mod http;

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,
    #[error("http: {0}")]
    Http(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not configured: {0}")]
    NotConfigured(&'static str),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if let Some(status) = e.status() {
            ProviderError::Status(status)
        } else {
            ProviderError::Http(e)
        }
    }
}

#[async_trait]
pub trait FundingSource: Send + Sync {
    /// Return long/short funding data per token, queried with `symbol`.
    async fn fetch(&self, symbol: &str) -> Result<RawFundingResponse, ProviderError>;
}

/// Fetch once and turn any failure into `None` plus an error log.
/// No retries happen here.
pub async fn fetch_or_none(
    source: &dyn FundingSource,
    query_symbol: Option<&str>,
    cfg: &GmxConfig,
) -> Option<RawFundingResponse> {
    let symbol = cfg.query_symbol(query_symbol);
    match source.fetch(&symbol).await {
        Ok(resp) => {
            #[cfg(feature = "metrics")]
            crate::metrics::FETCHES_TOTAL.with_label_values(&["ok"]).inc();
            Some(resp)
        }
        Err(e) => {
            #[cfg(feature = "metrics")]
            crate::metrics::FETCHES_TOTAL.with_label_values(&["error"]).inc();
            tracing::error!("error fetching funding data for query symbol {symbol}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records the symbols it was asked for.
    struct Canned {
        resp: Option<RawFundingResponse>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FundingSource for Canned {
        async fn fetch(&self, symbol: &str) -> Result<RawFundingResponse, ProviderError> {
            self.seen.lock().unwrap().push(symbol.to_string());
            self.resp.clone().ok_or(ProviderError::Timeout)
        }
    }

    fn canned(resp: Option<RawFundingResponse>) -> Canned {
        Canned { resp, seen: Mutex::new(Vec::new()) }
    }

    #[tokio::test]
    async fn absent_query_uses_default_symbol() {
        let src = canned(Some(RawFundingResponse::default()));
        let cfg = GmxConfig::default();
        assert!(fetch_or_none(&src, None, &cfg).await.is_some());
        assert!(fetch_or_none(&src, Some("BTC"), &cfg).await.is_some());
        assert!(fetch_or_none(&src, Some("LINK"), &cfg).await.is_some());
        assert_eq!(*src.seen.lock().unwrap(), ["WBTC", "WBTC", "LINK"]);
    }

    #[tokio::test]
    async fn failure_becomes_none() {
        let src = canned(None);
        assert_eq!(fetch_or_none(&src, None, &GmxConfig::default()).await, None);
    }

    #[tokio::test]
    async fn passes_response_through_untouched() {
        let resp: RawFundingResponse = serde_json::from_value(json!({
            "long": {"ETH": {"net_rate_per_hour": 0.1, "open_interest_imbalance": 2}}
        }))
        .unwrap();
        let src = canned(Some(resp.clone()));
        assert_eq!(fetch_or_none(&src, None, &GmxConfig::default()).await, Some(resp));
    }
}
