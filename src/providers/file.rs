// src/providers/file.rs
use std::path::PathBuf;

use super::{FundingSource, ProviderError};
use crate::types::RawFundingResponse;

/// Saved funding snapshot on disk. The query symbol is ignored.
pub struct FileFundingSource {
    pub path: PathBuf,
}

impl FileFundingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl FundingSource for FileFundingSource {
    async fn fetch(&self, symbol: &str) -> Result<RawFundingResponse, ProviderError> {
        tracing::debug!(path = %self.path.display(), symbol, "reading funding snapshot");
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
