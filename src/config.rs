// src/config.rs
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the TOML config file (may come from `.env`).
pub const CONFIG_PATH_ENV: &str = "PATH_TO_GMX_CONFIG_FILE";
pub const SUPPORTED_CHAINS: [&str; 2] = ["arbitrum", "avalanche"];

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("PATH_TO_GMX_CONFIG_FILE is not set (checked environment and .env)")]
    MissingPath,
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct GmxConfig {
    #[serde(default = "d_chain")]              pub chain: String,
    #[serde(default)]                          pub endpoint: Option<String>,
    #[serde(default = "d_timeout_secs")]       pub timeout_secs: u64,
    #[serde(default = "d_query_symbol")]       pub default_query_symbol: String,
    #[serde(default = "d_symbol_mapping")]     pub token_symbol_mapping: HashMap<String, String>,
}
fn d_chain() -> String { "arbitrum".into() }
fn d_timeout_secs() -> u64 { 10 }
fn d_query_symbol() -> String { "WBTC".into() }
fn d_symbol_mapping() -> HashMap<String, String> {
    HashMap::from([("BTC".to_string(), "WBTC".to_string())])
}

impl Default for GmxConfig {
    fn default() -> Self {
        Self {
            chain: d_chain(),
            endpoint: None,
            timeout_secs: d_timeout_secs(),
            default_query_symbol: d_query_symbol(),
            token_symbol_mapping: d_symbol_mapping(),
        }
    }
}

impl GmxConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: GmxConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    /// Loads `.env` if present, then reads the file named by [`CONFIG_PATH_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env loaded: {e}");
        }
        let path = std::env::var_os(CONFIG_PATH_ENV).ok_or(ConfigError::MissingPath)?;
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_CHAINS.contains(&self.chain.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "chain",
                reason: format!("`{}` not one of {:?}", self.chain, SUPPORTED_CHAINS),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue { field: "timeout_secs", reason: "must be > 0".into() });
        }
        if self.default_query_symbol.trim().is_empty() {
            return Err(ConfigError::MissingField("default_query_symbol"));
        }
        Ok(())
    }

    #[inline]
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    /// Symbol actually sent to the source: the caller's hint (alias-mapped,
    /// e.g. BTC -> WBTC) or the default query symbol.
    pub fn query_symbol(&self, hint: Option<&str>) -> String {
        match hint.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => self
                .token_symbol_mapping
                .get(s)
                .cloned()
                .unwrap_or_else(|| s.to_string()),
            None => self.default_query_symbol.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = GmxConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.chain, "arbitrum");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.default_query_symbol, "WBTC");
        assert!(cfg.endpoint.is_none());
    }

    #[test]
    fn query_symbol_maps_aliases_and_falls_back_to_default() {
        let cfg = GmxConfig::default();
        assert_eq!(cfg.query_symbol(None), "WBTC");
        assert_eq!(cfg.query_symbol(Some("  ")), "WBTC");
        assert_eq!(cfg.query_symbol(Some("BTC")), "WBTC");
        assert_eq!(cfg.query_symbol(Some("ETH")), "ETH");
    }

    #[test]
    fn rejects_unknown_chain_and_zero_timeout() {
        assert!(matches!(
            GmxConfig::from_toml_str("chain = \"solana\""),
            Err(ConfigError::InvalidValue { field: "chain", .. })
        ));
        assert!(matches!(
            GmxConfig::from_toml_str("timeout_secs = 0"),
            Err(ConfigError::InvalidValue { field: "timeout_secs", .. })
        ));
        assert!(matches!(GmxConfig::from_toml_str("timeout_secs = \"x\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
chain = "avalanche"
endpoint = "http://localhost:9000/funding"
timeout_secs = 3

[token_symbol_mapping]
BTC = "BTC.b"
"#
        )
        .unwrap();
        let cfg = GmxConfig::load(f.path()).unwrap();
        assert_eq!(cfg.chain, "avalanche");
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:9000/funding"));
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.query_symbol(Some("BTC")), "BTC.b");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            GmxConfig::load("/definitely/not/here.toml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
