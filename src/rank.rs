// src/rank.rs
use std::cmp::Ordering;
use std::fmt::Display;

use serde_json::Value;

use crate::types::MarketSummary;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RankError {
    #[error("entry `{key}` has no numeric net_rate")]
    MissingNetRate { key: String },
}

/// Anything that carries a `net_rate` to rank by.
pub trait NetRate {
    fn net_rate(&self) -> Option<f64>;
}

impl NetRate for f64 {
    fn net_rate(&self) -> Option<f64> {
        Some(*self)
    }
}

impl NetRate for MarketSummary {
    fn net_rate(&self) -> Option<f64> {
        Some(self.net_rate)
    }
}

/// Untyped entries: reads the `"net_rate"` field of an object.
impl NetRate for Value {
    fn net_rate(&self) -> Option<f64> {
        self.get("net_rate").and_then(Value::as_f64)
    }
}

/// Keys ordered by `net_rate`, highest first. Equal rates keep their
/// input order. Fails as a whole if any entry lacks a usable rate.
pub fn rank_keys<'a, K, V, I>(entries: I) -> Result<Vec<K>, RankError>
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: Clone + Display + 'a,
    V: NetRate + ?Sized + 'a,
{
    let mut keyed = Vec::new();
    for (k, v) in entries {
        match v.net_rate() {
            Some(r) if !r.is_nan() => keyed.push((k.clone(), r)),
            _ => {
                tracing::error!("failed to rank entries: `{k}` has no numeric net_rate");
                return Err(RankError::MissingNetRate { key: k.to_string() });
            }
        }
    }
    // stable
    keyed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    Ok(keyed.into_iter().map(|(k, _)| k).collect())
}
