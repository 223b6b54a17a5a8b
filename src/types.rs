// src/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Venue tag stamped on every record.
pub const EXCHANGE: &str = "GMX";
/// Hours in one funding period.
pub const FUNDING_PERIOD_HOURS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub const ALL: [PositionSide; 2] = [PositionSide::Long, PositionSide::Short];

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSide::Long => "long",
            PositionSide::Short => "short",
        }
    }
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Funding document as returned by the source:
/// `{"long": {SYM: {...}}, "short": {SYM: {...}}}`.
///
/// Sides are kept untyped here; field validation happens in
/// [`crate::funding::parse_opportunities`]. Unknown top-level keys
/// (e.g. `"parameter"`) are dropped. A side sent as `null` is kept as
/// `Some(Value::Null)` so it is rejected as malformed, not skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFundingResponse {
    #[serde(default, deserialize_with = "present_side", skip_serializing_if = "Option::is_none")]
    pub long: Option<Value>,
    #[serde(default, deserialize_with = "present_side", skip_serializing_if = "Option::is_none")]
    pub short: Option<Value>,
}

// Only runs when the key exists; a missing key falls back to `default`.
fn present_side<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}

impl RawFundingResponse {
    pub fn side(&self, side: PositionSide) -> Option<&Value> {
        match side {
            PositionSide::Long => self.long.as_ref(),
            PositionSide::Short => self.short.as_ref(),
        }
    }

    /// True when at least one of `long` / `short` is present.
    pub fn has_any_side(&self) -> bool {
        self.long.is_some() || self.short.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub exchange: String,
    pub symbol: String,
    pub skew_usd: f64,     // open interest imbalance, USD
    pub funding_rate: f64, // signed fraction per 8h period
}

/// Per-symbol view over both sides, used by the report and ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub symbol: String,
    /// Raw long rate in % per hour, if the source had one.
    pub long_rate_per_hour: Option<f64>,
    pub short_rate_per_hour: Option<f64>,
    /// Best `funding_rate` across the symbol's sides.
    pub net_rate: f64,
}
