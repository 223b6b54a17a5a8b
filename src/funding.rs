// src/funding.rs
use serde_json::{Map, Value};

use crate::types::{
    MarketSummary, OpportunityRecord, PositionSide, RawFundingResponse, EXCHANGE,
    FUNDING_PERIOD_HOURS,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OpportunityError {
    #[error("{side} side is not a mapping of symbols")]
    MalformedSide { side: PositionSide },
    #[error("{side}/{symbol}: entry is not a mapping")]
    MalformedEntry { side: PositionSide, symbol: String },
    #[error("{side}/{symbol}: missing field `{field}`")]
    MissingField { side: PositionSide, symbol: String, field: &'static str },
    #[error("{side}/{symbol}: field `{field}` is not numeric")]
    NotNumeric { side: PositionSide, symbol: String, field: &'static str },
}

/// One validated `{symbol: {...}}` entry of a side.
#[derive(Debug, Clone, PartialEq)]
struct SideEntry {
    side: PositionSide,
    symbol: String,
    net_rate_per_hour: f64,
    open_interest_imbalance: f64,
}

/// Converts a raw per-hour rate (percent) into the signed fractional
/// rate per funding period seen by a holder of `side`.
pub fn period_funding_rate(side: PositionSide, net_rate_per_hour: f64) -> f64 {
    let mut rate = net_rate_per_hour * FUNDING_PERIOD_HOURS;
    if side == PositionSide::Long {
        rate = -rate;
    }
    rate / 100.0
}

fn required_f64(
    fields: &Map<String, Value>,
    side: PositionSide,
    symbol: &str,
    field: &'static str,
) -> Result<f64, OpportunityError> {
    let v = fields.get(field).ok_or_else(|| OpportunityError::MissingField {
        side,
        symbol: symbol.to_string(),
        field,
    })?;
    v.as_f64().ok_or_else(|| OpportunityError::NotNumeric {
        side,
        symbol: symbol.to_string(),
        field,
    })
}

/// Walks long then short, symbols in document order. Absent sides are skipped.
fn validated_entries(resp: &RawFundingResponse) -> Result<Vec<SideEntry>, OpportunityError> {
    let mut out = Vec::new();
    for side in PositionSide::ALL {
        let Some(raw) = resp.side(side) else { continue };
        let symbols = raw.as_object().ok_or(OpportunityError::MalformedSide { side })?;
        for (symbol, details) in symbols {
            let fields = details.as_object().ok_or_else(|| OpportunityError::MalformedEntry {
                side,
                symbol: symbol.clone(),
            })?;
            out.push(SideEntry {
                side,
                symbol: symbol.clone(),
                net_rate_per_hour: required_f64(fields, side, symbol, "net_rate_per_hour")?,
                open_interest_imbalance: required_f64(
                    fields,
                    side,
                    symbol,
                    "open_interest_imbalance",
                )?,
            });
        }
    }
    Ok(out)
}

fn report_failure(what: &str, e: &OpportunityError) {
    tracing::error!("failed to {what}: {e}");
    #[cfg(feature = "metrics")]
    crate::metrics::PARSE_FAILURES_TOTAL.inc();
}

/// Flattens a funding response into one record per (side, symbol).
///
/// A symbol listed on both sides yields two records. Any malformed entry
/// fails the whole response; no partial list is returned.
pub fn parse_opportunities(
    resp: &RawFundingResponse,
) -> Result<Vec<OpportunityRecord>, OpportunityError> {
    let entries = validated_entries(resp).inspect_err(|e| report_failure("parse opportunities", e))?;

    let records: Vec<OpportunityRecord> = entries
        .into_iter()
        .map(|e| {
            #[cfg(feature = "metrics")]
            crate::metrics::RECORDS_TOTAL.with_label_values(&[e.side.as_str()]).inc();
            OpportunityRecord {
                exchange: EXCHANGE.to_string(),
                funding_rate: period_funding_rate(e.side, e.net_rate_per_hour),
                symbol: e.symbol,
                skew_usd: e.open_interest_imbalance,
            }
        })
        .collect();
    tracing::debug!(count = records.len(), "parsed funding opportunities");
    Ok(records)
}

/// Groups both sides per symbol. Symbols come in first-seen order (long side
/// first); a side the source did not list stays `None`.
pub fn summarize_markets(resp: &RawFundingResponse) -> Result<Vec<MarketSummary>, OpportunityError> {
    let entries = validated_entries(resp).inspect_err(|e| report_failure("summarize markets", e))?;

    let mut out: Vec<MarketSummary> = Vec::new();
    for e in entries {
        let rate = period_funding_rate(e.side, e.net_rate_per_hour);
        let idx = match out.iter().position(|m| m.symbol == e.symbol) {
            Some(i) => i,
            None => {
                out.push(MarketSummary {
                    symbol: e.symbol.clone(),
                    long_rate_per_hour: None,
                    short_rate_per_hour: None,
                    net_rate: rate,
                });
                out.len() - 1
            }
        };
        let m = &mut out[idx];
        match e.side {
            PositionSide::Long => m.long_rate_per_hour = Some(e.net_rate_per_hour),
            PositionSide::Short => m.short_rate_per_hour = Some(e.net_rate_per_hour),
        }
        m.net_rate = m.net_rate.max(rate);
    }
    Ok(out)
}
