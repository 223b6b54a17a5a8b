// src/report.rs
use crate::types::{MarketSummary, OpportunityRecord};

pub const REPORT_TITLE: &str = "GMX v2 Funding Rates (% per hour)";

/// Per-symbol text report. A side the source did not list gets a
/// placeholder line instead of a rate.
pub fn render_report(markets: &[MarketSummary]) -> String {
    let mut out = format!("\n{REPORT_TITLE}\n");
    for m in markets {
        let long = match m.long_rate_per_hour {
            Some(r) => format!("  Long funding rate: {r:.4}%"),
            None => "  No long funding rate available.".to_string(),
        };
        let short = match m.short_rate_per_hour {
            Some(r) => format!("  Short funding rate: {r:.4}%"),
            None => "  No short funding rate available.".to_string(),
        };
        out.push_str(&format!("\n{}\n{long}\n{short}\n", m.symbol));
    }
    out
}

/// Markets in the order given by `ranked` (symbols), net rate as % per 8h.
/// Symbols without a matching market are skipped.
pub fn render_ranking(markets: &[MarketSummary], ranked: &[String]) -> String {
    let mut out = String::from("\nGMX v2 markets by net funding rate (% per 8h)\n\n");
    for (i, sym) in ranked.iter().enumerate() {
        if let Some(m) = markets.iter().find(|m| &m.symbol == sym) {
            out.push_str(&format!("{:>3}. {:<10} {:>+9.4}%\n", i + 1, m.symbol, m.net_rate * 100.0));
        }
    }
    out
}

pub fn render_json(records: &[OpportunityRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

pub trait Reporter {
    fn emit(&self, text: &str) -> anyhow::Result<()>;
}

pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn emit(&self, text: &str) -> anyhow::Result<()> {
        use std::io::Write;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}")?;
        Ok(())
    }
}
