// src/filter.rs
use std::collections::HashSet;

use crate::types::{MarketSummary, OpportunityRecord};

/// Rows keyed by token symbol.
pub trait Symbol {
    fn symbol(&self) -> &str;
}

impl Symbol for OpportunityRecord {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl Symbol for MarketSummary {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Rows whose symbol is in `symbols`, in their original order.
pub fn filter_by_symbols<T, S>(records: &[T], symbols: &[S]) -> Vec<T>
where
    T: Symbol + Clone,
    S: AsRef<str>,
{
    let wanted: HashSet<&str> = symbols.iter().map(AsRef::as_ref).collect();
    records
        .iter()
        .filter(|r| wanted.contains(r.symbol()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(symbol: &str, funding_rate: f64) -> OpportunityRecord {
        OpportunityRecord {
            exchange: "GMX".into(),
            symbol: symbol.into(),
            skew_usd: 0.0,
            funding_rate,
        }
    }

    #[test]
    fn keeps_order_of_records_not_of_filter() {
        let recs = vec![rec("WBTC", 0.1), rec("WETH", 0.2), rec("LINK", 0.3)];
        let out = filter_by_symbols(&recs, &["LINK", "WBTC"]);
        let symbols: Vec<&str> = out.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["WBTC", "LINK"]);
        assert_eq!(out[1], recs[2]);
    }

    #[test]
    fn both_sides_of_a_symbol_survive() {
        let recs = vec![rec("BTC", -0.0008), rec("ETH", 0.0), rec("BTC", 0.0016)];
        let out = filter_by_symbols(&recs, &[String::from("BTC")]);
        assert_eq!(out, vec![recs[0].clone(), recs[2].clone()]);
    }

    #[test]
    fn market_summaries_filter_the_same_way() {
        let market = |symbol: &str| MarketSummary {
            symbol: symbol.into(),
            long_rate_per_hour: Some(0.01),
            short_rate_per_hour: None,
            net_rate: -0.0008,
        };
        let markets = vec![market("WBTC"), market("WETH"), market("LINK")];
        let out = filter_by_symbols(&markets, &["LINK", "WBTC"]);
        assert_eq!(out, vec![markets[0].clone(), markets[2].clone()]);
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let recs = vec![rec("BTC", 0.0)];
        let none: [&str; 0] = [];
        assert!(filter_by_symbols(&recs, &none).is_empty());
    }
}
