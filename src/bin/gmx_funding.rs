// src/bin/gmx_funding.rs
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gmx_funding::{
    config::GmxConfig,
    filter::filter_by_symbols,
    funding::{parse_opportunities, summarize_markets},
    providers::{fetch_or_none, file::FileFundingSource, http::HttpFundingSource, FundingSource},
    rank::rank_keys,
    report::{render_json, render_ranking, render_report, Reporter, StdoutReporter},
};
use tracing_subscriber::EnvFilter;

/// Print GMX v2 funding rates per token.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML config file (defaults to $PATH_TO_GMX_CONFIG_FILE)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read a saved JSON snapshot instead of calling the gateway
    #[arg(long)]
    input: Option<PathBuf>,
    /// Query symbol sent to the source (aliases like BTC map to WBTC)
    #[arg(long)]
    symbol: Option<String>,
    /// Only show these symbols
    #[arg(long, value_delimiter = ',')]
    filter: Vec<String>,
    /// Rank markets by net funding rate
    #[arg(long, conflicts_with = "json")]
    rank: bool,
    /// Print opportunity records as JSON
    #[arg(long)]
    json: bool,
    /// Dump Prometheus counters after the run
    #[cfg(feature = "metrics")]
    #[arg(long)]
    metrics: bool,
}

fn load_config(args: &Args) -> anyhow::Result<GmxConfig> {
    Ok(match (&args.config, &args.input) {
        (Some(path), _) => GmxConfig::load(path)?,
        // offline runs need nothing from the config file
        (None, Some(_)) => GmxConfig::default(),
        (None, None) => GmxConfig::from_env()?,
    })
}

fn fail(msg: &str) -> anyhow::Result<ExitCode> {
    eprintln!("{msg}");
    Ok(ExitCode::FAILURE)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = load_config(&args)?;

    let source: Box<dyn FundingSource> = match &args.input {
        Some(path) => Box::new(FileFundingSource::new(path.clone())),
        None => match HttpFundingSource::from_config(&cfg) {
            Ok(src) => Box::new(src),
            Err(e) => {
                tracing::error!("cannot build funding source for chain {}: {e}", cfg.chain);
                return fail("Failed to retrieve funding rate data.");
            }
        },
    };

    let Some(data) = fetch_or_none(source.as_ref(), args.symbol.as_deref(), &cfg).await else {
        return fail("Failed to retrieve funding rate data.");
    };
    if !data.has_any_side() {
        return fail("The funding data does not have the expected structure.");
    }

    let reporter = StdoutReporter;
    if args.json {
        let Ok(mut records) = parse_opportunities(&data) else {
            return fail("Failed to parse funding opportunities.");
        };
        if !args.filter.is_empty() {
            records = filter_by_symbols(&records, args.filter.as_slice());
        }
        reporter.emit(&render_json(&records)?)?;
    } else {
        let Ok(mut markets) = summarize_markets(&data) else {
            return fail("Failed to parse funding opportunities.");
        };
        if !args.filter.is_empty() {
            markets = filter_by_symbols(&markets, args.filter.as_slice());
        }
        if args.rank {
            let Ok(order) = rank_keys(markets.iter().map(|m| (&m.symbol, m))) else {
                return fail("Failed to rank markets.");
            };
            reporter.emit(&render_ranking(&markets, &order))?;
        } else {
            reporter.emit(&render_report(&markets))?;
        }
    }

    #[cfg(feature = "metrics")]
    if args.metrics {
        reporter.emit(&gmx_funding::metrics::gather_text())?;
    }

    Ok(ExitCode::SUCCESS)
}
