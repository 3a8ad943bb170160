//! CLI argument definitions for intrinsic.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the HTTP valuation service |
//! | `value` | Value one ticker and print the JSON result |
//!
//! # Global Options
//!
//! | Option | Env | Default | Description |
//! |--------|-----|---------|-------------|
//! | `--provider` | `INTRINSIC_PROVIDER` | `alphavantage` | Market data provider |
//! | `--api-key` | `INTRINSIC_API_KEY` | | Provider API key |
//! | `--strategy` | `INTRINSIC_STRATEGY` | `growth-multiple` | Default valuation strategy |
//! | `--fixed-pe` | | `15` | P/E used by `fixed-multiple` |
//! | `--timeout-ms` | | `10000` | Per-call provider timeout |
//! | `--log-level` | `INTRINSIC_LOG_LEVEL` | `info` | Base log level |
//! | `--log-format` | `INTRINSIC_LOG_FORMAT` | `pretty` | `pretty` or `json` |
//!
//! When `--api-key` is not given, the provider's conventional variable is
//! used (`ALPHAVANTAGE_KEY` or `FMP_API_KEY`).
//!
//! # Examples
//!
//! ```bash
//! ALPHAVANTAGE_KEY=... intrinsic serve --bind 127.0.0.1:5000
//! FMP_API_KEY=... intrinsic --provider fmp value AAPL --pretty
//! ```

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use intrinsic_core::{ProviderId, ValuationStrategy};

/// Sticker-price valuations from live EPS and price data.
#[derive(Debug, Parser)]
#[command(name = "intrinsic", author, version, about = "Sticker-price valuation service")]
pub struct Cli {
    /// Market data provider.
    #[arg(
        long,
        global = true,
        env = "INTRINSIC_PROVIDER",
        value_enum,
        default_value_t = ProviderSelector::Alphavantage
    )]
    pub provider: ProviderSelector,

    /// Provider API key; overrides the provider-specific variables.
    #[arg(long, global = true, env = "INTRINSIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, env = "ALPHAVANTAGE_KEY", hide = true, hide_env_values = true)]
    pub alphavantage_key: Option<String>,

    #[arg(long, global = true, env = "FMP_API_KEY", hide = true, hide_env_values = true)]
    pub fmp_key: Option<String>,

    /// Override the provider base URL.
    #[arg(long, global = true, env = "INTRINSIC_BASE_URL")]
    pub base_url: Option<String>,

    /// Default valuation strategy; requests may override it.
    #[arg(
        long,
        global = true,
        env = "INTRINSIC_STRATEGY",
        value_enum,
        default_value_t = StrategySelector::GrowthMultiple
    )]
    pub strategy: StrategySelector,

    /// P/E multiple used by the fixed-multiple strategy.
    #[arg(long, global = true, default_value_t = 15.0)]
    pub fixed_pe: f64,

    /// Per-call provider timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Annual income statements requested for growth estimation (fmp).
    #[arg(long, global = true, default_value_t = 5)]
    pub income_periods: usize,

    /// Base log level; `RUST_LOG` takes precedence.
    #[arg(long, global = true, env = "INTRINSIC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(
        long,
        global = true,
        env = "INTRINSIC_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP valuation service.
    Serve(ServeArgs),
    /// Value a single ticker and print the JSON result.
    Value(ValueArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long, env = "INTRINSIC_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,
}

#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Ticker symbol, e.g. AAPL.
    pub ticker: String,

    /// Strategy for this run only.
    #[arg(long = "with", value_enum)]
    pub with_strategy: Option<StrategySelector>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderSelector {
    #[value(alias = "alpha_vantage")]
    Alphavantage,
    Fmp,
}

impl From<ProviderSelector> for ProviderId {
    fn from(value: ProviderSelector) -> Self {
        match value {
            ProviderSelector::Alphavantage => Self::Alphavantage,
            ProviderSelector::Fmp => Self::Fmp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategySelector {
    #[value(alias = "growth_multiple")]
    GrowthMultiple,
    #[value(alias = "fixed_multiple")]
    FixedMultiple,
}

impl From<StrategySelector> for ValuationStrategy {
    fn from(value: StrategySelector) -> Self {
        match value {
            StrategySelector::GrowthMultiple => Self::GrowthMultiple,
            StrategySelector::FixedMultiple => Self::FixedMultiple,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}
