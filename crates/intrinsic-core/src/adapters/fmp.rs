use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use super::fetch_json;
use crate::data_source::{CapabilitySet, SnapshotSource, SourceError};
use crate::growth::{trailing_cagr, MIN_GROWTH_PERIODS};
use crate::http_client::HttpClient;
use crate::parsing::NumericField;
use crate::{FundamentalSnapshot, ProviderConfig, ProviderId, Ticker};

/// Widest fiscal-year range laid out by year before falling back to order.
const MAX_FISCAL_SPAN: usize = 50;

/// Financial Modeling Prep adapter: price from `quote`, EPS history from
/// annual `income-statement`, growth as the trailing EPS CAGR.
#[derive(Clone)]
pub struct FmpAdapter {
    config: ProviderConfig,
    http_client: Arc<dyn HttpClient>,
}

impl FmpAdapter {
    pub fn new(config: ProviderConfig, http_client: Arc<dyn HttpClient>) -> Result<Self, SourceError> {
        if config.provider != ProviderId::Fmp {
            return Err(SourceError::config(format!(
                "fmp adapter cannot use a {} configuration",
                config.provider
            )));
        }
        if config.income_periods < MIN_GROWTH_PERIODS {
            return Err(SourceError::config(format!(
                "fmp income_periods must be at least {MIN_GROWTH_PERIODS}, got {}",
                config.income_periods
            )));
        }
        Ok(Self {
            config,
            http_client,
        })
    }

    fn quote_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}/api/v3/quote/{}?apikey={}",
            self.config.base_url,
            urlencoding::encode(ticker.as_str()),
            urlencoding::encode(self.config.api_key())
        )
    }

    fn income_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}/api/v3/income-statement/{}?period=annual&limit={}&apikey={}",
            self.config.base_url,
            urlencoding::encode(ticker.as_str()),
            self.config.income_periods,
            urlencoding::encode(self.config.api_key())
        )
    }

    async fn fetch(&self, ticker: Ticker) -> Result<FundamentalSnapshot, SourceError> {
        let provider = ProviderId::Fmp;
        let timeout_ms = self.config.timeout_ms;
        let http_client = self.http_client.as_ref();

        let (quotes, statements) = tokio::join!(
            fetch_json::<Vec<FmpQuote>>(http_client, provider, self.quote_url(&ticker), timeout_ms),
            fetch_json::<Vec<FmpIncomeStatement>>(
                http_client,
                provider,
                self.income_url(&ticker),
                timeout_ms,
            ),
        );
        let quotes = quotes?;
        let mut statements = statements?;

        let Some(quote) = quotes.into_iter().next() else {
            return Err(SourceError::data(format!("could not get a quote for {ticker}")));
        };
        if statements.is_empty() {
            return Err(SourceError::data(format!(
                "could not get an income statement for {ticker}"
            )));
        }

        // Newest first; undated periods keep their relative order at the end.
        statements.sort_by(|a, b| b.date.cmp(&a.date));

        let eps = statements[0]
            .eps
            .require(&format!("EPS for {ticker} ({})", statements[0].period_label()))?;
        let price = quote.price.require(&format!("price for {ticker}"))?;

        let history = eps_by_fiscal_year(&statements);
        let growth_rate = trailing_cagr(&history, self.config.income_periods);
        if growth_rate.is_none() {
            tracing::debug!(%ticker, periods = history.len(), "eps growth unavailable");
        }

        FundamentalSnapshot::new(ticker.clone(), provider, eps, price, growth_rate).map_err(
            |error| SourceError::data(format!("invalid EPS or price for {ticker}: {error}")),
        )
    }
}

impl SnapshotSource for FmpAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Fmp
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::new(true)
    }

    fn fetch_snapshot<'a>(
        &'a self,
        ticker: Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<FundamentalSnapshot, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch(ticker))
    }
}

// FMP API response structures
#[derive(Debug, Clone, Deserialize)]
struct FmpQuote {
    #[serde(default)]
    price: NumericField,
}

#[derive(Debug, Clone, Deserialize)]
struct FmpIncomeStatement {
    #[serde(default)]
    date: Option<String>,
    #[serde(rename = "calendarYear", default)]
    calendar_year: Option<String>,
    #[serde(default)]
    eps: NumericField,
}

impl FmpIncomeStatement {
    fn period_label(&self) -> &str {
        self.date
            .as_deref()
            .or(self.calendar_year.as_deref())
            .unwrap_or("latest period")
    }

    fn fiscal_year(&self) -> Option<i32> {
        let year = self
            .calendar_year
            .as_deref()
            .or_else(|| self.date.as_deref().and_then(|date| date.get(..4)))?;
        year.trim().parse().ok()
    }
}

/// One EPS slot per fiscal year, newest first, `None` for a year the
/// statements skip or whose EPS is unreadable.
///
/// Falls back to one slot per statement when any statement lacks a year.
fn eps_by_fiscal_year(newest_first: &[FmpIncomeStatement]) -> Vec<Option<f64>> {
    let positional = || {
        newest_first
            .iter()
            .map(|statement| statement.eps.value())
            .collect::<Vec<_>>()
    };

    let Some(years) = newest_first
        .iter()
        .map(FmpIncomeStatement::fiscal_year)
        .collect::<Option<Vec<_>>>()
    else {
        return positional();
    };
    let (Some(&newest), Some(&oldest)) = (years.iter().max(), years.iter().min()) else {
        return positional();
    };
    let span = usize::try_from(newest - oldest).unwrap_or(0);
    if span >= MAX_FISCAL_SPAN {
        return positional();
    }

    let mut slots = vec![None; span + 1];
    for (statement, year) in newest_first.iter().zip(years) {
        let Ok(offset) = usize::try_from(newest - year) else {
            continue;
        };
        // Keep the first statement seen for a year; duplicates are restatements.
        if let Some(slot) = slots.get_mut(offset) {
            if slot.is_none() {
                *slot = statement.eps.value();
            }
        }
    }
    slots
}
