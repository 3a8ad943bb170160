use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use super::fetch_json;
use crate::data_source::{CapabilitySet, SnapshotSource, SourceError};
use crate::http_client::HttpClient;
use crate::parsing::NumericField;
use crate::{FundamentalSnapshot, ProviderConfig, ProviderId, Ticker};

/// Alpha Vantage adapter: EPS from `OVERVIEW`, price from `GLOBAL_QUOTE`.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    config: ProviderConfig,
    http_client: Arc<dyn HttpClient>,
}

impl AlphaVantageAdapter {
    pub fn new(config: ProviderConfig, http_client: Arc<dyn HttpClient>) -> Result<Self, SourceError> {
        if config.provider != ProviderId::Alphavantage {
            return Err(SourceError::config(format!(
                "alphavantage adapter cannot use a {} configuration",
                config.provider
            )));
        }
        Ok(Self {
            config,
            http_client,
        })
    }

    fn query_url(&self, function: &str, ticker: &Ticker) -> String {
        format!(
            "{}/query?function={function}&symbol={}&apikey={}",
            self.config.base_url,
            urlencoding::encode(ticker.as_str()),
            urlencoding::encode(self.config.api_key())
        )
    }

    async fn fetch(&self, ticker: Ticker) -> Result<FundamentalSnapshot, SourceError> {
        let provider = ProviderId::Alphavantage;
        let timeout_ms = self.config.timeout_ms;
        let http_client = self.http_client.as_ref();

        let (overview, quote) = tokio::join!(
            fetch_json::<OverviewResponse>(
                http_client,
                provider,
                self.query_url("OVERVIEW", &ticker),
                timeout_ms,
            ),
            fetch_json::<GlobalQuoteResponse>(
                http_client,
                provider,
                self.query_url("GLOBAL_QUOTE", &ticker),
                timeout_ms,
            ),
        );
        let overview = overview?;
        let quote = quote?;

        // Unknown tickers come back as `{}` and `{"Global Quote": {}}`.
        let Some(quote) = quote.quote.filter(|quote| !quote.is_empty()) else {
            return Err(SourceError::data(format!(
                "could not get a quote for {ticker}"
            )));
        };
        if overview.is_empty() {
            return Err(SourceError::data(format!(
                "could not get a company overview for {ticker}"
            )));
        }

        let eps = overview.eps.require(&format!("EPS for {ticker}"))?;
        let price = quote.price.require(&format!("price for {ticker}"))?;

        FundamentalSnapshot::new(ticker.clone(), provider, eps, price, None).map_err(|error| {
            SourceError::data(format!("invalid EPS or price for {ticker}: {error}"))
        })
    }
}

impl SnapshotSource for AlphaVantageAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Alphavantage
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::new(false)
    }

    fn fetch_snapshot<'a>(
        &'a self,
        ticker: Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<FundamentalSnapshot, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch(ticker))
    }
}

// Alpha Vantage API response structures
#[derive(Debug, Clone, Deserialize)]
struct OverviewResponse {
    #[serde(rename = "Symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "EPS", default)]
    eps: NumericField,
}

impl OverviewResponse {
    fn is_empty(&self) -> bool {
        self.symbol.is_none() && self.eps == NumericField::Absent
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    quote: Option<GlobalQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "05. price", default)]
    price: NumericField,
}

impl GlobalQuote {
    fn is_empty(&self) -> bool {
        self.symbol.is_none() && self.price == NumericField::Absent
    }
}
