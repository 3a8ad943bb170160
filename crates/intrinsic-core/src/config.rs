//! Explicit provider configuration injected into adapters.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::adapters::{AlphaVantageAdapter, FmpAdapter};
use crate::http_client::{HttpClient, DEFAULT_TIMEOUT_MS};
use crate::{ProviderId, SnapshotSource, SourceError};

/// Annual income-statement periods requested for growth estimation.
pub const DEFAULT_INCOME_PERIODS: usize = 5;

/// Provider credentials and transport settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: ProviderId,
    api_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub income_periods: usize,
}

impl ProviderConfig {
    /// Build a config for `provider`, rejecting a missing or blank key.
    pub fn new(provider: ProviderId, api_key: Option<&str>) -> Result<Self, SourceError> {
        let api_key = api_key.map(str::trim).unwrap_or_default();
        if api_key.is_empty() {
            return Err(SourceError::config(format!(
                "{provider} API key is not configured; set {} or pass --api-key",
                provider.api_key_env()
            )));
        }

        Ok(Self {
            provider,
            api_key: api_key.to_owned(),
            base_url: default_base_url(provider).to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            income_periods: DEFAULT_INCOME_PERIODS,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_income_periods(mut self, income_periods: usize) -> Self {
        self.income_periods = income_periods;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("income_periods", &self.income_periods)
            .finish()
    }
}

pub const fn default_base_url(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::Alphavantage => "https://www.alphavantage.co",
        ProviderId::Fmp => "https://financialmodelingprep.com",
    }
}

/// Construct the adapter selected by `config`.
pub fn build_source(
    config: ProviderConfig,
    http_client: Arc<dyn HttpClient>,
) -> Result<Arc<dyn SnapshotSource>, SourceError> {
    let source: Arc<dyn SnapshotSource> = match config.provider {
        ProviderId::Alphavantage => Arc::new(AlphaVantageAdapter::new(config, http_client)?),
        ProviderId::Fmp => Arc::new(FmpAdapter::new(config, http_client)?),
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::StubHttpClient;
    use crate::ErrorKind;

    #[test]
    fn missing_key_is_config_error() {
        let err = ProviderConfig::new(ProviderId::Alphavantage, None).expect_err("no key");
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.message().contains("ALPHAVANTAGE_KEY"));

        let blank = ProviderConfig::new(ProviderId::Fmp, Some("  ")).expect_err("blank key");
        assert!(blank.message().contains("FMP_API_KEY"));
    }

    #[test]
    fn debug_output_hides_key() {
        let config = ProviderConfig::new(ProviderId::Fmp, Some("super-secret")).expect("key");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert_eq!(config.api_key(), "super-secret");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ProviderConfig::new(ProviderId::Alphavantage, Some("k"))
            .expect("key")
            .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn builds_selected_provider() {
        let config = ProviderConfig::new(ProviderId::Fmp, Some("k")).expect("key");
        let source = build_source(config, Arc::new(StubHttpClient::new())).expect("source");
        assert_eq!(source.id(), ProviderId::Fmp);
        assert!(source.capabilities().growth);
    }
}
