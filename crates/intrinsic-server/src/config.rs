use intrinsic_core::{
    ProviderConfig, ProviderId, SourceError, ValuationEngine, ValuationPolicy, ValuationStrategy,
};

use crate::cli::Cli;

/// Settings resolved once at startup from flags and environment.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub provider: ProviderConfig,
    pub engine: ValuationEngine,
}

impl RuntimeConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, SourceError> {
        let provider_id = ProviderId::from(cli.provider);
        let api_key = cli.api_key.as_deref().or(match provider_id {
            ProviderId::Alphavantage => cli.alphavantage_key.as_deref(),
            ProviderId::Fmp => cli.fmp_key.as_deref(),
        });

        let mut provider = ProviderConfig::new(provider_id, api_key)?
            .with_timeout_ms(cli.timeout_ms)
            .with_income_periods(cli.income_periods);
        if let Some(base_url) = &cli.base_url {
            provider = provider.with_base_url(base_url);
        }

        let policy = ValuationPolicy::default().with_fixed_pe(cli.fixed_pe);
        let engine = ValuationEngine::new(policy, ValuationStrategy::from(cli.strategy))?;

        Ok(Self { provider, engine })
    }
}
