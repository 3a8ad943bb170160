use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical provider identifiers used in configuration and results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Alphavantage,
    Fmp,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::Alphavantage, Self::Fmp];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alphavantage => "alphavantage",
            Self::Fmp => "fmp",
        }
    }

    /// Environment variable conventionally holding this provider's key.
    pub const fn api_key_env(self) -> &'static str {
        match self {
            Self::Alphavantage => "ALPHAVANTAGE_KEY",
            Self::Fmp => "FMP_API_KEY",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alphavantage" | "alpha_vantage" => Ok(Self::Alphavantage),
            "fmp" | "financialmodelingprep" => Ok(Self::Fmp),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_aliases() {
        assert_eq!(
            "AlphaVantage".parse::<ProviderId>().expect("valid"),
            ProviderId::Alphavantage
        );
        assert_eq!(
            " financialmodelingprep ".parse::<ProviderId>().expect("valid"),
            ProviderId::Fmp
        );
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "yahoo".parse::<ProviderId>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidProvider { .. }));
    }
}
