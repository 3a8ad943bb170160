use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure category shared by validation, adapter and valuation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required credential or policy value missing/invalid.
    Config,
    /// Network failure, timeout or non-success status from the provider.
    Provider,
    /// Provider answered, but the payload is absent, non-numeric or out of domain.
    Data,
}

impl ErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Config => "config_error",
            Self::Provider => "provider_error",
            Self::Data => "data_error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Validation and contract errors exposed by `intrinsic-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("invalid provider '{value}', expected one of alphavantage, fmp")]
    InvalidProvider { value: String },
    #[error("invalid strategy '{value}', expected one of growth_multiple, fixed_multiple")]
    InvalidStrategy { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be greater than zero, got {value}")]
    NonPositiveValue { field: &'static str, value: f64 },
    #[error("growth rate {value} must be greater than -100%")]
    GrowthBelowTotalLoss { value: f64 },
    #[error("growth-derived P/E requires positive growth, got {value}")]
    NonPositiveGrowthMultiple { value: f64 },

    #[error("discount rate {value} must be greater than -100%")]
    InvalidDiscountRate { value: f64 },
    #[error("policy value '{field}' is invalid: {value}")]
    InvalidPolicyValue { field: &'static str, value: f64 },
    #[error("horizon '{field}' must be at least one year")]
    ZeroHorizon { field: &'static str },
}

impl ValidationError {
    /// Category used at the request boundary.
    ///
    /// Ticker and input-value problems are data errors; anything describing
    /// the fixed valuation policy or process configuration is a config error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidProvider { .. }
            | Self::InvalidStrategy { .. }
            | Self::InvalidDiscountRate { .. }
            | Self::InvalidPolicyValue { .. }
            | Self::ZeroHorizon { .. } => ErrorKind::Config,
            _ => ErrorKind::Data,
        }
    }

    /// Whether the error came from parsing caller-supplied request input.
    pub const fn is_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyTicker
                | Self::TickerTooLong { .. }
                | Self::TickerInvalidStart { .. }
                | Self::TickerInvalidChar { .. }
                | Self::InvalidStrategy { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_errors_are_config_kind() {
        let err = ValidationError::InvalidDiscountRate { value: -1.0 };
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!err.is_input());
    }

    #[test]
    fn non_positive_inputs_are_data_kind() {
        let err = ValidationError::NonPositiveValue {
            field: "eps",
            value: 0.0,
        };
        assert_eq!(err.kind(), ErrorKind::Data);
        assert_eq!(
            err.to_string(),
            "field 'eps' must be greater than zero, got 0"
        );
    }

    #[test]
    fn strategy_errors_count_as_request_input() {
        let err = ValidationError::InvalidStrategy {
            value: String::from("dcf"),
        };
        assert!(err.is_input());
    }
}
