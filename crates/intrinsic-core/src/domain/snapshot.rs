use serde::{Deserialize, Serialize};

use crate::{ProviderId, Ticker, ValidationError};

/// Normalized inputs to a valuation, fetched fresh for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    pub ticker: Ticker,
    pub provider: ProviderId,
    pub eps: f64,
    pub price: f64,
    /// Fractional annual growth (0.10 for 10%); `None` when the provider cannot derive one.
    pub growth_rate: Option<f64>,
}

impl FundamentalSnapshot {
    pub fn new(
        ticker: Ticker,
        provider: ProviderId,
        eps: f64,
        price: f64,
        growth_rate: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_positive("eps", eps)?;
        validate_positive("price", price)?;
        if let Some(growth) = growth_rate {
            validate_growth(growth)?;
        }

        Ok(Self {
            ticker,
            provider,
            eps,
            price,
            growth_rate,
        })
    }
}

pub(crate) fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field, value });
    }
    Ok(())
}

pub(crate) fn validate_growth(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue {
            field: "growth_rate",
        });
    }
    if value <= -1.0 {
        return Err(ValidationError::GrowthBelowTotalLoss { value });
    }
    Ok(())
}
