//! # Valuation Engine
//!
//! Pure, deterministic valuation of a [`FundamentalSnapshot`].
//!
//! ## Formulas
//!
//! For a growth `g`, discount rate `r` and projection horizon `n`:
//!
//! ```text
//! future_eps   = eps * (1 + g)^n
//! future_value = future_eps * future_pe
//! sticker      = future_value / (1 + r)^n
//! mos          = sticker / 2
//! ```
//!
//! `future_pe` depends on the [`ValuationStrategy`]. The growth-multiple
//! strategy also reports a 10-cap value (`eps / 0.10`) and an undiscounted
//! payback price (`sum over t = 1..=8 of eps * (1 + g)^t`).
//!
//! Figures keep full `f64` precision; rounding is left to the presentation
//! layer.
//!
//! ```rust
//! use intrinsic_core::{FundamentalSnapshot, ProviderId, Ticker, ValuationEngine};
//!
//! let snapshot = FundamentalSnapshot::new(
//!     Ticker::parse("ACME").unwrap(),
//!     ProviderId::Alphavantage,
//!     5.0,
//!     100.0,
//!     Some(0.10),
//! )
//! .unwrap();
//! let result = ValuationEngine::default().value(&snapshot).unwrap();
//! assert_eq!(result.mos_price, result.sticker_price / 2.0);
//! ```

mod strategy;

use serde::{Deserialize, Serialize};

use crate::domain::{validate_growth, validate_positive};
use crate::{FundamentalSnapshot, ProviderId, Ticker, ValidationError};

pub use strategy::ValuationStrategy;

/// Fixed valuation constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationPolicy {
    /// Growth assumed when the snapshot carries none.
    pub default_growth: f64,
    /// Required annual return used to discount the future value.
    pub discount_rate: f64,
    pub horizon_years: u32,
    pub payback_years: u32,
    /// Capitalization rate of the 10-cap figure.
    pub ten_cap_rate: f64,
    /// Multiplier turning a fractional growth into a P/E (0.10 * 200 = 20).
    pub growth_pe_factor: f64,
    /// P/E used by [`ValuationStrategy::FixedMultiple`].
    pub fixed_pe: f64,
}

impl Default for ValuationPolicy {
    fn default() -> Self {
        Self {
            default_growth: 0.10,
            discount_rate: 0.15,
            horizon_years: 10,
            payback_years: 8,
            ten_cap_rate: 0.10,
            growth_pe_factor: 200.0,
            fixed_pe: 15.0,
        }
    }
}

impl ValuationPolicy {
    pub fn with_fixed_pe(mut self, fixed_pe: f64) -> Self {
        self.fixed_pe = fixed_pe;
        self
    }

    /// Reject constants that would make the formulas undefined.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.discount_rate.is_finite() || self.discount_rate <= -1.0 {
            return Err(ValidationError::InvalidDiscountRate {
                value: self.discount_rate,
            });
        }
        if !self.default_growth.is_finite() || self.default_growth <= -1.0 {
            return Err(ValidationError::InvalidPolicyValue {
                field: "default_growth",
                value: self.default_growth,
            });
        }
        for (field, value) in [
            ("ten_cap_rate", self.ten_cap_rate),
            ("growth_pe_factor", self.growth_pe_factor),
            ("fixed_pe", self.fixed_pe),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidPolicyValue { field, value });
            }
        }
        if self.horizon_years == 0 {
            return Err(ValidationError::ZeroHorizon {
                field: "horizon_years",
            });
        }
        if self.payback_years == 0 {
            return Err(ValidationError::ZeroHorizon {
                field: "payback_years",
            });
        }
        Ok(())
    }
}

/// Where the growth rate used in a valuation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthSource {
    /// Derived from the provider's EPS history.
    Derived,
    /// Policy default, no history available.
    Assumed,
}

/// Valuation figures for one snapshot, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub ticker: Ticker,
    pub provider: ProviderId,
    pub strategy: ValuationStrategy,
    pub price: f64,
    pub eps: f64,
    pub growth: f64,
    pub growth_source: GrowthSource,
    pub discount_rate: f64,
    pub horizon_years: u32,
    pub future_pe: f64,
    pub future_eps: f64,
    pub future_value: f64,
    pub sticker_price: f64,
    pub mos_price: f64,
    pub ten_cap: Option<f64>,
    pub payback_price: Option<f64>,
    pub payback_years: Option<u32>,
}

/// Applies a [`ValuationPolicy`] with a default [`ValuationStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValuationEngine {
    policy: ValuationPolicy,
    strategy: ValuationStrategy,
}

impl ValuationEngine {
    pub fn new(policy: ValuationPolicy, strategy: ValuationStrategy) -> Result<Self, ValidationError> {
        policy.validate()?;
        Ok(Self { policy, strategy })
    }

    pub const fn policy(&self) -> &ValuationPolicy {
        &self.policy
    }

    pub const fn strategy(&self) -> ValuationStrategy {
        self.strategy
    }

    /// Value `snapshot` with the engine's default strategy.
    pub fn value(&self, snapshot: &FundamentalSnapshot) -> Result<ValuationResult, ValidationError> {
        self.value_with(snapshot, self.strategy)
    }

    pub fn value_with(
        &self,
        snapshot: &FundamentalSnapshot,
        strategy: ValuationStrategy,
    ) -> Result<ValuationResult, ValidationError> {
        // Snapshot fields are public, so the construction-time checks are repeated.
        validate_positive("eps", snapshot.eps)?;
        validate_positive("price", snapshot.price)?;
        self.policy.validate()?;

        let (growth, growth_source) = match snapshot.growth_rate {
            Some(growth) => (growth, GrowthSource::Derived),
            None => (self.policy.default_growth, GrowthSource::Assumed),
        };
        validate_growth(growth)?;

        let policy = &self.policy;
        let eps = snapshot.eps;
        let horizon = f64::from(policy.horizon_years);

        let future_pe = strategy.future_pe(growth, policy)?;
        let future_eps = eps * (1.0 + growth).powf(horizon);
        let future_value = future_eps * future_pe;
        let sticker_price = future_value / (1.0 + policy.discount_rate).powf(horizon);
        let mos_price = sticker_price / 2.0;

        let (ten_cap, payback_price, payback_years) = if strategy.includes_auxiliary_figures() {
            (
                Some(eps / policy.ten_cap_rate),
                Some(payback_price(eps, growth, policy.payback_years)),
                Some(policy.payback_years),
            )
        } else {
            (None, None, None)
        };

        Ok(ValuationResult {
            ticker: snapshot.ticker.clone(),
            provider: snapshot.provider,
            strategy,
            price: snapshot.price,
            eps,
            growth,
            growth_source,
            discount_rate: policy.discount_rate,
            horizon_years: policy.horizon_years,
            future_pe,
            future_eps,
            future_value,
            sticker_price,
            mos_price,
            ten_cap,
            payback_price,
            payback_years,
        })
    }
}

/// Cumulative, undiscounted EPS over `years` of growth.
fn payback_price(eps: f64, growth: f64, years: u32) -> f64 {
    (1..=years)
        .map(|t| eps * (1.0 + growth).powf(f64::from(t)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn snapshot(eps: f64, price: f64, growth: Option<f64>) -> FundamentalSnapshot {
        FundamentalSnapshot::new(
            Ticker::parse("ACME").expect("valid ticker"),
            ProviderId::Alphavantage,
            eps,
            price,
            growth,
        )
        .expect("valid snapshot")
    }

    #[test]
    fn growth_multiple_reference_case() {
        let result = ValuationEngine::default()
            .value(&snapshot(5.0, 100.0, Some(0.10)))
            .expect("valuation succeeds");

        assert!((result.future_pe - 20.0).abs() < 1e-12);
        assert!((result.future_eps - 12.968_712).abs() < 1e-5);
        assert!((result.future_value - 259.374_246).abs() < 1e-5);
        assert!((result.sticker_price - 64.113_4).abs() < 1e-3);
        assert_eq!(result.mos_price, result.sticker_price / 2.0);
        assert_eq!(result.ten_cap, Some(5.0 / 0.10));
        assert_eq!(result.payback_years, Some(8));
    }

    #[test]
    fn payback_is_cumulative_undiscounted_eps() {
        // 1.1 + 1.21 + ... + 1.1^8 = 12.579_476_7
        let total = payback_price(1.0, 0.10, 8);
        assert!((total - 12.579_476_7).abs() < 1e-6, "total was {total}");
    }

    #[test]
    fn missing_growth_uses_policy_default() {
        let result = ValuationEngine::default()
            .value(&snapshot(2.0, 40.0, None))
            .expect("valuation succeeds");
        assert_eq!(result.growth, 0.10);
        assert_eq!(result.growth_source, GrowthSource::Assumed);
    }

    #[test]
    fn fixed_multiple_omits_auxiliary_figures() {
        let result = ValuationEngine::default()
            .value_with(&snapshot(2.0, 50.0, Some(0.08)), ValuationStrategy::FixedMultiple)
            .expect("valuation succeeds");
        assert_eq!(result.future_pe, 15.0);
        assert_eq!(result.ten_cap, None);
        assert_eq!(result.payback_price, None);
        assert_eq!(result.payback_years, None);
        assert_eq!(result.growth_source, GrowthSource::Derived);
    }

    #[test]
    fn negative_growth_is_rejected_by_growth_multiple_only() {
        let engine = ValuationEngine::default();
        let shrinking = snapshot(2.0, 50.0, Some(-0.05));

        let err = engine.value(&shrinking).expect_err("negative P/E");
        assert_eq!(err.kind(), ErrorKind::Data);

        let fixed = engine
            .value_with(&shrinking, ValuationStrategy::FixedMultiple)
            .expect("fixed multiple tolerates shrinking earnings");
        assert!(fixed.sticker_price > 0.0);
    }

    #[test]
    fn flat_growth_is_rejected_by_growth_multiple_only() {
        let engine = ValuationEngine::default();
        let flat = snapshot(2.0, 50.0, Some(0.0));

        let err = engine.value(&flat).expect_err("zero P/E");
        assert!(matches!(err, ValidationError::NonPositiveGrowthMultiple { .. }));
        assert_eq!(err.kind(), ErrorKind::Data);

        let fixed = engine
            .value_with(&flat, ValuationStrategy::FixedMultiple)
            .expect("fixed multiple tolerates flat earnings");
        assert!((fixed.sticker_price - 30.0 / 1.15_f64.powi(10)).abs() < 1e-9);
    }

    #[test]
    fn rejects_tampered_snapshot() {
        let mut tampered = snapshot(2.0, 50.0, None);
        tampered.eps = 0.0;
        let err = ValuationEngine::default()
            .value(&tampered)
            .expect_err("zero eps");
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn discount_at_total_loss_is_config_error() {
        let policy = ValuationPolicy {
            discount_rate: -1.0,
            ..ValuationPolicy::default()
        };
        let err = ValuationEngine::new(policy, ValuationStrategy::GrowthMultiple)
            .expect_err("discount of -100% must fail");
        assert_eq!(err, ValidationError::InvalidDiscountRate { value: -1.0 });
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn zero_fixed_pe_is_config_error() {
        let policy = ValuationPolicy::default().with_fixed_pe(0.0);
        let err = policy.validate().expect_err("zero multiple");
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
