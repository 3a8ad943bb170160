use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValuationPolicy;
use crate::ValidationError;

/// Named valuation formula families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationStrategy {
    /// Future P/E of `growth * 200`, plus 10-cap and payback figures.
    #[default]
    GrowthMultiple,
    /// Future P/E fixed by policy; sticker and margin of safety only.
    FixedMultiple,
}

impl ValuationStrategy {
    pub const ALL: [Self; 2] = [Self::GrowthMultiple, Self::FixedMultiple];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GrowthMultiple => "growth_multiple",
            Self::FixedMultiple => "fixed_multiple",
        }
    }

    pub(crate) fn future_pe(
        self,
        growth: f64,
        policy: &ValuationPolicy,
    ) -> Result<f64, ValidationError> {
        match self {
            Self::GrowthMultiple => {
                // Zero or negative growth would price the company at nothing.
                if growth <= 0.0 {
                    return Err(ValidationError::NonPositiveGrowthMultiple { value: growth });
                }
                Ok(growth * policy.growth_pe_factor)
            }
            Self::FixedMultiple => Ok(policy.fixed_pe),
        }
    }

    pub(crate) const fn includes_auxiliary_figures(self) -> bool {
        matches!(self, Self::GrowthMultiple)
    }
}

impl Display for ValuationStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValuationStrategy {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "growth_multiple" | "growth" => Ok(Self::GrowthMultiple),
            "fixed_multiple" | "fixed" => Ok(Self::FixedMultiple),
            other => Err(ValidationError::InvalidStrategy {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_short_forms() {
        assert_eq!(
            "fixed-multiple".parse::<ValuationStrategy>().expect("valid"),
            ValuationStrategy::FixedMultiple
        );
        assert_eq!(
            "GROWTH".parse::<ValuationStrategy>().expect("valid"),
            ValuationStrategy::GrowthMultiple
        );
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = "dcf".parse::<ValuationStrategy>().expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::InvalidStrategy {
                value: String::from("dcf")
            }
        );
    }

    #[test]
    fn growth_multiple_is_twice_the_growth_percentage() {
        let policy = ValuationPolicy::default();
        let pe = ValuationStrategy::GrowthMultiple
            .future_pe(0.10, &policy)
            .expect("positive growth");
        assert!((pe - 20.0).abs() < 1e-12);
    }

    #[test]
    fn growth_multiple_rejects_flat_growth() {
        let policy = ValuationPolicy::default();
        let err = ValuationStrategy::GrowthMultiple
            .future_pe(0.0, &policy)
            .expect_err("zero P/E");
        assert_eq!(err, ValidationError::NonPositiveGrowthMultiple { value: 0.0 });
    }

    #[test]
    fn fixed_multiple_ignores_growth() {
        let policy = ValuationPolicy::default();
        let pe = ValuationStrategy::FixedMultiple
            .future_pe(-0.2, &policy)
            .expect("fixed multiple accepts any growth");
        assert_eq!(pe, 15.0);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ValuationStrategy::FixedMultiple).expect("serialize");
        assert_eq!(json, "\"fixed_multiple\"");
    }
}
