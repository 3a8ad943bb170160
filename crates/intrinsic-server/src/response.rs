use intrinsic_core::{GrowthSource, ProviderId, ValuationResult, ValuationStrategy};
use serde::Serialize;

/// Decimal places for money figures and multiples.
const MONEY_PLACES: i32 = 2;
/// Decimal places for growth and discount rates.
const RATE_PLACES: i32 = 4;

/// Presentation of a [`ValuationResult`]; the only place figures are rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResponse {
    pub ticker: String,
    pub provider: ProviderId,
    pub strategy: ValuationStrategy,
    pub price: f64,
    pub eps: f64,
    pub growth: f64,
    pub growth_source: GrowthSource,
    pub discount: f64,
    pub years: u32,
    pub future_pe: f64,
    pub future_eps: f64,
    pub future_value: f64,
    pub sticker: f64,
    pub mos: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ten_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_years: Option<u32>,
}

impl From<&ValuationResult> for ValuationResponse {
    fn from(result: &ValuationResult) -> Self {
        let money = |value: f64| round_to(value, MONEY_PLACES);
        let rate = |value: f64| round_to(value, RATE_PLACES);

        Self {
            ticker: result.ticker.to_string(),
            provider: result.provider,
            strategy: result.strategy,
            price: money(result.price),
            eps: money(result.eps),
            growth: rate(result.growth),
            growth_source: result.growth_source,
            discount: rate(result.discount_rate),
            years: result.horizon_years,
            future_pe: money(result.future_pe),
            future_eps: money(result.future_eps),
            future_value: money(result.future_value),
            sticker: money(result.sticker_price),
            mos: money(result.mos_price),
            ten_cap: result.ten_cap.map(money),
            payback_price: result.payback_price.map(money),
            payback_years: result.payback_years,
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
