//! # Domain Models
//!
//! Canonical domain types for intrinsic valuations.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated, uppercase ticker symbol |
//! | [`FundamentalSnapshot`] | EPS, price and optional growth for one ticker |
//!
//! Both types enforce their invariants at construction time, so a
//! snapshot with a zero or negative EPS/price cannot exist:
//!
//! ```rust
//! use intrinsic_core::{FundamentalSnapshot, ProviderId, Ticker, ValidationError};
//!
//! let ticker = Ticker::parse("aapl").unwrap();
//! let invalid = FundamentalSnapshot::new(ticker, ProviderId::Alphavantage, 0.0, 10.0, None);
//! assert!(matches!(invalid, Err(ValidationError::NonPositiveValue { field: "eps", .. })));
//! ```

mod snapshot;
mod ticker;

pub use snapshot::FundamentalSnapshot;
pub(crate) use snapshot::{validate_growth, validate_positive};
pub use ticker::Ticker;
