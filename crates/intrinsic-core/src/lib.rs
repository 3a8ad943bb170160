//! # Intrinsic Core
//!
//! Core contracts, provider adapters and the valuation engine behind the
//! `intrinsic` sticker-price service.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Alpha Vantage, Financial Modeling Prep) |
//! | [`config`] | Explicit provider configuration and adapter construction |
//! | [`data_source`] | `SnapshotSource` trait and adapter errors |
//! | [`domain`] | `Ticker` and `FundamentalSnapshot` |
//! | [`error`] | Error kinds and validation errors |
//! | [`growth`] | CAGR growth estimation |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`parsing`] | Tolerant numeric decoding of provider payloads |
//! | [`source`] | Provider identifiers |
//! | [`valuation`] | Valuation policy, strategies and engine |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  HTTP / CLI     │
//! └────────┬────────┘
//!          │ Ticker
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ SnapshotSource  │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest/stub)   │
//! └────────┬────────┘     └──────────────────┘
//!          │ FundamentalSnapshot
//!          ▼
//! ┌─────────────────┐
//! │ ValuationEngine │
//! └────────┬────────┘
//!          │ ValuationResult
//!          ▼
//! ```
//!
//! ## Error Handling
//!
//! Every failure carries an [`ErrorKind`]:
//!
//! ```rust
//! use intrinsic_core::{ErrorKind, SourceError};
//!
//! fn status_for(error: &SourceError) -> u16 {
//!     match error.kind() {
//!         ErrorKind::Config => 500,
//!         ErrorKind::Provider => 502,
//!         ErrorKind::Data => 400,
//!     }
//! }
//! # assert_eq!(status_for(&SourceError::data("EPS is missing")), 400);
//! ```
//!
//! ## Security
//!
//! - API keys are passed in through [`ProviderConfig`], never read from the
//!   environment by adapters, and redacted from logs and `Debug` output.
//! - Tickers are validated before they are placed in a provider URL.

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod growth;
pub mod http_client;
pub mod parsing;
pub mod source;
pub mod valuation;

// Adapter implementations
pub use adapters::{AlphaVantageAdapter, FmpAdapter};

// Configuration
pub use config::{build_source, ProviderConfig};

// Data source trait and types
pub use data_source::{CapabilitySet, SnapshotSource, SourceError};

// Domain models
pub use domain::{FundamentalSnapshot, Ticker};

// Error types
pub use error::{ErrorKind, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StubHttpClient,
};

// Source identifiers
pub use source::ProviderId;

// Valuation
pub use valuation::{
    GrowthSource, ValuationEngine, ValuationPolicy, ValuationResult, ValuationStrategy,
};
