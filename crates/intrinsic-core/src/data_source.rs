//! Snapshot source trait and adapter error type.
//!
//! Every provider integration implements [`SnapshotSource`]. The valuation
//! engine only ever sees the [`FundamentalSnapshot`] it returns, so swapping
//! providers never touches the engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use intrinsic_core::{SnapshotSource, SourceError, Ticker};
//!
//! async fn print_eps(source: &dyn SnapshotSource) -> Result<(), SourceError> {
//!     let snapshot = source.fetch_snapshot(Ticker::parse("AAPL")?).await?;
//!     println!("{}: eps {:.2}", snapshot.ticker, snapshot.eps);
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::http_client::HttpError;
use crate::{ErrorKind, FundamentalSnapshot, ProviderId, Ticker, ValidationError};

/// Optional data a source can supply beyond EPS and price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Source derives a growth rate from multi-period EPS history.
    pub growth: bool,
}

impl CapabilitySet {
    pub const fn new(growth: bool) -> Self {
        Self { growth }
    }
}

/// Structured adapter error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: ErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Config,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Provider,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Data,
            message: message.into(),
            retryable: false,
        }
    }

    /// Map a transport failure from `provider` into a provider error.
    pub fn transport(provider: ProviderId, error: &HttpError) -> Self {
        if error.is_timeout() {
            Self::provider(format!("{provider} timed out: {}", error.message()))
        } else {
            Self::provider(format!("{provider} transport error: {}", error.message()))
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Informational only; nothing in this crate retries.
    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        match error.kind() {
            ErrorKind::Config => Self::config(error.to_string()),
            ErrorKind::Provider => Self::provider(error.to_string()),
            ErrorKind::Data => Self::data(error.to_string()),
        }
    }
}

/// Source adapter contract.
///
/// # Errors
///
/// [`fetch_snapshot`](SnapshotSource::fetch_snapshot) returns a
/// [`SourceError`] of kind:
/// - [`ErrorKind::Provider`] when the provider is unreachable, times out or
///   answers with a non-success status,
/// - [`ErrorKind::Data`] when the answer lacks a usable EPS or price.
///
/// Missing credentials are rejected when the adapter is built, so a
/// constructed source never fails with [`ErrorKind::Config`] for that reason.
pub trait SnapshotSource: Send + Sync {
    fn id(&self) -> ProviderId;

    fn capabilities(&self) -> CapabilitySet;

    /// Fetches EPS, price and (where supported) growth for `ticker`.
    fn fetch_snapshot<'a>(
        &'a self,
        ticker: Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<FundamentalSnapshot, SourceError>> + Send + 'a>>;
}
