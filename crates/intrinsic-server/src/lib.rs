//! # Intrinsic Server
//!
//! HTTP service and CLI around [`intrinsic_core`].
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /api/value?ticker=AAPL&strategy=...` | Value a ticker |
//! | `POST /api/value` `{"ticker": "AAPL"}` | Same, JSON body |
//! | `GET /health` | Liveness and active provider |
//!
//! Successful valuations return rounded figures; failures return
//! `{"error": "<message>"}` with a 4xx/5xx status.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod response;
pub mod routes;

pub use error::{ApiError, CliError};
pub use response::ValuationResponse;
pub use routes::{build_router, AppState};
