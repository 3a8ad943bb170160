//! Provider adapters.
//!
//! | Adapter | Price | EPS | Growth |
//! |---------|-------|-----|--------|
//! | [`AlphaVantageAdapter`] | `GLOBAL_QUOTE` | `OVERVIEW` | no |
//! | [`FmpAdapter`] | `quote` | `income-statement` | trailing EPS CAGR |

mod alphavantage;
mod fmp;

pub use alphavantage::AlphaVantageAdapter;
pub use fmp::FmpAdapter;

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http_client::{redact_api_key, HttpClient, HttpRequest};
use crate::{ProviderId, SourceError};

/// Keys providers use to report throttling or credential problems in a 200 body.
const NOTICE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// GET `url` and decode the body into the response schema `T`.
///
/// Transport failures and non-success statuses are provider errors; a body
/// that is not JSON or does not match `T` is a data error. Notices embedded
/// in a successful body are provider errors.
pub(crate) async fn fetch_json<T>(
    http_client: &dyn HttpClient,
    provider: ProviderId,
    url: String,
    timeout_ms: u64,
) -> Result<T, SourceError>
where
    T: DeserializeOwned,
{
    let redacted = redact_api_key(&url);
    let started = Instant::now();
    tracing::debug!(%provider, url = %redacted, "provider request");

    let request = HttpRequest::get(url)
        .with_header("accept", "application/json")
        .with_timeout_ms(timeout_ms);
    let response = http_client
        .execute(request)
        .await
        .map_err(|error| SourceError::transport(provider, &error))?;

    tracing::debug!(
        %provider,
        url = %redacted,
        status = response.status,
        latency_ms = started.elapsed().as_millis() as u64,
        "provider response"
    );

    if !response.is_success() {
        return Err(SourceError::provider(format!(
            "{provider} returned status {}",
            response.status
        )));
    }

    let value: Value = serde_json::from_str(&response.body).map_err(|error| {
        SourceError::data(format!("{provider} returned malformed JSON: {error}"))
    })?;

    if let Some(notice) = provider_notice(&value) {
        return Err(SourceError::provider(format!("{provider} rejected the request: {notice}")));
    }

    serde_json::from_value(value).map_err(|error| {
        SourceError::data(format!("{provider} response has an unexpected shape: {error}"))
    })
}

fn provider_notice(value: &Value) -> Option<&str> {
    let object = value.as_object()?;
    NOTICE_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
}
