//! HTTP API routes.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use intrinsic_core::{SnapshotSource, Ticker, ValuationEngine, ValuationResult, ValuationStrategy};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::response::ValuationResponse;

/// Application state. Immutable and shared by every request.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn SnapshotSource>,
    engine: ValuationEngine,
}

impl AppState {
    pub fn new(source: Arc<dyn SnapshotSource>, engine: ValuationEngine) -> Self {
        Self { source, engine }
    }

    /// Fetch a snapshot for `raw_ticker` and value it.
    ///
    /// `strategy` overrides the engine default for this call only.
    pub async fn valuate(
        &self,
        raw_ticker: Option<&str>,
        strategy: Option<&str>,
    ) -> Result<ValuationResult, ApiError> {
        let raw_ticker = raw_ticker
            .map(str::trim)
            .filter(|ticker| !ticker.is_empty())
            .ok_or(ApiError::MissingTicker)?;
        let ticker = Ticker::parse(raw_ticker).map_err(ApiError::InvalidInput)?;
        let strategy = match strategy.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => name
                .parse::<ValuationStrategy>()
                .map_err(ApiError::InvalidInput)?,
            None => self.engine.strategy(),
        };

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "valuation",
            %request_id,
            %ticker,
            provider = %self.source.id(),
            %strategy
        );

        async move {
            let started = Instant::now();
            let snapshot = self.source.fetch_snapshot(ticker).await?;
            let result = self
                .engine
                .value_with(&snapshot, strategy)
                .map_err(ApiError::Valuation)?;

            tracing::info!(
                latency_ms = started.elapsed().as_millis() as u64,
                growth_source = ?result.growth_source,
                sticker = result.sticker_price,
                "valuation completed"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/value", get(value_by_query).post(value_by_body))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "intrinsic",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.source.id(),
        "strategy": state.engine.strategy(),
    }))
}

#[derive(Debug, Default, Deserialize)]
struct ValueParams {
    ticker: Option<String>,
    strategy: Option<String>,
}

async fn value_by_query(
    State(state): State<AppState>,
    query: Result<Query<ValueParams>, QueryRejection>,
) -> Result<Json<ValuationResponse>, ApiError> {
    let Query(params) =
        query.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let result = state
        .valuate(params.ticker.as_deref(), params.strategy.as_deref())
        .await?;
    Ok(Json(ValuationResponse::from(&result)))
}

async fn value_by_body(
    State(state): State<AppState>,
    body: Result<Json<ValueParams>, JsonRejection>,
) -> Result<Json<ValuationResponse>, ApiError> {
    let Json(params) = body.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let result = state
        .valuate(params.ticker.as_deref(), params.strategy.as_deref())
        .await?;
    Ok(Json(ValuationResponse::from(&result)))
}
