use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use intrinsic_core::{build_source, ReqwestHttpClient, ValuationStrategy};

use crate::cli::{Command, ServeArgs, ValueArgs};
use crate::config::RuntimeConfig;
use crate::error::CliError;
use crate::response::ValuationResponse;
use crate::routes::{build_router, AppState};

pub async fn run(command: &Command, config: RuntimeConfig) -> Result<ExitCode, CliError> {
    let source = build_source(config.provider, Arc::new(ReqwestHttpClient::new()))?;
    let state = AppState::new(source, config.engine);

    match command {
        Command::Serve(args) => {
            serve(args, state).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Value(args) => value(args, &state).await,
    }
}

async fn serve(args: &ServeArgs, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = args.bind;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Value one ticker and print the success or error JSON to stdout.
async fn value(args: &ValueArgs, state: &AppState) -> Result<ExitCode, CliError> {
    let strategy = args.with_strategy.map(ValuationStrategy::from);
    let strategy_name = strategy.map(ValuationStrategy::as_str);

    match state.valuate(Some(args.ticker.as_str()), strategy_name).await {
        Ok(result) => {
            print_json(&ValuationResponse::from(&result), args.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            print_json(&error.body(), args.pretty)?;
            let code = CliError::Api(error).exit_code();
            Ok(ExitCode::from(code))
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
