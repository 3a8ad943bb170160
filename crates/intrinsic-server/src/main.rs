use std::process::ExitCode;

use clap::Parser;
use intrinsic_server::cli::Cli;
use intrinsic_server::config::RuntimeConfig;
use intrinsic_server::logging::init_logging;
use intrinsic_server::{commands, CliError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let config = RuntimeConfig::from_cli(cli)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = %config.provider.provider,
        strategy = %config.engine.strategy(),
        timeout_ms = config.provider.timeout_ms,
        "intrinsic starting"
    );

    commands::run(&cli.command, config).await
}
