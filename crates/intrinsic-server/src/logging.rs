//! Tracing subscriber setup.
//!
//! Logs go to stderr so `intrinsic value` can keep stdout for JSON. Noisy
//! transport crates are pinned to `warn` unless `RUST_LOG` overrides the
//! whole filter.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls", "tower_http"];

fn filter_directives(log_level: &str) -> String {
    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{module}=warn"));
    }
    directives
}

/// Install the global subscriber; later calls are ignored.
pub fn init_logging(log_level: &str, log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    let subscriber = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(std::io::stderr);
            let _ = subscriber.with(fmt_layer).try_init();
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr);
            let _ = subscriber.with(fmt_layer).try_init();
        }
    }

    tracing::debug!(log_level, ?log_format, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noisy_modules_are_pinned_to_warn() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("reqwest=warn"));
        assert!(directives.contains("tower_http=warn"));
    }
}
