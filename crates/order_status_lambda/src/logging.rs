//! Structured JSON logging for the Lambda runtime.
//!
//! Events go to stdout as one JSON object per line so CloudWatch can index
//! the fields. CloudWatch stamps every line itself, so timestamps are
//! omitted. The filter comes from `RUST_LOG` and falls back to `info`.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let result = tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .with_target(false)
            .with_ansi(false)
            .without_time()
            .try_init();

        if result.is_err() {
            tracing::debug!("global tracing subscriber already installed");
        }
    });
}
