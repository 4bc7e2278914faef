//! Tracing subscriber initialization.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use exposit_core::error::{ExpositError, Result};

use crate::config::{LogFormat, LoggingSection};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(cfg: &LoggingSection) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&cfg.level).map_err(|e| {
            ExpositError::BadConfig(format!("logging.level {:?} is invalid: {e}", cfg.level))
        })?,
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    let res = match cfg.format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Text => subscriber.with(fmt::layer().with_target(true)).try_init(),
    };

    res.map_err(|e| ExpositError::Internal(format!("logging init failed: {e}")))
}
