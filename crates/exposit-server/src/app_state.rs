//! Shared application state for the exposition server.
//!
//! The registry is constructed by the caller and passed in; the server only
//! adds its own scrape instrumentation to it.

use std::sync::Arc;

use exposit_core::error::Result;
use exposit_core::{Counter, Metric, Registry, Summary};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<Registry>,
}

struct AppStateInner {
    cfg: ServerConfig,
    scrapes: Counter,
    scrape_duration: Summary,
}

impl AppState {
    /// Build application state.
    /// Fails, leaving the registry untouched, if it already holds series the
    /// server's own metrics would write.
    pub fn new(cfg: ServerConfig, registry: Arc<Registry>) -> Result<Self> {
        let scrapes = Counter::new(
            "exposit_scrapes_total",
            "Total number of metrics scrapes served",
        )?;
        let scrape_duration = Summary::new(
            "exposit_scrape_duration_seconds",
            "Time spent rendering the metrics exposition",
        )?;
        registry.register_all([
            Metric::from(scrapes.clone()),
            Metric::from(scrape_duration.clone()),
        ])?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                scrapes,
                scrape_duration,
            }),
            registry,
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    /// Render the registry, counting and timing the scrape itself.
    pub fn scrape(&self) -> String {
        self.inner.scrapes.inc();
        self.inner
            .scrape_duration
            .time(|| self.registry.render())
    }
}
