//! exposit core: in-process metric registry and text exposition.
//!
//! This crate owns the metric state (counters, summaries), the registry that
//! orders and names them, and the renderer producing the Prometheus text
//! format. It carries no transport or runtime dependencies; serving the
//! rendered text is left to `exposit-server` or any other HTTP stack.
//!
//! There is no process-global default registry. Construct a [`Registry`] at
//! startup and hand it (usually as `Arc<Registry>`) to everything that
//! registers or renders metrics.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Invalid input is
//! reported as `ExpositError` so request handlers never take the process down
//! by feeding a bad value to a metric.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod exposition;
pub mod metric;
pub mod registry;

pub use error::{ErrorCode, ExpositError, Result};
pub use exposition::{encode, format_float, CONTENT_TYPE};
pub use metric::{Counter, Metric, MetricKind, MetricSnapshot, MetricValue, Summary, SummaryTimer};
pub use registry::Registry;
