//! Metric registry: unique names, registration order, rendering.
//!
//! - `by_name` answers lookups by metric name.
//! - `families` keeps registration order plus every series name the
//!   registered metrics write (`<name>`, `<name>_created`, and for summaries
//!   `<name>_count`/`<name>_sum`).
//!
//! Registrations check and reserve series names under the `families` write
//! lock, so two metrics can never emit the same series. Rendering only takes
//! the read lock and never blocks metric updates.

use std::collections::HashSet;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::error::{ExpositError, Result};
use crate::exposition;
use crate::metric::{Counter, Metric, MetricKind, MetricSnapshot, Summary};

/// Owns a set of named metrics. Share it as `Arc<Registry>`.
#[derive(Default)]
pub struct Registry {
    by_name: DashMap<String, Metric>,
    families: RwLock<Families>,
}

#[derive(Default)]
struct Families {
    order: Vec<Metric>,
    series: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric. Fails if the handle already belongs to a registry
    /// or if any series it writes is taken. There is no way to unregister.
    pub fn register(&self, metric: impl Into<Metric>) -> Result<()> {
        self.register_all([metric.into()])
    }

    /// Register several metrics as one unit: either all land or none does.
    pub fn register_all<I>(&self, metrics: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Metric>,
    {
        let metrics: Vec<Metric> = metrics.into_iter().map(Into::into).collect();

        for (i, m) in metrics.iter().enumerate() {
            if !m.desc().claim() {
                release(&metrics[..i]);
                tracing::warn!(metric = %m.name(), "metric handle already owned by a registry");
                return Err(ExpositError::AlreadyRegistered(m.name().to_string()));
            }
        }

        let mut families = self.families.write();
        let mut pending: HashSet<String> = HashSet::new();
        for m in &metrics {
            for series in series_names(m) {
                if families.series.contains(&series) || !pending.insert(series.clone()) {
                    release(&metrics);
                    tracing::warn!(metric = %m.name(), series = %series, "duplicate series rejected");
                    return Err(ExpositError::DuplicateName(series));
                }
            }
        }

        families.series.extend(pending);
        for m in metrics {
            tracing::debug!(metric = %m.name(), kind = m.kind().as_str(), "metric registered");
            self.by_name.insert(m.name().to_string(), m.clone());
            families.order.push(m);
        }
        Ok(())
    }

    /// Create a counter and register it in one step.
    pub fn counter(&self, name: &str, help: &str) -> Result<Counter> {
        let c = Counter::new(name, help)?;
        self.register(c.clone())?;
        Ok(c)
    }

    /// Create a summary and register it in one step.
    pub fn summary(&self, name: &str, help: &str) -> Result<Summary> {
        let s = Summary::new(name, help)?;
        self.register(s.clone())?;
        Ok(s)
    }

    pub fn get(&self, name: &str) -> Option<Metric> {
        self.by_name.get(name).map(|r| r.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether any registered metric writes a series called `series`.
    pub fn series_taken(&self, series: &str) -> bool {
        self.families.read().series.contains(series)
    }

    pub fn len(&self) -> usize {
        self.families.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.families
            .read()
            .order
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    }

    /// Read every metric in registration order. Each metric is read
    /// atomically; the set as a whole is not.
    pub fn snapshot(&self) -> Vec<MetricSnapshot> {
        let metrics: Vec<Metric> = self.families.read().order.clone();
        metrics.iter().map(Metric::snapshot).collect()
    }

    /// Render all metrics in the text exposition format.
    pub fn render(&self) -> String {
        exposition::encode(&self.snapshot())
    }
}

/// Every series name `m` writes to the exposition.
fn series_names(m: &Metric) -> Vec<String> {
    let name = m.name();
    let mut out = vec![name.to_string(), format!("{name}_created")];
    if m.kind() == MetricKind::Summary {
        out.push(format!("{name}_count"));
        out.push(format!("{name}_sum"));
    }
    out
}

fn release(metrics: &[Metric]) {
    for m in metrics {
        m.desc().release();
    }
}
