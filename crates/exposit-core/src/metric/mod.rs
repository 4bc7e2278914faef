//! Metric handles (Counter, Summary) and their shared descriptor.
//!
//! Handles are cheap to clone; every clone points at the same state. Each
//! metric remembers whether a registry owns it so one handle can never be
//! rendered by two registries.

pub mod counter;
pub mod summary;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ExpositError, Result};

pub use counter::Counter;
pub use summary::{Summary, SummaryTimer};

/// Metric type as written on the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Summary,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Summary => "summary",
        }
    }
}

/// A registrable metric.
#[derive(Debug, Clone)]
pub enum Metric {
    Counter(Counter),
    Summary(Summary),
}

impl Metric {
    pub fn name(&self) -> &str {
        self.desc().name()
    }

    pub fn help(&self) -> &str {
        self.desc().help()
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Counter(_) => MetricKind::Counter,
            Metric::Summary(_) => MetricKind::Summary,
        }
    }

    /// Read the current state. Each metric is read atomically on its own.
    pub fn snapshot(&self) -> MetricSnapshot {
        let value = match self {
            Metric::Counter(c) => MetricValue::Counter(c.value()),
            Metric::Summary(s) => {
                let (count, sum) = s.get();
                MetricValue::Summary { count, sum }
            }
        };
        let desc = self.desc();
        MetricSnapshot {
            name: desc.name().to_string(),
            help: desc.help().to_string(),
            created: desc.created(),
            value,
        }
    }

    pub(crate) fn desc(&self) -> &Desc {
        match self {
            Metric::Counter(c) => c.desc(),
            Metric::Summary(s) => s.desc(),
        }
    }
}

impl From<Counter> for Metric {
    fn from(c: Counter) -> Self {
        Metric::Counter(c)
    }
}

impl From<Summary> for Metric {
    fn from(s: Summary) -> Self {
        Metric::Summary(s)
    }
}

/// Point-in-time values of one metric, as consumed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    pub name: String,
    pub help: String,
    /// Creation time, seconds since the Unix epoch.
    pub created: f64,
    pub value: MetricValue,
}

impl MetricSnapshot {
    pub fn kind(&self) -> MetricKind {
        match self.value {
            MetricValue::Counter(_) => MetricKind::Counter,
            MetricValue::Summary { .. } => MetricKind::Summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Counter(f64),
    Summary { count: u64, sum: f64 },
}

/// Immutable identity of a metric plus its registry ownership flag.
#[derive(Debug)]
pub(crate) struct Desc {
    name: String,
    help: String,
    created: f64,
    owned: AtomicBool,
}

impl Desc {
    pub(crate) fn new(name: &str, help: &str) -> Result<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            created: unix_now(),
            owned: AtomicBool::new(false),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn help(&self) -> &str {
        &self.help
    }

    pub(crate) fn created(&self) -> f64 {
        self.created
    }

    /// Mark as owned by a registry. Returns false if already owned.
    pub(crate) fn claim(&self) -> bool {
        self.owned
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn release(&self) {
        self.owned.store(false, Ordering::Release);
    }
}

/// Metric names follow `[a-zA-Z_:][a-zA-Z0-9_:]*`.
fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ExpositError::InvalidArgument(format!("invalid metric name: {name:?}")))
    }
}

/// Reject negative and NaN amounts.
pub(crate) fn check_amount(what: &str, amount: f64) -> Result<()> {
    if amount.is_nan() || amount < 0.0 {
        return Err(ExpositError::InvalidArgument(format!(
            "{what} must be non-negative, got {amount}"
        )));
    }
    Ok(())
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
