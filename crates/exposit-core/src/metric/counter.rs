//! Monotonic float counter.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{check_amount, Desc};
use crate::error::Result;

/// Monotonically non-decreasing counter.
///
/// The value is an `f64` stored as raw bits in an `AtomicU64` and updated
/// with a compare-and-swap loop, so concurrent increments never get lost.
#[derive(Debug, Clone)]
pub struct Counter {
    inner: Arc<CounterInner>,
}

#[derive(Debug)]
struct CounterInner {
    desc: Desc,
    bits: AtomicU64,
}

impl Counter {
    pub fn new(name: &str, help: &str) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(CounterInner {
                desc: Desc::new(name, help)?,
                bits: AtomicU64::new(0.0_f64.to_bits()),
            }),
        })
    }

    pub fn name(&self) -> &str {
        self.inner.desc.name()
    }

    pub fn help(&self) -> &str {
        self.inner.desc.help()
    }

    /// Creation time, seconds since the Unix epoch.
    pub fn created(&self) -> f64 {
        self.inner.desc.created()
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1.0);
    }

    /// Increment by `amount`. Negative or NaN amounts are rejected and leave
    /// the value untouched.
    pub fn inc_by(&self, amount: f64) -> Result<()> {
        check_amount("counter increment", amount)?;
        self.add(amount);
        Ok(())
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.inner.bits.load(Ordering::Acquire))
    }

    /// Run `body`; if it returns `Err` or unwinds, count one exception.
    /// The outcome is handed back untouched.
    pub fn count_exceptions<T, E, F>(&self, body: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let mut guard = PanicGuard { counter: self, completed: false };
        let out = body();
        guard.completed = true;
        if out.is_err() {
            self.add(1.0);
        }
        out
    }

    /// Async flavour of [`Counter::count_exceptions`]. Dropping the future
    /// before it completes is a cancellation, not an exception.
    pub async fn count_exceptions_future<T, E, Fut>(&self, fut: Fut) -> std::result::Result<T, E>
    where
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let mut guard = PanicGuard { counter: self, completed: false };
        let out = fut.await;
        guard.completed = true;
        if out.is_err() {
            self.add(1.0);
        }
        out
    }

    pub(crate) fn desc(&self) -> &Desc {
        &self.inner.desc
    }

    fn add(&self, v: f64) {
        // The closure never returns None, so the update always succeeds.
        let _ = self
            .inner
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cur| {
                Some((f64::from_bits(cur) + v).to_bits())
            });
    }
}

/// Counts one exception if the guarded body unwinds.
struct PanicGuard<'a> {
    counter: &'a Counter,
    completed: bool,
}

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if !self.completed && std::thread::panicking() {
            self.counter.add(1.0);
        }
    }
}
