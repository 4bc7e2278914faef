//! Count + sum summary with scoped timing.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use super::{check_amount, Desc};
use crate::error::Result;

/// Tracks the number and total size of observations (typically seconds).
///
/// `count` and `sum` live behind one lock so a reader always sees a pair
/// produced by the same set of observations.
#[derive(Debug, Clone)]
pub struct Summary {
    inner: Arc<SummaryInner>,
}

#[derive(Debug)]
struct SummaryInner {
    desc: Desc,
    state: Mutex<SummaryState>,
}

#[derive(Debug, Default, Clone, Copy)]
struct SummaryState {
    count: u64,
    sum: f64,
}

impl Summary {
    pub fn new(name: &str, help: &str) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(SummaryInner {
                desc: Desc::new(name, help)?,
                state: Mutex::new(SummaryState::default()),
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

    /// Record one observation. Negative or NaN values are rejected.
    pub fn observe(&self, value: f64) -> Result<()> {
        check_amount("summary observation", value)?;
        self.record(value);
        Ok(())
    }

    pub fn count(&self) -> u64 {
        self.inner.state.lock().count
    }

    pub fn sum(&self) -> f64 {
        self.inner.state.lock().sum
    }

    /// `(count, sum)` read under a single lock.
    pub fn get(&self) -> (u64, f64) {
        let st = *self.inner.state.lock();
        (st.count, st.sum)
    }

    /// Start a timer that observes the elapsed seconds when dropped.
    pub fn start_timer(&self) -> SummaryTimer {
        SummaryTimer {
            summary: self.clone(),
            start: Instant::now(),
            observed: false,
        }
    }

    /// Run `body` and observe its duration, also when it unwinds.
    pub fn time<T, F>(&self, body: F) -> T
    where
        F: FnOnce() -> T,
    {
        let _timer = self.start_timer();
        body()
    }

    /// Async flavour of [`Summary::time`]. A future dropped before completion
    /// is still observed.
    pub async fn time_future<Fut>(&self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        let _timer = self.start_timer();
        fut.await
    }

    pub(crate) fn desc(&self) -> &Desc {
        &self.inner.desc
    }

    fn record(&self, value: f64) {
        let mut st = self.inner.state.lock();
        st.count += 1;
        st.sum += value;
    }
}

/// RAII timer returned by [`Summary::start_timer`].
#[must_use = "dropping the timer immediately observes ~0s"]
#[derive(Debug)]
pub struct SummaryTimer {
    summary: Summary,
    start: Instant,
    observed: bool,
}

impl SummaryTimer {
    /// Observe now and return the elapsed seconds.
    pub fn observe_duration(mut self) -> f64 {
        self.finish(true)
    }

    /// Stop without recording anything. Returns the elapsed seconds.
    pub fn stop_and_discard(mut self) -> f64 {
        self.finish(false)
    }

    fn finish(&mut self, record: bool) -> f64 {
        let secs = self.start.elapsed().as_secs_f64();
        if !self.observed && record {
            self.summary.record(secs);
        }
        self.observed = true;
        secs
    }
}

impl Drop for SummaryTimer {
    fn drop(&mut self) {
        if !self.observed {
            self.finish(true);
        }
    }
}
