//! Modification counter and the bounded acknowledgement wait.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::{Instant, sleep};

use crate::error::{HarnessError, Result};

/// Interval between successive counter checks during a wait.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Monotonically non-decreasing count of observed configuration changes.
///
/// Written by event callbacks via [`increment`](Self::increment) and read by
/// [`wait_for_advance`](Self::wait_for_advance); the two sides share no other
/// state. Progress is always judged against a captured baseline, never an
/// absolute value, so duplicate or concurrent events are harmless.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use repo_harness::notify::ModificationCounter;
///
/// # async fn example() -> repo_harness::error::Result<()> {
/// let counter = ModificationCounter::new();
/// let baseline = counter.value();
///
/// counter.increment();
/// counter.wait_for_advance(baseline, Duration::from_millis(1000)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ModificationCounter(AtomicU64);

impl ModificationCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Current counter value.
    pub fn value(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Record one observed change.
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    /// Block until the counter advances past `baseline`, polling at a fixed
    /// interval.
    ///
    /// The wait is satisfied by `value() >= baseline + 1`, so any number of
    /// events arriving between baseline capture and a poll check count as the
    /// acknowledgement. Returns immediately when the counter has already
    /// advanced.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::AckTimeout`] naming the expected target value
    /// and the elapsed wait when the deadline passes without an advance.
    pub async fn wait_for_advance(&self, baseline: u64, timeout: Duration) -> Result<()> {
        let target = baseline + 1;
        let deadline = Instant::now() + timeout;
        while self.value() < target && Instant::now() < deadline {
            sleep(POLL_INTERVAL).await;
        }

        if self.value() < target {
            return Err(HarnessError::AckTimeout {
                target,
                waited_ms: timeout.as_millis() as u64,
            });
        }
        Ok(())
    }
}
