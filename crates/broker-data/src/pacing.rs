//! Request pacing against the provider's per-minute quota.
//!
//! Enrichment calls are strictly sequential, so pacing reduces to a
//! minimum delay between successive requests rather than a token bucket.
//! The pacer under-utilizes the nominal quota by a fixed safety factor to
//! absorb scheduling jitter.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Fraction of the nominal quota the pacer actually uses.
const QUOTA_SAFETY_FACTOR: f64 = 0.85;

/// Enforces a minimum interval between successive provider requests.
///
/// The interval is `0.85 x 60 / quota` seconds, where `quota` is the
/// provider's allowed requests per minute. `wait()` never fails; the
/// only effect is the delay.
#[derive(Debug)]
pub struct RequestPacer {
    /// Minimum spacing between request starts.
    min_interval: Duration,
    /// Start of the most recent paced slot.
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Create a pacer for the given per-minute request quota.
    pub fn new(requests_per_minute: u32) -> Self {
        let quota = requests_per_minute.max(1);
        let seconds = QUOTA_SAFETY_FACTOR * 60.0 / f64::from(quota);
        Self {
            min_interval: Duration::from_secs_f64(seconds),
            last_request: Mutex::new(None),
        }
    }

    /// The enforced minimum spacing between requests.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Lock the slot mutex, recovering from poison if necessary.
    ///
    /// Worst case of recovering is one under-spaced request, which is
    /// covered by the quota safety factor anyway.
    fn lock_slot(&self) -> MutexGuard<'_, Option<Instant>> {
        self.last_request.lock().unwrap_or_else(|poisoned| {
            warn!("Request pacer mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Reserve the next request slot and return how long to sleep for it.
    ///
    /// The lock is only held to compute and record the slot; the sleep
    /// happens in `wait()` outside the lock.
    fn reserve_slot(&self) -> Duration {
        let mut last = self.lock_slot();
        let now = Instant::now();

        match *last {
            None => {
                *last = Some(now);
                Duration::ZERO
            }
            Some(previous) => {
                let target = previous + self.min_interval;
                if target <= now {
                    *last = Some(now);
                    Duration::ZERO
                } else {
                    *last = Some(target);
                    target - now
                }
            }
        }
    }

    /// Block until the next request is allowed to start.
    ///
    /// The first call returns immediately; every later call returns no
    /// sooner than `min_interval` after the previous one.
    pub async fn wait(&self) {
        let delay = self.reserve_slot();
        if delay > Duration::ZERO {
            debug!("Request pacer: waiting {:?} before next call", delay);
            tokio::time::sleep(delay).await;
        }
    }

    #[cfg(test)]
    fn backdate_last_request(&self, by: Duration) {
        let mut last = self.lock_slot();
        *last = last.map(|instant| instant - by);
    }
}
