//! Bounded retry with fixed backoff for provider enrichment calls.

use std::future::Future;

use log::debug;

use bondfolio_broker_data::{BrokerDataError, RetryClass};

use crate::constants::RETRY_BACKOFF;

/// How a retried operation ultimately failed.
#[derive(Debug)]
pub(crate) enum RetryFailure {
    /// Retryable failures exceeded the attempt budget.
    Exhausted(BrokerDataError),
    /// A terminal error ended the operation immediately.
    Terminal(BrokerDataError),
}

/// Run `operation`, retrying retryable errors with a fixed backoff.
///
/// `max_attempts` bounds the number of retryable *failures* tolerated:
/// up to `max_attempts` failures followed by a success still succeed,
/// one more fails with [`RetryFailure::Exhausted`]. Terminal errors are
/// never retried.
pub(crate) async fn with_retry<T, F, Fut>(
    max_attempts: u32,
    mut operation: F,
) -> Result<T, RetryFailure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BrokerDataError>>,
{
    let mut failures = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => match error.retry_class() {
                RetryClass::Terminal => return Err(RetryFailure::Terminal(error)),
                RetryClass::Retryable => {
                    failures += 1;
                    if failures > max_attempts {
                        return Err(RetryFailure::Exhausted(error));
                    }
                    debug!(
                        "Retryable provider error (attempt {}/{}): {}",
                        failures, max_attempts, error
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
            },
        }
    }
}
