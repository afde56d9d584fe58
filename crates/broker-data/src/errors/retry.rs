/// Classification for retry policy.
///
/// Used to determine how the enrichment loop should respond to a provider
/// error for a single instrument.
///
/// # Behavior Summary
///
/// | Class | Backoff and Retry? | Outcome When Exhausted |
/// |-------|--------------------|------------------------|
/// | `Retryable` | Yes, fixed backoff, bounded attempts | Instrument skipped |
/// | `Terminal` | No | Instrument skipped immediately |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Transient rate-limit / resource-exhaustion class.
    ///
    /// The enrichment loop sleeps a fixed backoff and retries the calls,
    /// up to the configured maximum attempt count. Exceeding the maximum
    /// skips the instrument; the catalog pass always continues.
    Retryable,

    /// Terminal for this instrument.
    ///
    /// The error is reported and the instrument is skipped without
    /// retrying. The catalog pass always continues; a single bad
    /// instrument never aborts the cycle.
    Terminal,
}
