use thiserror::Error;

/// Errors from the currency rate refresh.
#[derive(Error, Debug)]
pub enum FxError {
    /// The provider returned no usable currency list. Fatal for the
    /// cycle; the next trigger retries.
    #[error("Currency rate refresh failed: {0}")]
    RefreshFailed(String),
}
