//! Error types and retry classification for the broker data crate.
//!
//! This module provides:
//! - [`BrokerDataError`]: The main error enum for all provider operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while talking to the broker data provider.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which determines whether the
/// enrichment loop backs off and retries or skips the instrument.
#[derive(Error, Debug)]
pub enum BrokerDataError {
    /// The provider rate limited the request (HTTP 429 or a
    /// RESOURCE_EXHAUSTED status in the response body).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (unexpected HTTP status,
    /// missing data in an otherwise well-formed response, etc.).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a payload that could not be decoded.
    #[error("Malformed provider response: {0}")]
    Decode(String),

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl BrokerDataError {
    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Retryable`]: back off and retry the enrichment calls
    /// - [`RetryClass::Terminal`]: skip the instrument, never retry
    ///
    /// # Examples
    ///
    /// ```
    /// use bondfolio_broker_data::errors::{BrokerDataError, RetryClass};
    ///
    /// let error = BrokerDataError::RateLimited { provider: "TINKOFF".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::Retryable);
    ///
    /// let error = BrokerDataError::Decode("truncated body".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Terminal);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Transient resource-exhaustion class - back off and retry
            Self::RateLimited { .. } | Self::Timeout { .. } => RetryClass::Retryable,

            // Everything else is terminal for this instrument
            Self::ProviderError { .. } | Self::Decode(_) | Self::Network(_) => {
                RetryClass::Terminal
            }
        }
    }
}
