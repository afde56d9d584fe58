//! Core error types for the bond screener.
//!
//! Provider-level errors keep their retry classification inside
//! `bondfolio-broker-data`; everything surfacing out of the core is one
//! of these variants. A cycle-fatal error aborts the current ingestion
//! cycle only, never the process.

use thiserror::Error;

use bondfolio_broker_data::BrokerDataError;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the screener core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Broker data operation failed: {0}")]
    BrokerData(#[from] BrokerDataError),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
