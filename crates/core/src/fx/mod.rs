//! Currency exchange rates for the ingestion cycle.
//!
//! One [`CurrencyRateTable`] lives exactly as long as one cycle: seeded
//! with defaults, refreshed once from the provider before any bond
//! enrichment, read-only afterwards.

mod fx_errors;
mod fx_service;
mod rate_table;

pub use fx_errors::FxError;
pub use fx_service::refresh_rates;
pub use rate_table::CurrencyRateTable;
