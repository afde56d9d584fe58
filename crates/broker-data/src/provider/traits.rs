//! Broker data provider trait definition.
//!
//! This module defines the abstract capability set the ingestion pipeline
//! consumes. The concrete Tinkoff REST provider implements it; tests
//! script it with in-memory mocks.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::BrokerDataError;
use crate::models::{BondDescriptor, CouponEvent, CurrencyDescriptor, Quotation};

/// Abstract broker data capability set.
///
/// All methods are fallible; [`BrokerDataError::retry_class`] tells the
/// caller whether a failure is worth backing off and retrying.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use bondfolio_broker_data::provider::BrokerDataProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl BrokerDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     // ... implement catalog and enrichment methods
/// }
/// ```
#[async_trait]
pub trait BrokerDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// List the complete bond catalog.
    ///
    /// Failure here is fatal for the whole ingestion cycle.
    async fn list_bonds(&self) -> Result<Vec<BondDescriptor>, BrokerDataError>;

    /// Fetch the coupon schedule for one bond, from now up to `to`.
    ///
    /// May fail with a retryable rate-limit error.
    async fn get_coupons(
        &self,
        figi: &str,
        to: NaiveDate,
    ) -> Result<Vec<CouponEvent>, BrokerDataError>;

    /// Fetch the last traded price for one instrument.
    ///
    /// For bonds the quotation is a percentage of nominal; for currency
    /// instruments it is the RUB rate. May fail with a retryable
    /// rate-limit error.
    async fn get_last_price(&self, figi: &str) -> Result<Quotation, BrokerDataError>;

    /// List the tradable currency instruments.
    ///
    /// Failure here is fatal for the cycle's rate refresh, but not for
    /// the process.
    async fn list_currencies(&self) -> Result<Vec<CurrencyDescriptor>, BrokerDataError>;
}
