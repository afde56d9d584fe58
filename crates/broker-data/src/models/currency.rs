//! Tradable currency instruments used for the exchange rate refresh.

use serde::{Deserialize, Serialize};

use super::money::MoneyValue;

/// One currency instrument from the provider catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDescriptor {
    /// Global instrument identifier used by the price endpoint
    pub figi: String,

    /// Exchange ticker, e.g. "USD000UTSTOM"
    pub ticker: String,

    /// Lowercase ISO code of the quoted currency, e.g. "usd"
    pub iso_currency_name: String,

    /// Nominal of one lot unit
    #[serde(default)]
    pub nominal: MoneyValue,
}
