//! Response envelopes for the Tinkoff Invest REST API.

use serde::Deserialize;

use crate::models::{BondDescriptor, CouponEvent, CurrencyDescriptor, Quotation};

/// Response from `InstrumentsService/Bonds`.
#[derive(Debug, Deserialize)]
pub(super) struct BondsResponse {
    #[serde(default)]
    pub instruments: Vec<BondDescriptor>,
}

/// Response from `InstrumentsService/GetBondCoupons`.
#[derive(Debug, Deserialize)]
pub(super) struct BondCouponsResponse {
    #[serde(default)]
    pub events: Vec<CouponEvent>,
}

/// Response from `InstrumentsService/Currencies`.
#[derive(Debug, Deserialize)]
pub(super) struct CurrenciesResponse {
    #[serde(default)]
    pub instruments: Vec<CurrencyDescriptor>,
}

/// One entry of `MarketDataService/GetLastPrices`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LastPrice {
    #[serde(default)]
    pub figi: String,
    #[serde(default)]
    pub price: Quotation,
}

/// Response from `MarketDataService/GetLastPrices`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LastPricesResponse {
    #[serde(default)]
    pub last_prices: Vec<LastPrice>,
}
