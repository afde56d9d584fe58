//! Tinkoff Invest REST provider.
//!
//! Talks to the grpc-gateway REST surface of the Tinkoff Invest API:
//! every method is a POST of a JSON body to
//! `{BASE_URL}/tinkoff.public.invest.api.contract.v1.{Service}/{Method}`
//! with Bearer token authentication.
//!
//! # Endpoints
//!
//! - Bond catalog: `InstrumentsService/Bonds`
//! - Coupon schedule: `InstrumentsService/GetBondCoupons`
//! - Currency catalog: `InstrumentsService/Currencies`
//! - Last prices: `MarketDataService/GetLastPrices`

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::errors::BrokerDataError;
use crate::models::{BondDescriptor, CouponEvent, CurrencyDescriptor, Quotation};
use crate::provider::BrokerDataProvider;

use models::{BondCouponsResponse, BondsResponse, CurrenciesResponse, LastPricesResponse};

const BASE_URL: &str = "https://invest-public-api.tinkoff.ru/rest";
const PROVIDER_ID: &str = "TINKOFF";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog status filter: base set of instruments tradable through the broker
const INSTRUMENT_STATUS_BASE: &str = "INSTRUMENT_STATUS_BASE";

/// Tinkoff Invest REST provider.
///
/// One provider value holds one HTTP connection pool; the ingestion
/// orchestrator keeps it for the duration of a full catalog pass.
///
/// # Example
///
/// ```ignore
/// let provider = TinkoffProvider::new("t.your-token".to_string());
/// let bonds = provider.list_bonds().await?;
/// ```
pub struct TinkoffProvider {
    client: Client,
    token: String,
    base_url: String,
}

impl TinkoffProvider {
    /// Create a new provider with the given API token.
    pub fn new(token: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (sandbox, local stub).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// POST one API call and decode the response envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        service_method: &str,
        body: serde_json::Value,
    ) -> Result<T, BrokerDataError> {
        let url = format!(
            "{}/tinkoff.public.invest.api.contract.v1.{}",
            self.base_url, service_method
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrokerDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    BrokerDataError::Network(e)
                }
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(BrokerDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            // The gateway reports quota exhaustion as a gRPC status in the body
            if text.contains("RESOURCE_EXHAUSTED") {
                return Err(BrokerDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }

            return Err(BrokerDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}: {}", status, text),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BrokerDataError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BrokerDataProvider for TinkoffProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn list_bonds(&self) -> Result<Vec<BondDescriptor>, BrokerDataError> {
        let response: BondsResponse = self
            .call(
                "InstrumentsService/Bonds",
                json!({ "instrumentStatus": INSTRUMENT_STATUS_BASE }),
            )
            .await?;

        Ok(response.instruments)
    }

    async fn get_coupons(
        &self,
        figi: &str,
        to: NaiveDate,
    ) -> Result<Vec<CouponEvent>, BrokerDataError> {
        let from = Utc::now().to_rfc3339();
        let to = format!("{}T23:59:59Z", to.format("%Y-%m-%d"));

        let response: BondCouponsResponse = self
            .call(
                "InstrumentsService/GetBondCoupons",
                json!({ "figi": figi, "from": from, "to": to }),
            )
            .await?;

        Ok(response.events)
    }

    async fn get_last_price(&self, figi: &str) -> Result<Quotation, BrokerDataError> {
        let response: LastPricesResponse = self
            .call(
                "MarketDataService/GetLastPrices",
                json!({ "figi": [figi] }),
            )
            .await?;

        response
            .last_prices
            .into_iter()
            .find(|entry| entry.figi == figi || entry.figi.is_empty())
            .map(|entry| entry.price)
            .ok_or_else(|| BrokerDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("no last price returned for {}", figi),
            })
    }

    async fn list_currencies(&self) -> Result<Vec<CurrencyDescriptor>, BrokerDataError> {
        let response: CurrenciesResponse = self
            .call(
                "InstrumentsService/Currencies",
                json!({ "instrumentStatus": INSTRUMENT_STATUS_BASE }),
            )
            .await?;

        Ok(response.instruments)
    }
}
