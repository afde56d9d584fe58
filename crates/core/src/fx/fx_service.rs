//! Once-per-cycle refresh of the currency rate table.

use log::{debug, info, warn};

use bondfolio_broker_data::{BrokerDataProvider, RequestPacer};

use super::fx_errors::FxError;
use super::rate_table::CurrencyRateTable;
use crate::retry::{with_retry, RetryFailure};
use crate::settings::Settings;

/// Refresh the rate table from the provider's currency instruments.
///
/// Lists the tradable currencies (an empty or failed listing is fatal
/// for the cycle), then fetches each tracked currency's last price under
/// the shared pacing and retry policy. A failed or zero price for one
/// currency keeps its previous (or seeded) value and is only warned
/// about. Runs once, before any bond enrichment.
pub async fn refresh_rates<P: BrokerDataProvider + ?Sized>(
    provider: &P,
    pacer: &RequestPacer,
    table: &mut CurrencyRateTable,
    settings: &Settings,
) -> Result<(), FxError> {
    let currencies = provider
        .list_currencies()
        .await
        .map_err(|e| FxError::RefreshFailed(e.to_string()))?;

    if currencies.is_empty() {
        return Err(FxError::RefreshFailed(
            "provider returned no currency instruments".to_string(),
        ));
    }

    let mut refreshed = 0usize;

    for currency in &currencies {
        let code = currency.iso_currency_name.to_lowercase();
        if !CurrencyRateTable::is_tracked(&code) {
            debug!("Skipping untracked currency instrument '{}'", currency.ticker);
            continue;
        }

        let price = with_retry(settings.max_retry_attempts, || async move {
            pacer.wait().await;
            provider.get_last_price(&currency.figi).await
        })
        .await;

        match price {
            Ok(quotation) => {
                if table.update(&code, quotation.to_decimal()) {
                    refreshed += 1;
                }
            }
            Err(RetryFailure::Exhausted(e)) | Err(RetryFailure::Terminal(e)) => {
                warn!("Keeping previous rate for '{}': {}", code, e);
            }
        }
    }

    info!(
        "Currency rates refreshed: {} updated from {} listed instruments",
        refreshed,
        currencies.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use bondfolio_broker_data::{
        BondDescriptor, BrokerDataError, CouponEvent, CurrencyDescriptor, MoneyValue, Quotation,
    };

    struct MockFxProvider {
        currencies: Vec<CurrencyDescriptor>,
        /// figi -> scripted price
        prices: Vec<(String, Quotation)>,
        price_calls: Mutex<u32>,
    }

    impl MockFxProvider {
        fn new(currencies: Vec<CurrencyDescriptor>, prices: Vec<(String, Quotation)>) -> Self {
            Self {
                currencies,
                prices,
                price_calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl BrokerDataProvider for MockFxProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn list_bonds(&self) -> Result<Vec<BondDescriptor>, BrokerDataError> {
            Ok(Vec::new())
        }

        async fn get_coupons(
            &self,
            _figi: &str,
            _to: NaiveDate,
        ) -> Result<Vec<CouponEvent>, BrokerDataError> {
            Ok(Vec::new())
        }

        async fn get_last_price(&self, figi: &str) -> Result<Quotation, BrokerDataError> {
            *self.price_calls.lock().unwrap() += 1;
            self.prices
                .iter()
                .find(|(f, _)| f == figi)
                .map(|(_, q)| *q)
                .ok_or_else(|| BrokerDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: format!("no price for {}", figi),
                })
        }

        async fn list_currencies(&self) -> Result<Vec<CurrencyDescriptor>, BrokerDataError> {
            if self.currencies.is_empty() {
                return Err(BrokerDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: "currency list unavailable".to_string(),
                });
            }
            Ok(self.currencies.clone())
        }
    }

    fn currency(figi: &str, iso: &str) -> CurrencyDescriptor {
        CurrencyDescriptor {
            figi: figi.to_string(),
            ticker: format!("{}000TOM", iso.to_uppercase()),
            iso_currency_name: iso.to_string(),
            nominal: MoneyValue {
                currency: "rub".to_string(),
                units: 1,
                nano: 0,
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_updates_tracked_rates() {
        let provider = MockFxProvider::new(
            vec![currency("FIGI-USD", "usd")],
            vec![(
                "FIGI-USD".to_string(),
                Quotation {
                    units: 90,
                    nano: 500_000_000,
                },
            )],
        );
        let pacer = RequestPacer::new(6000);
        let mut table = CurrencyRateTable::new();

        refresh_rates(&provider, &pacer, &mut table, &Settings::default())
            .await
            .unwrap();

        assert_eq!(table.rate("usd"), dec!(90.5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_rate_leaves_default_in_place() {
        let provider = MockFxProvider::new(
            vec![currency("FIGI-EUR", "eur")],
            vec![("FIGI-EUR".to_string(), Quotation::default())],
        );
        let pacer = RequestPacer::new(6000);
        let mut table = CurrencyRateTable::new();

        refresh_rates(&provider, &pacer, &mut table, &Settings::default())
            .await
            .unwrap();

        assert_eq!(table.rate("eur"), Decimal::ONE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_untracked_instruments_are_not_priced() {
        let provider = MockFxProvider::new(vec![currency("FIGI-AMD", "amd")], Vec::new());
        let pacer = RequestPacer::new(6000);
        let mut table = CurrencyRateTable::new();

        refresh_rates(&provider, &pacer, &mut table, &Settings::default())
            .await
            .unwrap();

        assert_eq!(*provider.price_calls.lock().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_listing_is_cycle_fatal() {
        let provider = MockFxProvider::new(Vec::new(), Vec::new());
        let pacer = RequestPacer::new(6000);
        let mut table = CurrencyRateTable::new();

        let result = refresh_rates(&provider, &pacer, &mut table, &Settings::default()).await;
        assert!(matches!(result, Err(FxError::RefreshFailed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_price_keeps_previous_value() {
        // usd has no scripted price, so the fetch errors out
        let provider = MockFxProvider::new(vec![currency("FIGI-USD", "usd")], Vec::new());
        let pacer = RequestPacer::new(6000);
        let mut table = CurrencyRateTable::new();
        table.update("usd", dec!(88));

        refresh_rates(&provider, &pacer, &mut table, &Settings::default())
            .await
            .unwrap();

        assert_eq!(table.rate("usd"), dec!(88));
    }
}
