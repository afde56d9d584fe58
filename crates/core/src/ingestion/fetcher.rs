//! Per-instrument enrichment.
//!
//! One fetch turns a raw catalog descriptor into a normalized record via
//! two paced provider calls (coupon schedule, last price). The fetch
//! never fails the cycle: every error path degrades to a skip outcome.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bondfolio_broker_data::{BondDescriptor, BrokerDataProvider, RequestPacer};

use super::ingestion_model::{BondRecord, Coupon, FetchOutcome, SkipReason};
use crate::constants::BASE_CURRENCY;
use crate::fx::CurrencyRateTable;
use crate::retry::{with_retry, RetryFailure};
use crate::settings::Settings;

/// Enrich one catalog entry into a [`FetchOutcome`].
///
/// Zero-nominal instruments are skipped before any provider call. A
/// retryable provider error backs off 0.5 s and retries both enrichment
/// calls, bounded by `Settings::max_retry_attempts`; exhaustion and
/// terminal errors both degrade to a skip so a single instrument can
/// never abort the catalog pass.
pub async fn fetch_bond<P: BrokerDataProvider + ?Sized>(
    provider: &P,
    pacer: &RequestPacer,
    rates: &CurrencyRateTable,
    settings: &Settings,
    descriptor: &BondDescriptor,
) -> FetchOutcome {
    let nominal = descriptor.nominal.to_decimal();
    if nominal <= Decimal::ZERO {
        debug!("{}: zero nominal, not tradable", descriptor.ticker);
        return FetchOutcome::Skipped(SkipReason::NotTradable);
    }

    let enrichment = with_retry(settings.max_retry_attempts, || async move {
        pacer.wait().await;
        let coupons = provider
            .get_coupons(&descriptor.figi, descriptor.maturity())
            .await?;
        pacer.wait().await;
        let last_price = provider.get_last_price(&descriptor.figi).await?;
        Ok((coupons, last_price))
    })
    .await;

    let (coupon_events, last_price) = match enrichment {
        Ok(pair) => pair,
        Err(RetryFailure::Exhausted(e)) => {
            warn!(
                "{}: retry attempts exhausted, skipping: {}",
                descriptor.ticker, e
            );
            return FetchOutcome::Skipped(SkipReason::RetriesExhausted {
                last_error: e.to_string(),
            });
        }
        Err(RetryFailure::Terminal(e)) => {
            warn!("{}: enrichment failed, skipping: {}", descriptor.ticker, e);
            return FetchOutcome::Skipped(SkipReason::ProviderFailure {
                error: e.to_string(),
            });
        }
    };

    // Last price quotes bonds as a percentage of nominal
    let market_price = last_price.to_decimal() * dec!(0.01) * nominal;

    let exchange_rate = if descriptor.currency == BASE_CURRENCY {
        Decimal::ONE
    } else {
        rates.rate(&descriptor.currency)
    };

    let mut coupons: Vec<Coupon> = coupon_events
        .iter()
        .map(|event| Coupon {
            number: event.number,
            date: event.payment_date(),
            payout: event.payout.to_decimal(),
        })
        .collect();
    coupons.sort_by_key(|coupon| coupon.date);

    FetchOutcome::Fetched(BondRecord {
        ticker: descriptor.ticker.clone(),
        name: descriptor.name.clone(),
        currency: descriptor.currency.clone(),
        risk_level: descriptor.risk_level,
        placement_date: descriptor.placement(),
        maturity_date: descriptor.maturity(),
        nominal,
        accrued_interest: descriptor.aci_value.to_decimal(),
        market_price,
        coupons_per_year: descriptor.coupon_quantity_per_year,
        exchange_rate,
        coupons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};

    use bondfolio_broker_data::{
        BrokerDataError, CouponEvent, CurrencyDescriptor, MoneyValue, Quotation, RiskLevel,
    };

    /// Scripted provider: fails `price_failures` get_last_price calls
    /// with the given error class, then succeeds.
    struct MockBondProvider {
        coupons: Vec<CouponEvent>,
        last_price: Quotation,
        price_failures: Mutex<u32>,
        terminal_failure: bool,
        coupon_calls: Mutex<u32>,
        price_calls: Mutex<u32>,
    }

    impl MockBondProvider {
        fn new(coupons: Vec<CouponEvent>, last_price: Quotation) -> Self {
            Self {
                coupons,
                last_price,
                price_failures: Mutex::new(0),
                terminal_failure: false,
                coupon_calls: Mutex::new(0),
                price_calls: Mutex::new(0),
            }
        }

        fn failing_times(mut self, failures: u32) -> Self {
            self.price_failures = Mutex::new(failures);
            self
        }

        fn failing_terminally(mut self) -> Self {
            self.terminal_failure = true;
            self
        }

        fn enrichment_calls(&self) -> u32 {
            *self.coupon_calls.lock().unwrap() + *self.price_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl BrokerDataProvider for MockBondProvider {
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
            *self.coupon_calls.lock().unwrap() += 1;
            Ok(self.coupons.clone())
        }

        async fn get_last_price(&self, _figi: &str) -> Result<Quotation, BrokerDataError> {
            *self.price_calls.lock().unwrap() += 1;

            if self.terminal_failure {
                return Err(BrokerDataError::Decode("truncated body".to_string()));
            }

            let mut failures = self.price_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(BrokerDataError::RateLimited {
                    provider: "MOCK".to_string(),
                });
            }

            Ok(self.last_price)
        }

        async fn list_currencies(&self) -> Result<Vec<CurrencyDescriptor>, BrokerDataError> {
            Ok(Vec::new())
        }
    }

    fn descriptor(currency: &str, nominal_units: i64) -> BondDescriptor {
        BondDescriptor {
            figi: "FIGI-TEST".to_string(),
            ticker: "TEST".to_string(),
            name: "Test issue".to_string(),
            currency: currency.to_string(),
            sector: "government".to_string(),
            risk_level: RiskLevel::Low,
            for_qual_investor_flag: false,
            floating_coupon_flag: false,
            amortization_flag: false,
            buy_available_flag: true,
            placement_date: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            maturity_date: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            nominal: MoneyValue {
                currency: currency.to_string(),
                units: nominal_units,
                nano: 0,
            },
            aci_value: MoneyValue {
                currency: currency.to_string(),
                units: 12,
                nano: 500_000_000,
            },
            coupon_quantity_per_year: 2,
        }
    }

    fn coupon_event(date: (i32, u32, u32), units: i64) -> CouponEvent {
        CouponEvent {
            number: 1,
            date: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, 0, 0, 0)
                .unwrap(),
            payout: MoneyValue {
                currency: "rub".to_string(),
                units,
                nano: 0,
            },
        }
    }

    fn full_price() -> Quotation {
        // 100% of nominal
        Quotation {
            units: 100,
            nano: 0,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_nominal_skips_without_any_calls() {
        let provider = MockBondProvider::new(Vec::new(), full_price());
        let pacer = RequestPacer::new(6000);
        let rates = CurrencyRateTable::new();

        let outcome = fetch_bond(
            &provider,
            &pacer,
            &rates,
            &Settings::default(),
            &descriptor("rub", 0),
        )
        .await;

        assert_eq!(outcome, FetchOutcome::Skipped(SkipReason::NotTradable));
        assert_eq!(provider.enrichment_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_fetch_builds_record() {
        let provider = MockBondProvider::new(
            vec![coupon_event((2029, 6, 1), 35), coupon_event((2028, 6, 1), 35)],
            Quotation {
                units: 98,
                nano: 500_000_000,
            },
        );
        let pacer = RequestPacer::new(6000);
        let rates = CurrencyRateTable::new();

        let outcome = fetch_bond(
            &provider,
            &pacer,
            &rates,
            &Settings::default(),
            &descriptor("rub", 1000),
        )
        .await;

        let record = match outcome {
            FetchOutcome::Fetched(record) => record,
            FetchOutcome::Skipped(reason) => panic!("unexpected skip: {:?}", reason),
        };

        assert_eq!(record.nominal, dec!(1000));
        // 98.5% of a 1000 nominal
        assert_eq!(record.market_price, dec!(985));
        assert_eq!(record.accrued_interest, dec!(12.5));
        assert_eq!(record.exchange_rate, Decimal::ONE);
        // coupons sorted by date ascending
        assert_eq!(
            record.coupons[0].date,
            NaiveDate::from_ymd_opt(2028, 6, 1).unwrap()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_foreign_currency_record_uses_table_rate() {
        let provider = MockBondProvider::new(Vec::new(), full_price());
        let pacer = RequestPacer::new(6000);
        let mut rates = CurrencyRateTable::new();
        rates.update("usd", dec!(90.5));

        let outcome = fetch_bond(
            &provider,
            &pacer,
            &rates,
            &Settings::default(),
            &descriptor("usd", 100),
        )
        .await;

        assert_eq!(outcome.record().unwrap().exchange_rate, dec!(90.5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retryable_failures_within_budget_still_succeed() {
        let provider =
            MockBondProvider::new(Vec::new(), full_price()).failing_times(3);
        let pacer = RequestPacer::new(6000);
        let rates = CurrencyRateTable::new();

        let outcome = fetch_bond(
            &provider,
            &pacer,
            &rates,
            &Settings::default(),
            &descriptor("rub", 1000),
        )
        .await;

        assert!(outcome.record().is_some());
        // 3 failed price calls, then one full successful pass
        assert_eq!(*provider.price_calls.lock().unwrap(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion_skips_and_never_errors() {
        let provider =
            MockBondProvider::new(Vec::new(), full_price()).failing_times(10);
        let pacer = RequestPacer::new(6000);
        let rates = CurrencyRateTable::new();

        let outcome = fetch_bond(
            &provider,
            &pacer,
            &rates,
            &Settings::default(),
            &descriptor("rub", 1000),
        )
        .await;

        assert!(matches!(
            outcome,
            FetchOutcome::Skipped(SkipReason::RetriesExhausted { .. })
        ));
        // initial attempt + max_retry_attempts retries
        assert_eq!(*provider.price_calls.lock().unwrap(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_failure_skips_immediately() {
        let provider =
            MockBondProvider::new(Vec::new(), full_price()).failing_terminally();
        let pacer = RequestPacer::new(6000);
        let rates = CurrencyRateTable::new();

        let outcome = fetch_bond(
            &provider,
            &pacer,
            &rates,
            &Settings::default(),
            &descriptor("rub", 1000),
        )
        .await;

        assert!(matches!(
            outcome,
            FetchOutcome::Skipped(SkipReason::ProviderFailure { .. })
        ));
        assert_eq!(*provider.price_calls.lock().unwrap(), 1);
    }
}
