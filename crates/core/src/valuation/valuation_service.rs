//! Annualized yield computation and row assembly.

use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::{BASE_CURRENCY, YIELD_DECIMAL_PRECISION};
use crate::ingestion::{BondRecord, FetchOutcome};
use crate::settings::Settings;

use super::cash_flow::CashFlows;
use super::term::RemainingTerm;
use super::valuation_model::PresentationRow;

/// Date rendering expected by the spreadsheet consumers.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Turns fetched records into presentation rows.
///
/// The service never mutates ingested state; each row is an independent
/// value. Records that were skipped during ingestion or carry a zero
/// nominal or market price are excluded, everything else keeps its
/// input order.
pub struct ValuationService {
    settings: Settings,
}

impl ValuationService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Compute rows as of today.
    pub fn compute_rows(&self, outcomes: &[FetchOutcome]) -> Vec<PresentationRow> {
        self.compute_rows_at(outcomes, Utc::now().date_naive())
    }

    /// Compute rows as of an explicit valuation date.
    pub fn compute_rows_at(
        &self,
        outcomes: &[FetchOutcome],
        today: NaiveDate,
    ) -> Vec<PresentationRow> {
        outcomes
            .iter()
            .filter_map(FetchOutcome::record)
            .filter(|record| {
                let usable = !record.nominal.is_zero() && !record.market_price.is_zero();
                if !usable {
                    debug!(
                        "{}: zero nominal or market price, excluded from valuation",
                        record.ticker
                    );
                }
                usable
            })
            .map(|record| self.row(record, today))
            .collect()
    }

    fn row(&self, record: &BondRecord, today: NaiveDate) -> PresentationRow {
        let term = RemainingTerm::between(today, record.maturity_date);
        let flows = CashFlows::new(record, &self.settings);

        let expenses = flows.expenses(record.accrued_interest);
        let simple_yield = self.annualize(record, flows.proceeds(today), expenses, &term);
        let effective_yield = self.annualize(
            record,
            self.reinvested_proceeds(&flows, today),
            expenses,
            &term,
        );

        PresentationRow {
            ticker: record.ticker.clone(),
            name: record.name.clone(),
            currency: record.currency.clone(),
            risk_level: record.risk_level.ordinal(),
            placement_date: record.placement_date.format(DATE_FORMAT).to_string(),
            maturity_date: record.maturity_date.format(DATE_FORMAT).to_string(),
            remaining_term: term.to_string(),
            coupons_per_year: record.coupons_per_year,
            market_price: record.market_price * record.exchange_rate,
            nominal: record.nominal * record.exchange_rate,
            simple_yield,
            effective_yield,
        }
    }

    /// Proceeds with every future coupon reinvested into an identical
    /// position at its own payment date.
    ///
    /// Each coupon's after-tax payout is scaled by the proceeds/expenses
    /// ratio measured at the coupon's date, with zero accrued interest
    /// and the bond's own coupon schedule.
    fn reinvested_proceeds(&self, flows: &CashFlows<'_>, today: NaiveDate) -> Decimal {
        let reinvestment_expenses = flows.expenses(Decimal::ZERO);

        let coupon_income: Decimal = flows
            .coupons_after(today)
            .map(|coupon| {
                let payout = flows.taxed_payout(coupon);
                if reinvestment_expenses.is_zero() {
                    debug!("Reinvestment expenses are zero, keeping flat coupon payout");
                    payout
                } else {
                    payout * (flows.proceeds(coupon.date) / reinvestment_expenses)
                }
            })
            .sum();

        flows.redemption() + coupon_income
    }

    /// Annualize a proceeds/expenses ratio over the remaining term:
    /// `100 * (p/e)^(12 / total_months) - 100`, two decimals.
    fn annualize(
        &self,
        record: &BondRecord,
        mut proceeds: Decimal,
        mut expenses: Decimal,
        term: &RemainingTerm,
    ) -> Decimal {
        if record.currency != BASE_CURRENCY {
            let commission = self.settings.currency_commission_rate;
            proceeds *= Decimal::ONE - commission;
            expenses *= Decimal::ONE + commission;
        }

        if expenses.is_zero() {
            warn!(
                "{}: zero expenses, instrument was not purchasable",
                record.ticker
            );
            return Decimal::ZERO;
        }

        let ratio = (proceeds / expenses).to_f64().unwrap_or(0.0);
        let exponent = 12.0 / term.total_months() as f64;
        let percent = 100.0 * ratio.powf(exponent) - 100.0;

        Decimal::from_f64_retain(percent)
            .unwrap_or(Decimal::ZERO)
            .round_dp(YIELD_DECIMAL_PRECISION)
    }
}
