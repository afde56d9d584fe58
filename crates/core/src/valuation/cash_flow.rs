//! The proceeds/expenses primitive shared by both yield figures.
//!
//! Both annualized yields are ratios of the same cash flow model, which
//! keeps the two numbers consistent for the same instrument.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ingestion::{BondRecord, Coupon};
use crate::settings::Settings;

/// Cash flow view over one bond record.
pub(super) struct CashFlows<'a> {
    record: &'a BondRecord,
    settings: &'a Settings,
}

impl<'a> CashFlows<'a> {
    pub(super) fn new(record: &'a BondRecord, settings: &'a Settings) -> Self {
        Self { record, settings }
    }

    /// Purchase expenses at a valuation date with the given accrued
    /// interest: price, purchase commission, and the interest owed to
    /// the previous holder.
    pub(super) fn expenses(&self, accrued_interest: Decimal) -> Decimal {
        let price = self.record.market_price;
        price + price * self.settings.bond_commission_rate + accrued_interest
    }

    /// After-tax payout of one coupon.
    pub(super) fn taxed_payout(&self, coupon: &Coupon) -> Decimal {
        coupon.payout * self.settings.coupon_tax_factor
    }

    /// Coupons dated strictly after `date`, in payment order.
    pub(super) fn coupons_after(&self, date: NaiveDate) -> impl Iterator<Item = &Coupon> {
        self.record
            .coupons
            .iter()
            .filter(move |coupon| coupon.date > date)
    }

    /// Redemption amount at maturity, reduced by capital-gains tax when
    /// the nominal exceeds the purchase price.
    pub(super) fn redemption(&self) -> Decimal {
        let nominal = self.record.nominal;
        let price = self.record.market_price;
        if nominal > price {
            nominal - (nominal - price) * self.settings.capital_gains_tax_rate
        } else {
            nominal
        }
    }

    /// Flat proceeds at a valuation date: redemption plus the after-tax
    /// income of every later coupon.
    pub(super) fn proceeds(&self, date: NaiveDate) -> Decimal {
        let coupon_income: Decimal = self
            .coupons_after(date)
            .map(|coupon| self.taxed_payout(coupon))
            .sum();
        self.redemption() + coupon_income
    }
}
