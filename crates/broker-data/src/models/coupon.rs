//! Coupon schedule entries for a single bond.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::money::{string_i64, MoneyValue};

/// One scheduled coupon payment.
///
/// Payment order follows `number`; only events dated after the valuation
/// date contribute to yield.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponEvent {
    /// Sequence number within the bond's schedule
    #[serde(rename = "couponNumber", with = "string_i64", default)]
    pub number: i64,

    /// Payment timestamp
    #[serde(rename = "couponDate")]
    pub date: DateTime<Utc>,

    /// Payout per single bond
    #[serde(rename = "payOneBond", default)]
    pub payout: MoneyValue,
}

impl CouponEvent {
    /// Payment date as a calendar date.
    pub fn payment_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}
