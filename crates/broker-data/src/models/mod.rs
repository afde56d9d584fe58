//! Wire models for the broker data provider.

mod coupon;
mod currency;
mod instrument;
mod money;

pub use coupon::CouponEvent;
pub use currency::CurrencyDescriptor;
pub use instrument::{BondDescriptor, RiskLevel};
pub use money::{MoneyValue, Quotation};
