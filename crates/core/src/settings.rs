//! Configuration values consumed by the core.
//!
//! The defaults reproduce the production constants; the tax figures are
//! configuration here rather than hard-coded in the valuation math.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tunable values for one screener instance.
///
/// Owned by the caller and handed to the ingestion and valuation
/// services by reference; the core never reads the environment itself.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Provider request quota, requests per minute.
    pub requests_per_minute: u32,

    /// Maximum retryable failures tolerated per instrument before it is
    /// skipped.
    pub max_retry_attempts: u32,

    /// Broker commission on a bond purchase, as a fraction of price.
    pub bond_commission_rate: Decimal,

    /// Broker commission on a cross-currency conversion, as a fraction.
    pub currency_commission_rate: Decimal,

    /// Fraction of a coupon payout remaining after withholding tax.
    pub coupon_tax_factor: Decimal,

    /// Tax rate applied to the capital-gain portion at redemption.
    pub capital_gains_tax_rate: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            requests_per_minute: 100,
            max_retry_attempts: 3,
            bond_commission_rate: dec!(0.003),
            currency_commission_rate: dec!(0.009),
            coupon_tax_factor: dec!(0.87),
            capital_gains_tax_rate: dec!(0.13),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_production_constants() {
        let settings = Settings::default();
        assert_eq!(settings.coupon_tax_factor, dec!(0.87));
        assert_eq!(settings.capital_gains_tax_rate, dec!(0.13));
        assert_eq!(settings.max_retry_attempts, 3);
    }
}
