//! Presentation rows handed to the output collaborator.

use rust_decimal::Decimal;
use serde::Serialize;

/// One presentation row per valued bond.
///
/// Dates are pre-rendered in the `dd-mm-YYYY` form the spreadsheet
/// consumers expect; money figures are already converted with the
/// record's exchange rate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationRow {
    pub ticker: String,
    pub name: String,
    pub currency: String,
    /// Issuer risk grade ordinal (0 = unspecified, 3 = high)
    pub risk_level: u8,
    pub placement_date: String,
    pub maturity_date: String,
    pub remaining_term: String,
    pub coupons_per_year: i32,
    /// Market price in base currency
    pub market_price: Decimal,
    /// Nominal in base currency
    pub nominal: Decimal,
    /// Simple annualized yield, percent, two decimals
    pub simple_yield: Decimal,
    /// Reinvestment-adjusted annualized yield, percent, two decimals
    pub effective_yield: Decimal,
}
