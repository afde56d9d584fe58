//! Raw bond catalog entries as the provider reports them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::money::MoneyValue;

/// Issuer risk grade reported by the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    #[serde(rename = "RISK_LEVEL_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "RISK_LEVEL_LOW")]
    Low,
    #[serde(rename = "RISK_LEVEL_MODERATE")]
    Moderate,
    #[serde(rename = "RISK_LEVEL_HIGH")]
    High,
}

impl RiskLevel {
    /// Ordinal used in presentation rows (0 = unspecified, 3 = high).
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
        }
    }
}

/// One raw instrument descriptor from the provider's bond catalog.
///
/// Carries everything the eligibility filter and classifier need as fixed
/// fields; enrichment data (coupons, last price) is fetched separately.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondDescriptor {
    /// Global instrument identifier used by the enrichment endpoints
    pub figi: String,

    /// Exchange ticker
    pub ticker: String,

    /// Human-readable issue name
    pub name: String,

    /// Lowercase ISO currency code of the nominal, e.g. "rub"
    pub currency: String,

    /// Issuer sector, e.g. "government"
    #[serde(default)]
    pub sector: String,

    /// Issuer risk grade
    #[serde(default)]
    pub risk_level: RiskLevel,

    /// Restricted to qualified investors
    #[serde(default)]
    pub for_qual_investor_flag: bool,

    /// Coupon rate floats with a reference rate
    #[serde(default)]
    pub floating_coupon_flag: bool,

    /// Nominal is amortized over the bond's life
    #[serde(default)]
    pub amortization_flag: bool,

    /// Currently available for purchase
    #[serde(default)]
    pub buy_available_flag: bool,

    /// Placement timestamp
    pub placement_date: DateTime<Utc>,

    /// Maturity timestamp
    pub maturity_date: DateTime<Utc>,

    /// Nominal value of one bond
    pub nominal: MoneyValue,

    /// Accrued coupon interest at catalog time
    #[serde(default)]
    pub aci_value: MoneyValue,

    /// Scheduled coupon payments per year
    #[serde(default)]
    pub coupon_quantity_per_year: i32,
}

impl BondDescriptor {
    /// Placement date as a calendar date.
    pub fn placement(&self) -> NaiveDate {
        self.placement_date.date_naive()
    }

    /// Maturity date as a calendar date.
    pub fn maturity(&self) -> NaiveDate {
        self.maturity_date.date_naive()
    }
}
