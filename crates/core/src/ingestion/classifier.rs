//! Eligibility filtering and bucket classification.

use bondfolio_broker_data::BondDescriptor;

use crate::constants::{BASE_CURRENCY, GOVERNMENT_SECTOR};
use crate::fx::CurrencyRateTable;

/// Presentation bucket an instrument belongs to.
///
/// Classification only ever produces the first three; `Special` exists
/// so the presentation collaborator can maintain its own hand-picked
/// collection without touching ingestion or valuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    Government,
    Corporate,
    ForeignCurrency,
    Special,
}

impl Bucket {
    /// Stable bucket name used on the presentation boundary.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Government => "domestic-government",
            Self::Corporate => "domestic-corporate",
            Self::ForeignCurrency => "foreign-currency-corporate",
            Self::Special => "special",
        }
    }

    /// Resolve a presentation-boundary name back to a bucket.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "domestic-government" => Some(Self::Government),
            "domestic-corporate" => Some(Self::Corporate),
            "foreign-currency-corporate" => Some(Self::ForeignCurrency),
            "special" => Some(Self::Special),
            _ => None,
        }
    }
}

/// Result of the eligibility filter and classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Goes through enrichment into the given bucket.
    Eligible(Bucket),
    /// Filtered out silently: qualified-investor-only, floating coupon,
    /// amortizing, or not currently purchasable.
    Ineligible,
    /// Eligible by flags but nominated in a currency outside the
    /// tracked set; dropped with a warning.
    UntrackedCurrency,
}

/// Classify one catalog entry.
///
/// Pure function of the descriptor's currency, sector, and eligibility
/// flags; calling it twice always yields the same result.
pub fn classify(bond: &BondDescriptor) -> Classification {
    if bond.for_qual_investor_flag
        || bond.floating_coupon_flag
        || bond.amortization_flag
        || !bond.buy_available_flag
    {
        return Classification::Ineligible;
    }

    if bond.currency == BASE_CURRENCY {
        if bond.sector == GOVERNMENT_SECTOR {
            Classification::Eligible(Bucket::Government)
        } else {
            Classification::Eligible(Bucket::Corporate)
        }
    } else if CurrencyRateTable::is_tracked(&bond.currency) {
        Classification::Eligible(Bucket::ForeignCurrency)
    } else {
        Classification::UntrackedCurrency
    }
}
