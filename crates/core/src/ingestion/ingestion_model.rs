//! Normalized records produced by the ingestion pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use bondfolio_broker_data::RiskLevel;

use super::classifier::Bucket;

/// One coupon payment normalized for valuation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Coupon {
    /// Sequence number, payment order
    pub number: i64,
    /// Payment date
    pub date: NaiveDate,
    /// Payout per single bond
    pub payout: Decimal,
}

/// A fully enriched bond, the unit the valuation engine consumes.
///
/// Constructed only by the fetcher; a record always carries a nonzero
/// nominal (zero-nominal instruments are skipped before construction).
/// `coupons` is ordered by date ascending.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BondRecord {
    pub ticker: String,
    pub name: String,
    /// Lowercase ISO code of the nominal currency
    pub currency: String,
    pub risk_level: RiskLevel,
    pub placement_date: NaiveDate,
    pub maturity_date: NaiveDate,
    /// Nominal value of one bond, in the nominal currency
    pub nominal: Decimal,
    /// Accrued coupon interest at fetch time
    pub accrued_interest: Decimal,
    /// Last traded price, already scaled from percent-of-nominal
    pub market_price: Decimal,
    pub coupons_per_year: i32,
    /// Base-currency rate applied at presentation time, 1.0 for the
    /// base currency itself
    pub exchange_rate: Decimal,
    pub coupons: Vec<Coupon>,
}

/// Why an instrument produced no record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Zero nominal; the instrument is not tradable and no enrichment
    /// calls were made.
    NotTradable,

    /// Retryable provider errors exhausted the attempt budget.
    RetriesExhausted { last_error: String },

    /// A terminal provider error during enrichment.
    ProviderFailure { error: String },
}

/// Outcome of enriching a single catalog entry.
///
/// Skips are kept in the buckets so consumers can count them; everything
/// downstream of ingestion filters them out.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    Fetched(BondRecord),
    Skipped(SkipReason),
}

impl FetchOutcome {
    /// The record, if one was fetched.
    pub fn record(&self) -> Option<&BondRecord> {
        match self {
            Self::Fetched(record) => Some(record),
            Self::Skipped(_) => None,
        }
    }

    /// Whether this outcome is a skip placeholder.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// The four classified collections assembled by one ingestion cycle.
///
/// Owned and mutated exclusively by the orchestrator while the cycle
/// runs, then handed to consumers by value, replacing any prior cycle's
/// universe. The special bucket is never filled by classification; the
/// presentation collaborator pushes into it through [`push`](Self::push).
#[derive(Debug, Default)]
pub struct BondUniverse {
    government: Vec<FetchOutcome>,
    corporate: Vec<FetchOutcome>,
    foreign_currency: Vec<FetchOutcome>,
    special: Vec<FetchOutcome>,
}

impl BondUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome to a bucket.
    pub fn push(&mut self, bucket: Bucket, outcome: FetchOutcome) {
        self.collection_mut(bucket).push(outcome);
    }

    /// All outcomes of a bucket, skip placeholders included.
    pub fn outcomes(&self, bucket: Bucket) -> &[FetchOutcome] {
        self.collection(bucket)
    }

    /// Fetched records of a bucket, in ingestion order.
    pub fn records(&self, bucket: Bucket) -> impl Iterator<Item = &BondRecord> {
        self.collection(bucket).iter().filter_map(FetchOutcome::record)
    }

    /// Fetched / skipped counts for a bucket.
    pub fn counts(&self, bucket: Bucket) -> (usize, usize) {
        let outcomes = self.collection(bucket);
        let skipped = outcomes.iter().filter(|o| o.is_skipped()).count();
        (outcomes.len() - skipped, skipped)
    }

    fn collection(&self, bucket: Bucket) -> &Vec<FetchOutcome> {
        match bucket {
            Bucket::Government => &self.government,
            Bucket::Corporate => &self.corporate,
            Bucket::ForeignCurrency => &self.foreign_currency,
            Bucket::Special => &self.special,
        }
    }

    fn collection_mut(&mut self, bucket: Bucket) -> &mut Vec<FetchOutcome> {
        match bucket {
            Bucket::Government => &mut self.government,
            Bucket::Corporate => &mut self.corporate,
            Bucket::ForeignCurrency => &mut self.foreign_currency,
            Bucket::Special => &mut self.special,
        }
    }
}
