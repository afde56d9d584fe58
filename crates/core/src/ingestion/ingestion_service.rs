//! The full catalog pass: refresh rates, list, classify, enrich.

use log::{debug, info, warn};

use bondfolio_broker_data::{BrokerDataProvider, RequestPacer};

use super::classifier::{classify, Bucket, Classification};
use super::fetcher::fetch_bond;
use super::ingestion_model::BondUniverse;
use crate::errors::Result;
use crate::fx::{refresh_rates, CurrencyRateTable};
use crate::settings::Settings;

/// Buckets the classifier can fill, in reporting order.
const CLASSIFIED_BUCKETS: [Bucket; 3] =
    [Bucket::Government, Bucket::Corporate, Bucket::ForeignCurrency];

/// Runs one ingestion cycle against a provider.
///
/// A cycle is strictly sequential: the pacer's spacing guarantee is
/// global across the whole catalog pass, so instruments are enriched one
/// at a time in catalog order. The returned universe replaces any
/// universe from a prior cycle.
pub struct IngestionService {
    settings: Settings,
}

impl IngestionService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run one full catalog pass.
    ///
    /// Currency listing or catalog listing failures are fatal for the
    /// cycle and surface as `Err`; everything per-instrument degrades to
    /// a skip outcome inside its bucket.
    pub async fn run<P: BrokerDataProvider + ?Sized>(&self, provider: &P) -> Result<BondUniverse> {
        let pacer = RequestPacer::new(self.settings.requests_per_minute);

        let mut rates = CurrencyRateTable::new();
        refresh_rates(provider, &pacer, &mut rates, &self.settings).await?;

        let bonds = provider.list_bonds().await?;
        info!("Ingesting a catalog of {} bonds", bonds.len());

        let mut universe = BondUniverse::new();

        for bond in &bonds {
            match classify(bond) {
                Classification::Ineligible => {
                    debug!("{}: filtered out by eligibility flags", bond.ticker);
                }
                Classification::UntrackedCurrency => {
                    warn!(
                        "{}: dropped, untracked currency '{}'",
                        bond.ticker, bond.currency
                    );
                }
                Classification::Eligible(bucket) => {
                    let outcome =
                        fetch_bond(provider, &pacer, &rates, &self.settings, bond).await;
                    universe.push(bucket, outcome);
                }
            }
        }

        for bucket in CLASSIFIED_BUCKETS {
            let (fetched, skipped) = universe.counts(bucket);
            info!(
                "Bucket {}: {} fetched, {} skipped",
                bucket.name(),
                fetched,
                skipped
            );
        }

        Ok(universe)
    }
}
