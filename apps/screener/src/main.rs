mod config;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bondfolio_broker_data::TinkoffProvider;
use bondfolio_core::ingestion::{Bucket, IngestionService};
use bondfolio_core::valuation::ValuationService;

use config::Config;

/// Buckets printed in output order.
const OUTPUT_BUCKETS: [Bucket; 3] =
    [Bucket::Government, Bucket::Corporate, Bucket::ForeignCurrency];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let provider = TinkoffProvider::new(config.token.clone());

    let universe = IngestionService::new(config.settings.clone())
        .run(&provider)
        .await?;

    let valuation = ValuationService::new(config.settings);
    for bucket in OUTPUT_BUCKETS {
        let rows = valuation.compute_rows(universe.outcomes(bucket));
        tracing::info!("{}: {} rows", bucket.name(), rows.len());
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }

    Ok(())
}
