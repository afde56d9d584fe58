//! Ingestion pipeline: eligibility, classification, enrichment.

mod classifier;
mod fetcher;
mod ingestion_model;
mod ingestion_service;

pub use classifier::{classify, Bucket, Classification};
pub use fetcher::fetch_bond;
pub use ingestion_model::{BondRecord, BondUniverse, Coupon, FetchOutcome, SkipReason};
pub use ingestion_service::IngestionService;
