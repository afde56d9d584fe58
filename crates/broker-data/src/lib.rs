//! Bondfolio Broker Data Crate
//!
//! This crate provides the broker-facing half of the bond screener:
//! wire models for the broker's fixed-point price representation,
//! the provider capability trait, request pacing, and a concrete
//! Tinkoff Invest REST provider.
//!
//! # Overview
//!
//! The broker data crate supports:
//! - Decoding the provider's fixed-point (units + nano) money values
//! - Listing the bond catalog and tracked currency instruments
//! - Per-instrument enrichment calls (coupon schedule, last price)
//! - Request pacing against the provider's per-minute quota
//! - Explicit retryable/terminal error classification
//!
//! # Core Types
//!
//! - [`MoneyValue`] / [`Quotation`] - Fixed-point wire values
//! - [`BondDescriptor`] - One raw catalog entry with eligibility flags
//! - [`CouponEvent`] - One scheduled coupon payment
//! - [`CurrencyDescriptor`] - A tradable currency instrument
//! - [`BrokerDataProvider`] - The abstract provider capability set
//! - [`RequestPacer`] - Minimum inter-request delay enforcement

pub mod errors;
pub mod models;
pub mod pacing;
pub mod provider;

// Re-export all public types from models
pub use models::{
    BondDescriptor, CouponEvent, CurrencyDescriptor, MoneyValue, Quotation, RiskLevel,
};

// Re-export provider types
pub use provider::tinkoff::TinkoffProvider;
pub use provider::BrokerDataProvider;

// Re-export error and pacing types
pub use errors::{BrokerDataError, RetryClass};
pub use pacing::RequestPacer;
