use std::time::Duration;

/// Base currency everything is valued in.
pub const BASE_CURRENCY: &str = "rub";

/// Issuer sector of federal loan bonds.
pub const GOVERNMENT_SECTOR: &str = "government";

/// Foreign currencies tracked against the base currency.
///
/// Bonds nominated in any other currency are dropped during ingestion.
pub const TRACKED_CURRENCIES: &[&str] = &[
    "usd", "eur", "cny", "hkd", "chf", "gbp", "try", "kzt",
];

/// Fixed backoff between retryable enrichment attempts.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Decimal places in presentation yield figures.
pub const YIELD_DECIMAL_PRECISION: u32 = 2;
