//! Cycle-scoped table of currency exchange rates against the base currency.

use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;

use crate::constants::{BASE_CURRENCY, TRACKED_CURRENCIES};

/// Currency code to most-recently-observed base-currency rate.
///
/// The base currency is pinned to 1.0 and every tracked currency is
/// seeded with 1.0, so a lookup can never fail: an entry that was never
/// refreshed simply behaves as the default. The table is an owned value
/// scoped to one ingestion cycle, passed explicitly to consumers.
#[derive(Clone, Debug)]
pub struct CurrencyRateTable {
    rates: HashMap<String, Decimal>,
}

impl CurrencyRateTable {
    /// Create a table with every tracked currency seeded at 1.0.
    pub fn new() -> Self {
        let mut rates = HashMap::with_capacity(TRACKED_CURRENCIES.len() + 1);
        rates.insert(BASE_CURRENCY.to_string(), Decimal::ONE);
        for code in TRACKED_CURRENCIES {
            rates.insert((*code).to_string(), Decimal::ONE);
        }
        Self { rates }
    }

    /// Whether the given currency code is in the tracked set.
    pub fn is_tracked(code: &str) -> bool {
        TRACKED_CURRENCIES.contains(&code)
    }

    /// Current rate for a currency code.
    ///
    /// Unknown codes report 1.0, same as a tracked currency that was
    /// never refreshed.
    pub fn rate(&self, code: &str) -> Decimal {
        self.rates.get(code).copied().unwrap_or(Decimal::ONE)
    }

    /// Overwrite the rate for a tracked currency.
    ///
    /// Zero or negative rates, untracked codes, and the pinned base
    /// currency are rejected with a warning, leaving the previous value
    /// in place. Returns whether the update was applied.
    pub fn update(&mut self, code: &str, rate: Decimal) -> bool {
        if code == BASE_CURRENCY {
            warn!("Ignoring rate update for pinned base currency");
            return false;
        }
        if !Self::is_tracked(code) {
            warn!("Ignoring rate update for untracked currency '{}'", code);
            return false;
        }
        if rate <= Decimal::ZERO {
            warn!(
                "Ignoring unexpected rate {} for '{}', keeping previous value",
                rate, code
            );
            return false;
        }

        self.rates.insert(code.to_string(), rate);
        true
    }
}

impl Default for CurrencyRateTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tracked_currencies_seeded_at_one() {
        let table = CurrencyRateTable::new();
        assert_eq!(table.rate("usd"), Decimal::ONE);
        assert_eq!(table.rate("rub"), Decimal::ONE);
    }

    #[test]
    fn test_unknown_code_defaults_to_one() {
        let table = CurrencyRateTable::new();
        assert_eq!(table.rate("amd"), Decimal::ONE);
    }

    #[test]
    fn test_update_applies_for_tracked_currency() {
        let mut table = CurrencyRateTable::new();
        assert!(table.update("usd", dec!(90.5)));
        assert_eq!(table.rate("usd"), dec!(90.5));
    }

    #[test]
    fn test_zero_rate_keeps_previous_value() {
        let mut table = CurrencyRateTable::new();
        table.update("usd", dec!(90.5));

        assert!(!table.update("usd", Decimal::ZERO));
        assert_eq!(table.rate("usd"), dec!(90.5));
    }

    #[test]
    fn test_zero_rate_keeps_seeded_default() {
        let mut table = CurrencyRateTable::new();
        assert!(!table.update("eur", Decimal::ZERO));
        assert_eq!(table.rate("eur"), Decimal::ONE);
    }

    #[test]
    fn test_untracked_code_rejected() {
        let mut table = CurrencyRateTable::new();
        assert!(!table.update("amd", dec!(0.23)));
        assert_eq!(table.rate("amd"), Decimal::ONE);
    }

    #[test]
    fn test_base_currency_stays_pinned() {
        let mut table = CurrencyRateTable::new();
        assert!(!table.update("rub", dec!(2)));
        assert_eq!(table.rate("rub"), Decimal::ONE);
    }
}
