//! Remaining-term arithmetic and its localized rendering.
//!
//! Terms use the 365-day year / 30-day month approximation. Rendering
//! must stay byte-compatible with the existing spreadsheet consumers,
//! including the trailing space after the years segment.

use std::fmt;

use chrono::NaiveDate;

/// Whole years and months until maturity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemainingTerm {
    pub years: i64,
    pub months: i64,
}

impl RemainingTerm {
    /// Term between two dates.
    ///
    /// A term that computes to zero in both components is floored to
    /// one month so annualization never sees a zero-length term.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        let days = (to - from).num_days().max(0);
        let years = days / 365;
        let mut months = (days % 365) / 30;
        if years == 0 && months == 0 {
            months = 1;
        }
        Self { years, months }
    }

    /// Term length in months, the annualization denominator.
    pub fn total_months(&self) -> i64 {
        self.years * 12 + self.months
    }
}

fn year_word(years: i64) -> &'static str {
    let tens = years % 100;
    let units = years % 10;
    if units == 1 && tens != 11 {
        "год"
    } else if (2..=4).contains(&units) && !(12..=14).contains(&tens) {
        "года"
    } else {
        "лет"
    }
}

fn month_word(months: i64) -> &'static str {
    if months == 1 {
        "месяц"
    } else if (2..=4).contains(&months) {
        "месяца"
    } else {
        "месяцев"
    }
}

impl fmt::Display for RemainingTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.years != 0 {
            write!(f, "{} {} ", self.years, year_word(self.years))?;
        }
        if self.months != 0 {
            write!(f, "{} {}", self.months, month_word(self.months))?;
        }
        Ok(())
    }
}
