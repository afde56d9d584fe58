//! Fixed-point money representation used on the provider wire.
//!
//! The provider encodes prices as an integer `units` part plus a `nano`
//! fractional part (billionths). The REST gateway serializes int64 fields
//! as JSON strings, so `units` needs a lenient serde codec.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of nano units in one whole unit.
const NANO_FACTOR: i64 = 1_000_000_000;

/// Serde codec for int64 fields that arrive as JSON strings.
///
/// The grpc-gateway convention is to emit int64 as a string (`"1000"`),
/// but plain numbers are accepted too for robustness.
pub(crate) mod string_i64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrInt {
            String(String),
            Int(i64),
        }

        match StringOrInt::deserialize(deserializer)? {
            StringOrInt::String(s) => s.parse().map_err(serde::de::Error::custom),
            StringOrInt::Int(i) => Ok(i),
        }
    }
}

/// A money amount in a specific currency, as the provider encodes it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyValue {
    /// Lowercase ISO currency code, e.g. "rub"
    #[serde(default)]
    pub currency: String,

    /// Whole units, may be negative
    #[serde(default, with = "string_i64")]
    pub units: i64,

    /// Fractional part in billionths, same sign as `units`
    #[serde(default)]
    pub nano: i32,
}

impl MoneyValue {
    /// Decode to a decimal scalar: `units + nano / 1e9`, exactly.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.units) + Decimal::new(i64::from(self.nano), 9)
    }
}

/// A unitless fixed-point quantity (price as percent of nominal,
/// exchange rate, etc.), same encoding as [`MoneyValue`] minus the
/// currency tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// Whole units, may be negative
    #[serde(default, with = "string_i64")]
    pub units: i64,

    /// Fractional part in billionths, same sign as `units`
    #[serde(default)]
    pub nano: i32,
}

impl Quotation {
    /// Decode to a decimal scalar: `units + nano / 1e9`, exactly.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.units) + Decimal::new(i64::from(self.nano), 9)
    }

    /// Encode a decimal scalar back into the wire pair.
    ///
    /// Truncates precision beyond nine fractional digits.
    pub fn from_decimal(value: Decimal) -> Self {
        let scaled = (value * Decimal::from(NANO_FACTOR)).trunc();
        let total = scaled.to_i64().unwrap_or(0);
        Self {
            units: total / NANO_FACTOR,
            nano: (total % NANO_FACTOR) as i32,
        }
    }
}
