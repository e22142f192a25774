use crate::types::errors::MonetaryError;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DECIMAL_PLACES: u32 = 2;

/// Fixed-point amount of money with exactly two fractional digits.
///
/// Equality and ordering compare values, so `10.5` and `10.50` are the same amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Monetary(Decimal);

impl Monetary {
    pub fn zero() -> Self {
        Monetary(Decimal::ZERO)
    }

    /// Builds an amount from a count of minor units (cents), `1050` being `10.50`.
    pub fn from_minor_units(units: i64) -> Self {
        Monetary(Decimal::new(units, DECIMAL_PLACES))
    }

    pub fn from_decimal(value: Decimal) -> Result<Self, MonetaryError> {
        let normalized = value.normalize();

        if normalized.scale() > DECIMAL_PLACES {
            return Err(MonetaryError::TooManyDecimalPlaces(value.to_string()));
        }

        Ok(Monetary(normalized))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Monetary) -> Option<Monetary> {
        self.0.checked_add(rhs.0).map(Monetary)
    }

    pub fn checked_sub(self, rhs: Monetary) -> Option<Monetary> {
        self.0.checked_sub(rhs.0).map(Monetary)
    }
}

impl Display for Monetary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(DECIMAL_PLACES);
        write!(formatter, "{value}")
    }
}

impl FromStr for Monetary {
    type Err = MonetaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(MonetaryError::InvalidFormat("Value is an empty string".to_string()));
        }

        let decimal = Decimal::from_str(value).map_err(|error| {
            MonetaryError::InvalidFormat(format!("[{value}] is not a decimal: {error}"))
        })?;

        Monetary::from_decimal(decimal)
    }
}

impl Serialize for Monetary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct MonetaryVisitor;

impl<'de> Visitor<'de> for MonetaryVisitor {
    type Value = Monetary;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal amount with at most two decimal places")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Monetary, E> {
        Monetary::from_str(value).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Monetary, E> {
        Ok(Monetary(Decimal::from(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Monetary, E> {
        Ok(Monetary(Decimal::from(value)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Monetary, E> {
        let decimal = Decimal::try_from(value).map_err(|_| E::custom(MonetaryError::Overflow))?;
        Monetary::from_decimal(decimal).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Monetary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MonetaryVisitor)
    }
}
