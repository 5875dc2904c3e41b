//! Currency amounts.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use stockroom_core::{DomainError, ValueObject};

/// Fixed-point units per currency unit.
const MICROS_PER_UNIT: u64 = 1_000_000;

/// Most decimal places an amount may carry.
pub const MAX_DECIMAL_PLACES: usize = 6;

/// Largest accepted amount, in currency units.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Non-negative currency amount in millionths of a currency unit.
///
/// Prices keep their sub-cent part (`0.125` stays `0.125`); only display
/// rounds to two decimals. On the wire it is a plain JSON number, the shape
/// the persisted inventory blob has always used.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    micros: u64,
}

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money { micros: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self {
            micros: cents * (MICROS_PER_UNIT / 100),
        }
    }

    pub const fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    pub const fn micros(self) -> u64 {
        self.micros
    }

    /// Convert a decimal amount. Digits beyond the sixth decimal place are
    /// rounded away.
    pub fn from_decimal(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() {
            return Err(DomainError::validation("amount must be a number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("amount cannot be negative"));
        }
        if amount > MAX_AMOUNT {
            return Err(DomainError::validation(format!(
                "amount cannot exceed {MAX_AMOUNT:.0}"
            )));
        }
        Ok(Self {
            micros: (amount * MICROS_PER_UNIT as f64).round() as u64,
        })
    }

    pub fn as_decimal(self) -> f64 {
        self.micros as f64 / MICROS_PER_UNIT as f64
    }

    /// Text for an editable field: two decimals unless that would drop digits.
    pub fn to_input_text(self) -> String {
        if self.micros % (MICROS_PER_UNIT / 100) == 0 {
            format!("{:.2}", self.as_decimal())
        } else {
            self.as_decimal().to_string()
        }
    }

    /// Value of `quantity` units at this price.
    ///
    /// Negative quantities contribute nothing.
    pub fn times(self, quantity: i64) -> Money {
        if quantity <= 0 {
            return Money::ZERO;
        }
        Money {
            micros: self.micros.saturating_mul(quantity as u64),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.micros.saturating_add(5_000) / (MICROS_PER_UNIT / 100);
        write!(f, "${}.{:02}", cents / 100, cents % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parse form text. Unlike [`Money::from_decimal`] this refuses more
    /// decimal places than can be held, so typed input is never rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let amount: f64 = text
            .parse()
            .map_err(|_| DomainError::validation(format!("'{text}' is not a valid amount")))?;

        if let Some((_, fraction)) = text.split_once('.') {
            let places = fraction.chars().take_while(char::is_ascii_digit).count();
            if places > MAX_DECIMAL_PLACES {
                return Err(DomainError::validation(format!(
                    "'{text}' has more than {MAX_DECIMAL_PLACES} decimal places"
                )));
            }
        }

        Self::from_decimal(amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money {
            micros: iter.fold(0u64, |acc, m| acc.saturating_add(m.micros)),
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal amount")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Money::from_decimal(v as f64).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Money::from_decimal(v as f64).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_decimal(v).map_err(E::custom)
    }

    /// Older clients persisted a failed price coercion (NaN) as `null`.
    fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
        tracing::warn!("stored price is null; reading it as 0.00");
        Ok(Money::ZERO)
    }
}
