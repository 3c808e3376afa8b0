//! # Money — Currencies and Fixed-Point Amounts
//!
//! Prices are decimal values with two fractional digits. They are stored
//! as `i64` minor units ("cents") so that sums, overrides, and
//! billing-period normalization are exact. Amounts serialize as strings
//! (`"1200.00"`); floats are rejected on input because a float cannot
//! carry a price without rounding.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AmountError, LicError};

/// Currencies a license or instance may be priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Norwegian krone.
    Nok,
    /// Euro.
    Eur,
    /// Swedish krona.
    Sek,
    /// US dollar.
    Usd,
    /// Danish krone.
    Dkk,
}

impl Currency {
    /// Every supported currency, in display order.
    pub fn all() -> &'static [Currency] {
        &[Self::Nok, Self::Eur, Self::Sek, Self::Usd, Self::Dkk]
    }

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Nok => "NOK",
            Self::Eur => "EUR",
            Self::Sek => "SEK",
            Self::Usd => "USD",
            Self::Dkk => "DKK",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nok => "Norwegian Krone (NOK)",
            Self::Eur => "Euro (EUR)",
            Self::Sek => "Swedish Krona (SEK)",
            Self::Usd => "US Dollar (USD)",
            Self::Dkk => "Danish Krone (DKK)",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Nok
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = LicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| LicError::Validation(format!("unknown currency code {s:?}")))
    }
}

/// A monetary value with two decimal places, stored as minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Construct from minor units (`12345` is `123.45`).
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Construct from whole major units. Returns `None` on overflow.
    pub fn from_major(major: i64) -> Option<Self> {
        major.checked_mul(100).map(Self)
    }

    /// Minor units.
    pub fn minor(&self) -> i64 {
        self.0
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Addition clamped to the representable range.
    pub fn saturating_add(self, other: Amount) -> Amount {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by a slot count, clamped to the representable range.
    pub fn saturating_mul(self, count: i64) -> Amount {
        Self(self.0.saturating_mul(count))
    }

    /// Divide by a positive period count, rounding half away from zero.
    ///
    /// A non-positive divisor yields zero.
    pub fn div_round(self, divisor: i64) -> Amount {
        if divisor <= 0 {
            return Self::ZERO;
        }
        let quotient = self.0 / divisor;
        let remainder = self.0 % divisor;
        if remainder.unsigned_abs() * 2 >= divisor.unsigned_abs() {
            Self(quotient + self.0.signum())
        } else {
            Self(quotient)
        }
    }

    /// Parse a decimal string such as `"1200"`, `"99.5"`, or `"-3.25"`.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let negative = s.starts_with('-');
        let unsigned = s.strip_prefix('-').unwrap_or(s);
        let (int_str, frac_str) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };

        if int_str.is_empty() || !int_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Malformed(s.to_string()));
        }
        if !frac_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Malformed(s.to_string()));
        }
        if frac_str.len() > 2 {
            return Err(AmountError::TooPrecise(s.to_string()));
        }

        let whole: i64 = int_str.parse().map_err(|_| AmountError::Overflow)?;
        let frac: i64 = match frac_str.len() {
            0 => 0,
            1 => frac_str.parse::<i64>().map_err(|_| AmountError::Malformed(s.to_string()))? * 10,
            _ => frac_str.parse::<i64>().map_err(|_| AmountError::Malformed(s.to_string()))?,
        };

        let minor = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .ok_or(AmountError::Overflow)?;

        Ok(Self(if negative { -minor } else { minor }))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Amount::saturating_add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl serde::de::Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a decimal string with at most two fractional digits, or an integer")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Amount, E> {
                Amount::parse(v).map_err(E::custom)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Amount, E> {
                Amount::from_major(v).ok_or_else(|| E::custom(AmountError::Overflow))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Amount, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(Amount::from_major)
                    .ok_or_else(|| E::custom(AmountError::Overflow))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
