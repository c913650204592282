//! Fixed-point numeric types for prices and quantities
//!
//! Prices are signed 64-bit integers with an implicit scale of 10^6
//! (six fractional decimals). All comparison and arithmetic is
//! integer-exact; floating point exists only at the display and wire
//! boundary. A raw value of 0 denotes "invalid/absent".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Fixed-point price with six fractional decimals.
///
/// `$100.50` is stored as `100_500_000`. The raw range divided by the
/// scale still covers ~9.2 quadrillion, far beyond any instrument.
/// Serialized as a decimal string to prevent JSON number precision loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Number of raw units per whole price unit.
    pub const SCALE: i64 = 1_000_000;

    /// Sentinel for "no price" (market orders, empty book sides).
    pub const INVALID: Price = Price(0);

    /// Build a price from its raw fixed-point representation.
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw fixed-point value.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Convert a floating-point price at the external boundary.
    ///
    /// Multiplies by the scale and truncates toward zero; this is the
    /// only place a float enters the system.
    pub fn from_f64(price: f64) -> Self {
        Self((price * Self::SCALE as f64) as i64)
    }

    /// Convert back to floating point, for display only.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// A price is valid when strictly positive.
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:06}",
            sign,
            abs / Self::SCALE as u64,
            abs % Self::SCALE as u64
        )
    }
}

/// Error parsing a decimal price string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid fixed-point price: {0}")]
pub struct ParsePriceError(String);

impl FromStr for Price {
    type Err = ParsePriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParsePriceError(s.to_string());
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() || frac_part.len() > 6 {
            return Err(bad());
        }

        // Unsigned parses keep stray signs out of either component
        let whole: u64 = int_part.parse().map_err(|_| bad())?;
        let mut frac: u64 = 0;
        if !frac_part.is_empty() {
            frac = frac_part.parse().map_err(|_| bad())?;
            frac *= 10_u64.pow(6 - frac_part.len() as u32);
        }

        let raw = i64::try_from(whole)
            .ok()
            .and_then(|w| w.checked_mul(Self::SCALE))
            .and_then(|w| w.checked_add(frac as i64))
            .ok_or_else(bad)?;
        Ok(Self(if negative { -raw } else { raw }))
    }
}

// Serialized as a six-decimal string to preserve precision on the wire.
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Quantity of shares/contracts.
///
/// Unsigned; callers guarantee subtraction never underflows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtraction clamped at zero, for cached-aggregate bookkeeping.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
