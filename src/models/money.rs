//! Money type for representing monetary quantities
//!
//! Wraps `rust_decimal::Decimal` so every balance is exact base-10 arithmetic.
//! Operands may be given as another `Money`, a numeric string or a number,
//! and are normalized through [`ToMoney`] before any operation runs.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::{BalancesError, BalancesResult};

/// An exact decimal amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

/// Conversion of any accepted operand form into `Money`
///
/// `None` stands for a null operand and always fails with `InvalidOperand`.
pub trait ToMoney {
    fn to_money(&self) -> BalancesResult<Money>;
}

impl Money {
    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create an amount from a mantissa and a scale, `Money::new(10050, 2)` is 100.50
    pub fn new(mantissa: i64, scale: u32) -> Self {
        Self(Decimal::new(mantissa, scale))
    }

    /// Wrap an existing decimal
    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Parse a decimal string such as "100.00" or "-3.5"
    pub fn parse(s: &str) -> BalancesResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::zero());
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|_| BalancesError::Parse(format!("Invalid decimal: {}", s)))
    }

    /// Get the underlying decimal
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Compare against any operand, returning -1, 0 or 1
    pub fn compare(&self, other: impl ToMoney) -> BalancesResult<i32> {
        let other = other.to_money()?;
        Ok(match self.0.cmp(&other.0) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        })
    }

    pub fn plus(&self, other: impl ToMoney) -> BalancesResult<Self> {
        let other = other.to_money()?;
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| overflow("add", self, &other))
    }

    pub fn minus(&self, other: impl ToMoney) -> BalancesResult<Self> {
        let other = other.to_money()?;
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or_else(|| overflow("subtract", self, &other))
    }

    pub fn times(&self, other: impl ToMoney) -> BalancesResult<Self> {
        let other = other.to_money()?;
        self.0
            .checked_mul(other.0)
            .map(Self)
            .ok_or_else(|| overflow("multiply", self, &other))
    }

    pub fn div(&self, other: impl ToMoney) -> BalancesResult<Self> {
        let other = other.to_money()?;
        if other.is_zero() {
            return Err(BalancesError::InvalidOperand(format!(
                "cannot divide {} by zero",
                self
            )));
        }
        self.0
            .checked_div(other.0)
            .map(Self)
            .ok_or_else(|| overflow("divide", self, &other))
    }

    pub fn modulo(&self, other: impl ToMoney) -> BalancesResult<Self> {
        let other = other.to_money()?;
        if other.is_zero() {
            return Err(BalancesError::InvalidOperand(format!(
                "cannot take {} modulo zero",
                self
            )));
        }
        self.0
            .checked_rem(other.0)
            .map(Self)
            .ok_or_else(|| overflow("modulo", self, &other))
    }

    /// Round to `places` fraction digits, midpoint away from zero
    pub fn round(&self, places: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Render with exactly `places` fraction digits
    pub fn to_fixed(&self, places: u32) -> String {
        let mut rounded = self.round(places).0;
        rounded.rescale(places);
        rounded.to_string()
    }

    /// Convert to a float for output boundaries that only accept numbers
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

fn overflow(operation: &str, lhs: &Money, rhs: &Money) -> BalancesError {
    BalancesError::Overflow(format!("cannot {} {} and {}", operation, lhs, rhs))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Money {
    type Err = BalancesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl ToMoney for Money {
    fn to_money(&self) -> BalancesResult<Money> {
        Ok(*self)
    }
}

impl ToMoney for &Money {
    fn to_money(&self) -> BalancesResult<Money> {
        Ok(**self)
    }
}

impl ToMoney for &str {
    fn to_money(&self) -> BalancesResult<Money> {
        Money::parse(self)
    }
}

impl ToMoney for String {
    fn to_money(&self) -> BalancesResult<Money> {
        Money::parse(self)
    }
}

impl ToMoney for i64 {
    fn to_money(&self) -> BalancesResult<Money> {
        Ok(Money::from(*self))
    }
}

impl ToMoney for i32 {
    fn to_money(&self) -> BalancesResult<Money> {
        Ok(Money::from(i64::from(*self)))
    }
}

impl ToMoney for u32 {
    fn to_money(&self) -> BalancesResult<Money> {
        Ok(Money::from(i64::from(*self)))
    }
}

impl ToMoney for f64 {
    fn to_money(&self) -> BalancesResult<Money> {
        // Shortest round-trip text keeps 0.1 as 0.1 rather than its binary expansion
        if !self.is_finite() {
            return Err(BalancesError::InvalidOperand(format!(
                "not a finite number: {}",
                self
            )));
        }
        Decimal::from_str(&self.to_string())
            .ok()
            .or_else(|| Decimal::from_f64(*self))
            .map(Money)
            .ok_or_else(|| BalancesError::InvalidOperand(format!("out of range: {}", self)))
    }
}

impl<T: ToMoney> ToMoney for Option<T> {
    fn to_money(&self) -> BalancesResult<Money> {
        match self {
            Some(value) => value.to_money(),
            None => Err(BalancesError::InvalidOperand("operand is null".into())),
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
