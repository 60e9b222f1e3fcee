//! Prices

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single currency the store trades in.
pub const STORE_CURRENCY: &Currency = iso::USD;

/// Errors from price arithmetic.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    /// An addition or multiplication did not fit in a `u64` of minor units.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// Represents a price in pence/cents of [`STORE_CURRENCY`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates a new price from minor units.
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Creates a new price from whole major units (dollars).
    #[must_use]
    pub const fn from_major(major: u64) -> Self {
        Self(major * 100)
    }

    /// Minor units (cents).
    #[must_use]
    pub const fn to_minor_units(self) -> u64 {
        self.0
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the sum does not fit.
    pub fn checked_add(self, other: Self) -> Result<Self, PriceError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// Checked multiplication by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the product does not fit.
    pub fn checked_mul(self, qty: u32) -> Result<Self, PriceError> {
        self.0
            .checked_mul(u64::from(qty))
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// Decimal amount in major units with two decimal places, e.g. `350.00`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the amount exceeds `i64::MAX` minor units.
    pub fn to_decimal(self) -> Result<Decimal, PriceError> {
        let minor = i64::try_from(self.0).map_err(|_overflow| PriceError::Overflow)?;

        Ok(Decimal::new(minor, STORE_CURRENCY.exponent))
    }

    /// Convert to a [`Money`] amount for display.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the amount exceeds `i64::MAX` minor units.
    pub fn to_money(self) -> Result<Money<'static, Currency>, PriceError> {
        let minor = i64::try_from(self.0).map_err(|_overflow| PriceError::Overflow)?;

        Ok(Money::from_minor(minor, STORE_CURRENCY))
    }
}

impl From<u64> for Price {
    fn from(minor: u64) -> Self {
        Self(minor)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_money() {
            Ok(money) => write!(f, "{money}"),
            Err(_overflow) => write!(f, "{} minor units", self.0),
        }
    }
}
