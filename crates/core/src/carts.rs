//! Cart lines
//!
//! Line items are priced by the server. The client only sums what it was given
//! and, for the on-screen stepper, keeps quantities at one or more.

use std::{fmt, num::NonZeroU32};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::{AmountError, Dong, dong, times};

/// Rejected quantity value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("quantity must be at least 1")]
pub struct ZeroQuantity;

/// A line quantity. Never zero; removing a line is a separate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Creates a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// The raw number of units.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Applies a stepper press.
    ///
    /// Returns `None` when the press would not change anything: decrementing a
    /// single unit, or incrementing past `u32::MAX`.
    #[must_use]
    pub fn step(self, step: Step) -> Option<Self> {
        match step {
            Step::Increment => self.0.checked_add(1).map(Self),
            Step::Decrement => Self::new(self.get() - 1),
        }
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ZeroQuantity;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ZeroQuantity)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.get()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A quantity stepper press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One more unit.
    Increment,

    /// One fewer unit, never below one.
    Decrement,
}

/// One product, size and quantity within a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product display name.
    pub name: String,

    /// Pizza size label as sent by the server.
    pub size: String,

    /// Price of a single unit.
    pub unit_price: Dong,

    /// Number of units.
    pub quantity: Quantity,

    /// Server-computed line total.
    pub total_price: Dong,
}

impl CartLine {
    /// `unit_price * quantity`, for cross-checking the server's line total.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the product does not fit.
    pub fn computed_total(&self) -> Result<Dong, AmountError> {
        times(self.unit_price, self.quantity.get())
    }
}

/// Sums the server's line totals. An empty cart totals zero.
///
/// # Errors
///
/// Returns an error on money arithmetic failure.
pub fn running_total(lines: &[CartLine]) -> Result<Dong, AmountError> {
    lines
        .iter()
        .try_fold(dong(0), |acc, line| Ok(acc.add(line.total_price)?))
}

/// Sums `unit_price * quantity` over every line.
///
/// # Errors
///
/// Returns an error on overflow or money arithmetic failure.
pub fn computed_total(lines: &[CartLine]) -> Result<Dong, AmountError> {
    lines
        .iter()
        .try_fold(dong(0), |acc, line| Ok(acc.add(line.computed_total()?)?))
}
