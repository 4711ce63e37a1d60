//! Money
//!
//! The shop quotes every amount in Vietnamese đồng, which has no minor unit, so
//! one minor unit is one đồng.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

/// An amount in Vietnamese đồng.
pub type Dong = Money<'static, Currency>;

/// Errors raised while converting or summing amounts.
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    /// The amount cannot be represented in whole đồng.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),

    /// Multiplying or summing amounts overflowed.
    #[error("amount arithmetic overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The shop currency.
#[must_use]
pub fn currency() -> &'static Currency {
    iso::VND
}

/// Creates an amount from whole đồng.
pub fn dong(amount: i64) -> Dong {
    Money::from_minor(amount, currency())
}

/// Converts a server decimal into whole đồng, rounding half away from zero.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] when the rounded value does not fit in an `i64`.
pub fn from_decimal(amount: Decimal) -> Result<Dong, AmountError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(dong)
        .ok_or(AmountError::OutOfRange(amount))
}

/// Multiplies a unit price by a quantity.
///
/// # Errors
///
/// Returns [`AmountError::Overflow`] when the product does not fit in an `i64`.
pub fn times(price: Dong, quantity: u32) -> Result<Dong, AmountError> {
    price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .map(dong)
        .ok_or(AmountError::Overflow)
}

/// Formats an amount the way the storefront shows it, e.g. `250,000đ`.
pub fn format_dong(amount: &Dong) -> String {
    let minor = amount.to_minor_units();
    let digits = minor.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx).is_multiple_of(3) {
            grouped.push(',');
        }

        grouped.push(digit);
    }

    if minor < 0 {
        format!("-{grouped}đ")
    } else {
        format!("{grouped}đ")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_dong(&dong(250_000)), "250,000đ");
        assert_eq!(format_dong(&dong(1_234_567)), "1,234,567đ");
        assert_eq!(format_dong(&dong(999)), "999đ");
        assert_eq!(format_dong(&dong(0)), "0đ");
    }

    #[test]
    fn format_keeps_sign() {
        assert_eq!(format_dong(&dong(-30_000)), "-30,000đ");
    }

    #[test]
    fn from_decimal_rounds_half_away_from_zero() -> TestResult {
        assert_eq!(
            from_decimal(Decimal::from_str("100000.50")?)?,
            dong(100_001)
        );
        assert_eq!(
            from_decimal(Decimal::from_str("100000.49")?)?,
            dong(100_000)
        );
        assert_eq!(from_decimal(Decimal::from_str("-0.5")?)?, dong(-1));

        Ok(())
    }

    #[test]
    fn from_decimal_rejects_values_beyond_i64() -> TestResult {
        let huge = Decimal::from_str("99999999999999999999999")?;

        assert_eq!(from_decimal(huge), Err(AmountError::OutOfRange(huge)));

        Ok(())
    }

    #[test]
    fn times_multiplies_by_quantity() -> TestResult {
        assert_eq!(times(dong(100_000), 2)?, dong(200_000));

        Ok(())
    }

    #[test]
    fn times_reports_overflow() {
        assert_eq!(times(dong(i64::MAX), 2), Err(AmountError::Overflow));
    }
}
