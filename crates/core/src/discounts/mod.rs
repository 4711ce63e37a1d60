//! Discount utilities
//!
//! Percentage arithmetic shared by voucher discounts and anything else that
//! takes a share of a cart subtotal.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::MoneyError;
use thiserror::Error;

use crate::money::AmountError;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A fixed discount value could not be represented in whole đồng.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Converts a "points" percentage such as `10` (meaning 10%) into a [`Percentage`].
pub fn percentage_from_points(points: Decimal) -> Percentage {
    Percentage::from(points / Decimal::ONE_HUNDRED)
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns an error if:
/// - The percentage calculation overflows or cannot be safely represented (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage does not expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use std::{convert::TryFrom, str::FromStr};

    use decimal_percentage::Percentage;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_checked_mul_overflow_returns_error() -> TestResult {
        let percent = Percentage::try_from("100000000000000000000")?;
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));

        Ok(())
    }

    #[test]
    fn ten_points_of_two_hundred_thousand() -> TestResult {
        let percent = percentage_from_points(Decimal::from(10));

        assert_eq!(percent_of_minor(&percent, 200_000)?, 20_000);

        Ok(())
    }

    #[test]
    fn fractional_points_round_half_away_from_zero() -> TestResult {
        // 12.5% of 99,999 is 12,499.875
        let percent = percentage_from_points(Decimal::from_str("12.5")?);

        assert_eq!(percent_of_minor(&percent, 99_999)?, 12_500);

        Ok(())
    }

    #[test]
    fn zero_points_is_free_of_charge() -> TestResult {
        let percent = percentage_from_points(Decimal::ZERO);

        assert_eq!(percent_of_minor(&percent, 180_000)?, 0);

        Ok(())
    }
}
