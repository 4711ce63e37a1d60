//! Checkout summary
//!
//! `final = subtotal - loyalty - voucher + delivery`, rebuilt from the latest
//! fetched cart every time it is shown.

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    discounts::DiscountError,
    money::{Dong, dong},
    vouchers::{Voucher, voucher_discount},
};

/// Errors raised while building a checkout summary.
#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    /// The voucher discount could not be computed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Figures shown on the payment page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutSummary {
    subtotal: Dong,
    loyalty_discount: Dong,
    voucher_discount: Dong,
    delivery_fee: Dong,
    final_total: Dong,
}

impl CheckoutSummary {
    /// Builds the summary from server-supplied subtotal and loyalty figures.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the voucher discount or the total cannot be computed.
    pub fn new(
        subtotal: Dong,
        loyalty_discount: Dong,
        voucher: Option<&Voucher>,
        delivery_fee: Dong,
    ) -> Result<Self, SummaryError> {
        let voucher_discount = match voucher {
            Some(voucher) if voucher.is_applied() => voucher_discount(voucher, subtotal)?,
            _ => dong(0),
        };

        let final_total = subtotal
            .sub(loyalty_discount)?
            .sub(voucher_discount)?
            .add(delivery_fee)?;

        Ok(Self {
            subtotal,
            loyalty_discount,
            voucher_discount,
            delivery_fee,
            final_total,
        })
    }

    /// Cart subtotal before discounts.
    pub fn subtotal(&self) -> Dong {
        self.subtotal
    }

    /// Server-computed loyalty discount.
    pub fn loyalty_discount(&self) -> Dong {
        self.loyalty_discount
    }

    /// Display-only voucher discount.
    pub fn voucher_discount(&self) -> Dong {
        self.voucher_discount
    }

    /// Delivery fee added on top.
    pub fn delivery_fee(&self) -> Dong {
        self.delivery_fee
    }

    /// Amount payable.
    pub fn final_total(&self) -> Dong {
        self.final_total
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::vouchers::DiscountType;

    use super::*;

    fn voucher(discount_type: DiscountType, value: i64) -> Voucher {
        Voucher {
            code: "PIZZA".to_string(),
            discount_type,
            value: Decimal::from(value),
            status: None,
        }
    }

    #[test]
    fn percent_voucher_and_loyalty() -> TestResult {
        let percent = voucher(DiscountType::Percent, 10);
        let summary = CheckoutSummary::new(dong(200_000), dong(10_000), Some(&percent), dong(0))?;

        assert_eq!(summary.voucher_discount(), dong(20_000));
        assert_eq!(summary.final_total(), dong(170_000));

        Ok(())
    }

    #[test]
    fn fixed_voucher_is_exact() -> TestResult {
        let fixed = voucher(DiscountType::Fixed, 30_000);
        let summary = CheckoutSummary::new(dong(200_000), dong(10_000), Some(&fixed), dong(0))?;

        assert_eq!(summary.voucher_discount(), dong(30_000));
        assert_eq!(summary.final_total(), dong(160_000));

        Ok(())
    }

    #[test]
    fn delivery_fee_is_added() -> TestResult {
        let summary = CheckoutSummary::new(dong(120_000), dong(0), None, dong(15_000))?;

        assert_eq!(summary.voucher_discount(), dong(0));
        assert_eq!(summary.final_total(), dong(135_000));

        Ok(())
    }

    #[test]
    fn fixed_voucher_above_subtotal_is_not_clamped() -> TestResult {
        let fixed = voucher(DiscountType::Fixed, 50_000);
        let summary = CheckoutSummary::new(dong(40_000), dong(0), Some(&fixed), dong(0))?;

        assert_eq!(summary.final_total(), dong(-10_000));

        Ok(())
    }

    #[test]
    fn unapplied_voucher_snapshot_is_ignored() -> TestResult {
        let mut blank = voucher(DiscountType::Fixed, 30_000);
        blank.code.clear();

        let summary = CheckoutSummary::new(dong(100_000), dong(0), Some(&blank), dong(0))?;

        assert_eq!(summary.voucher_discount(), dong(0));

        Ok(())
    }
}
