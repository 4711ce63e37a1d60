//! Storefront pricing properties exercised through the public API

use rust_decimal::Decimal;
use testresult::TestResult;

use pizzeria::prelude::*;

fn line(unit: i64, quantity: u32) -> Result<CartLine, ZeroQuantity> {
    Ok(CartLine {
        name: "Pepperoni".to_string(),
        size: "M".to_string(),
        unit_price: dong(unit),
        quantity: Quantity::try_from(quantity)?,
        total_price: dong(unit * i64::from(quantity)),
    })
}

fn voucher(discount_type: DiscountType, value: i64) -> Voucher {
    Voucher {
        code: "WELCOME".to_string(),
        discount_type,
        value: Decimal::from(value),
        status: Some(VoucherStatus::Active),
    }
}

#[test]
fn sidebar_total_matches_line_totals() -> TestResult {
    let lines = [line(100_000, 2)?, line(50_000, 1)?];

    let total = running_total(&lines)?;

    assert_eq!(total, computed_total(&lines)?);
    assert_eq!(format_dong(&total), "250,000đ");

    Ok(())
}

#[test]
fn percent_voucher_checkout() -> TestResult {
    let percent = voucher(DiscountType::Percent, 10);
    let summary = CheckoutSummary::new(dong(200_000), dong(10_000), Some(&percent), dong(0))?;

    assert_eq!(summary.voucher_discount(), dong(20_000));
    assert_eq!(summary.final_total(), dong(170_000));

    Ok(())
}

#[test]
fn fixed_voucher_checkout() -> TestResult {
    let fixed = voucher(DiscountType::Fixed, 30_000);

    for subtotal in [200_000, 75_000, 1_000_000] {
        let summary = CheckoutSummary::new(dong(subtotal), dong(10_000), Some(&fixed), dong(0))?;

        assert_eq!(summary.voucher_discount(), dong(30_000));
    }

    Ok(())
}

#[test]
fn second_voucher_is_refused_until_first_is_removed() {
    let applied = voucher(DiscountType::Percent, 10);

    assert!(matches!(
        ensure_slot_free(Some(&applied)),
        Err(VoucherError::AlreadyApplied(code)) if code == "WELCOME"
    ));
    assert_eq!(ensure_slot_free(None), Ok(()));
}

#[test]
fn only_pending_orders_offer_cancel() {
    let cancellable: Vec<_> = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ]
    .into_iter()
    .filter(|status| status.can_cancel())
    .collect();

    assert_eq!(cancellable, [OrderStatus::Pending]);
}
