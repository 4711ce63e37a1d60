//! Pizzeria prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    carts::{CartLine, Quantity, Step, ZeroQuantity, computed_total, running_total},
    checkout::{CheckoutSummary, SummaryError},
    discounts::DiscountError,
    money::{AmountError, Dong, dong, format_dong, from_decimal},
    orders::{ORDER_STEPS, OrderStatus, Progress, SortDirection, progress, sort_by_date},
    render::{RenderError, progress_line, write_cart, write_summary},
    vouchers::{
        DiscountType, Voucher, VoucherError, VoucherStatus, ensure_slot_free, normalise_code,
        voucher_discount,
    },
};
