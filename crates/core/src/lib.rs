//! Pizzeria
//!
//! Pricing and order-state rules for the pizzeria storefront: cart line totals,
//! voucher discounts, the checkout summary and order tracking. Everything here is
//! pure; the HTTP client and views live in `pizzeria-app`.

pub mod carts;
pub mod checkout;
pub mod discounts;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod render;
pub mod vouchers;
