//! Test Helpers

use std::time::Duration;

use pizzeria::{carts::Quantity, orders::OrderStatus};
use rust_decimal::Decimal;

use crate::{
    api::{ApiClient, ApiConfig, ApiError},
    auth::{AuthToken, Session},
    domain::{
        carts::models::{Cart, CartItem, CartItemId},
        customers::CustomerId,
        orders::models::{Order, OrderId},
    },
};

pub(crate) const CUSTOMER: CustomerId = CustomerId::new(42);

/// A signed-in customer whose token is `test-token`.
pub(crate) fn session() -> Session {
    Session::new(
        "mario".to_string(),
        AuthToken::new("test-token").unwrap_or_else(|_| unreachable!()),
        Some(CUSTOMER),
        Some("customer".to_string()),
    )
}

pub(crate) fn api_client() -> Result<ApiClient, ApiError> {
    ApiClient::new(&ApiConfig {
        base_url: "http://pizza.test".to_string(),
        timeout: Duration::from_secs(5),
    })
}

/// Cart from `(cart_item_id, price_per_item, quantity)` triples. Line totals
/// and the subtotal are filled in the way the server computes them.
pub(crate) fn make_cart(lines: &[(i64, i64, u32)]) -> Cart {
    let items: Vec<CartItem> = lines
        .iter()
        .map(|&(id, price, quantity)| CartItem {
            cart_item_id: CartItemId::new(id),
            product_name: format!("Pizza {id}"),
            price_per_item: Decimal::from(price),
            quantity: Quantity::new(quantity).unwrap_or(Quantity::ONE),
            size: "M".to_string(),
            total_price: Decimal::from(price) * Decimal::from(quantity),
        })
        .collect();

    let sub_total = items.iter().map(|item| item.total_price).sum();

    Cart {
        items,
        sub_total,
        loyalty_discount: Decimal::ZERO,
        voucher: None,
    }
}

/// Order with the given id, date text and status.
pub(crate) fn make_order(id: i64, date: &str, status: OrderStatus) -> Order {
    Order {
        order_id: OrderId::new(id),
        customer_id: Some(CUSTOMER),
        address: Some("12 Lê Lợi".to_string()),
        order_date: date.parse().unwrap_or_else(|_| unreachable!()),
        status,
        order_total: Decimal::from(100_000),
        final_price: None,
        items: Vec::new(),
    }
}
