//! Cart Models
//!
//! Field names follow the backend's JSON exactly.

use pizzeria::{
    carts::{CartLine, Quantity},
    checkout::CheckoutSummary,
    money::{Dong, from_decimal},
    vouchers::Voucher,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{carts::CartPricingError, catalog::models::ProductId, customers::CustomerId},
    ids::TypedId,
};

/// Cart Id
pub type CartId = TypedId<Cart>;

/// Cart Item Id
pub type CartItemId = TypedId<CartItem>;

/// Cart Model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,

    #[serde(rename = "subTotal", default)]
    pub sub_total: Decimal,

    #[serde(rename = "loyaltyDiscount", default)]
    pub loyalty_discount: Decimal,

    #[serde(default)]
    pub voucher: Option<Voucher>,
}

impl Cart {
    /// The applied voucher, if its code is set.
    #[must_use]
    pub fn applied_voucher(&self) -> Option<&Voucher> {
        self.voucher.as_ref().filter(|voucher| voucher.is_applied())
    }

    #[must_use]
    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.cart_item_id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line items converted to priced cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be represented in whole đồng.
    pub fn lines(&self) -> Result<Vec<CartLine>, CartPricingError> {
        self.items.iter().map(CartItem::line).collect()
    }

    /// Payment summary from the server's subtotal and loyalty figures.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be represented or the total cannot be computed.
    pub fn summary(&self, delivery_fee: Dong) -> Result<CheckoutSummary, CartPricingError> {
        Ok(CheckoutSummary::new(
            from_decimal(self.sub_total)?,
            from_decimal(self.loyalty_discount)?,
            self.applied_voucher(),
            delivery_fee,
        )?)
    }
}

/// Cart Item Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub cart_item_id: CartItemId,

    #[serde(rename = "Product_Name")]
    pub product_name: String,

    pub price_per_item: Decimal,

    pub quantity: Quantity,

    #[serde(default)]
    pub size: String,

    pub total_price: Decimal,
}

impl CartItem {
    /// Convert to a priced line.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be represented in whole đồng.
    pub fn line(&self) -> Result<CartLine, CartPricingError> {
        Ok(CartLine {
            name: self.product_name.clone(),
            size: self.size.clone(),
            unit_price: from_decimal(self.price_per_item)?,
            quantity: self.quantity,
            total_price: from_decimal(self.total_price)?,
        })
    }
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCartItem {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub size: String,
}
