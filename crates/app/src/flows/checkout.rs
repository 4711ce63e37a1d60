//! Checkout / payment

use std::sync::Arc;

use pizzeria::{
    checkout::CheckoutSummary,
    money::Dong,
    vouchers::{VoucherError, ensure_slot_free, normalise_code},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    api::ApiError,
    auth::Session,
    domain::{
        carts::{
            CartPricingError, CartsService,
            models::{Cart, CartId},
        },
        orders::{OrdersService, models::OrderId},
        vouchers::VouchersService,
    },
    flows::cache::CartCache,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Voucher(#[from] VoucherError),

    #[error(transparent)]
    Pricing(#[from] CartPricingError),

    #[error("the cart has not been loaded")]
    NotLoaded,

    #[error("a delivery address is required")]
    EmptyAddress,

    #[error("this account has no customer id")]
    MissingCustomer,

    #[error("could not create the order")]
    CreateOrder(#[source] ApiError),

    /// The order exists but has no address yet.
    #[error("order {order_id} was created but the address could not be attached")]
    AttachAddress {
        order_id: OrderId,
        #[source]
        source: ApiError,
    },
}

/// An order with its address attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub address: String,
}

#[derive(Clone)]
pub struct Checkout {
    carts: Arc<dyn CartsService>,
    vouchers: Arc<dyn VouchersService>,
    orders: Arc<dyn OrdersService>,
    cache: Arc<CartCache>,
    delivery_fee: Dong,
    cart_id: Option<CartId>,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("delivery_fee", &self.delivery_fee)
            .field("cart_id", &self.cart_id)
            .finish_non_exhaustive()
    }
}

impl Checkout {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        vouchers: Arc<dyn VouchersService>,
        orders: Arc<dyn OrdersService>,
        cache: Arc<CartCache>,
        delivery_fee: Dong,
    ) -> Self {
        Self {
            carts,
            vouchers,
            orders,
            cache,
            delivery_fee,
            cart_id: None,
        }
    }

    /// Fetch the cart id and the cart, then price it.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails or the cart cannot be priced.
    pub async fn load(&mut self, session: &Session) -> Result<CheckoutSummary, CheckoutError> {
        self.cart_id = Some(self.carts.get_cart_id(session).await?);

        self.priced(session).await
    }

    /// The cart as last fetched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotLoaded`] before [`Checkout::load`].
    pub fn cart(&self) -> Result<Cart, CheckoutError> {
        self.cache
            .get(self.cart_id()?)
            .ok_or(CheckoutError::NotLoaded)
    }

    /// Payment figures for the last fetched cart.
    ///
    /// # Errors
    ///
    /// Returns an error before [`Checkout::load`] or if the cart cannot be priced.
    pub fn summary(&self) -> Result<CheckoutSummary, CheckoutError> {
        Ok(self.cart()?.summary(self.delivery_fee)?)
    }

    /// Apply a voucher code. A cart holds at most one voucher; a second one is
    /// refused here without asking the server.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank code, an occupied voucher slot or a failed request.
    pub async fn apply_voucher(
        &self,
        session: &Session,
        code: &str,
    ) -> Result<CheckoutSummary, CheckoutError> {
        let code = normalise_code(code)?;
        let cart_id = self.cart_id()?;

        ensure_slot_free(self.cart()?.applied_voucher())?;

        self.vouchers.apply_voucher(session, cart_id, code).await?;
        self.cache.invalidate(cart_id);

        self.priced(session).await
    }

    /// Drop the cart's voucher.
    ///
    /// # Errors
    ///
    /// Returns an error before [`Checkout::load`] or if a request fails.
    pub async fn remove_voucher(
        &self,
        session: &Session,
    ) -> Result<CheckoutSummary, CheckoutError> {
        let cart_id = self.cart_id()?;

        self.vouchers.remove_voucher(session, cart_id).await?;
        self.cache.invalidate(cart_id);

        self.priced(session).await
    }

    /// Create the order, then attach the address to it.
    ///
    /// The address is only sent once the server has returned an order id. If
    /// attaching fails the order id travels in [`CheckoutError::AttachAddress`]
    /// so the caller can [`Checkout::retry_address`].
    ///
    /// # Errors
    ///
    /// Returns an error for a blank address, a session without a customer id or a failed request.
    pub async fn place_order(
        &self,
        session: &Session,
        address: &str,
    ) -> Result<PlacedOrder, CheckoutError> {
        let address = address.trim();

        if address.is_empty() {
            return Err(CheckoutError::EmptyAddress);
        }

        let customer_id = session
            .customer_id()
            .ok_or(CheckoutError::MissingCustomer)?;

        let order_id = self
            .orders
            .create_order(session, customer_id)
            .await
            .map_err(CheckoutError::CreateOrder)?;

        self.attach_address(session, order_id, address).await
    }

    /// Re-send only the address for an order whose address step failed.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank address or a failed request.
    pub async fn retry_address(
        &self,
        session: &Session,
        order_id: OrderId,
        address: &str,
    ) -> Result<PlacedOrder, CheckoutError> {
        let address = address.trim();

        if address.is_empty() {
            return Err(CheckoutError::EmptyAddress);
        }

        self.attach_address(session, order_id, address).await
    }

    async fn attach_address(
        &self,
        session: &Session,
        order_id: OrderId,
        address: &str,
    ) -> Result<PlacedOrder, CheckoutError> {
        if let Err(source) = self.orders.update_address(session, order_id, address).await {
            warn!(order = %order_id, "order has no delivery address: {source}");

            return Err(CheckoutError::AttachAddress { order_id, source });
        }

        if let Some(cart_id) = self.cart_id {
            self.cache.invalidate(cart_id);
        }

        info!(order = %order_id, "order placed");

        Ok(PlacedOrder {
            order_id,
            address: address.to_string(),
        })
    }

    async fn refresh(&self, session: &Session) -> Result<Cart, CheckoutError> {
        let cart_id = self.cart_id()?;
        let ticket = self.cache.begin_fetch(cart_id);

        let cart = self.carts.get_cart(session).await?;

        if !self.cache.complete(ticket, cart.clone()) {
            debug!(cart = %cart_id, "cart changed while fetching; pricing this response");
        }

        Ok(self.cache.get(cart_id).unwrap_or(cart))
    }

    async fn priced(&self, session: &Session) -> Result<CheckoutSummary, CheckoutError> {
        Ok(self.refresh(session).await?.summary(self.delivery_fee)?)
    }

    fn cart_id(&self) -> Result<CartId, CheckoutError> {
        self.cart_id.ok_or(CheckoutError::NotLoaded)
    }
}
