//! Cart sidebar

use std::sync::Arc;

use pizzeria::{
    carts::{CartLine, Quantity, Step},
    money::{AmountError, Dong},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    api::ApiError,
    auth::Session,
    domain::{
        carts::{
            CartPricingError, CartsService,
            models::{Cart, CartId, CartItemId, NewCartItem},
        },
        catalog::models::ProductId,
    },
    flows::cache::CartCache,
    outcome::Ack,
};

#[derive(Debug, Error)]
pub enum CartViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Pricing(#[from] CartPricingError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("the cart has not been loaded")]
    NotLoaded,

    #[error("cart item {0} is not in the cart")]
    UnknownItem(CartItemId),

    #[error("this account has no customer id")]
    MissingCustomer,
}

/// What a stepper press did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The quantity changed and the cart was refetched.
    Updated(Cart),

    /// Nothing to do: decrement at 1, or increment at the ceiling.
    Unchanged,
}

#[derive(Clone)]
pub struct CartView {
    carts: Arc<dyn CartsService>,
    cache: Arc<CartCache>,
    cart_id: Option<CartId>,
}

impl std::fmt::Debug for CartView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartView")
            .field("cart_id", &self.cart_id)
            .finish_non_exhaustive()
    }
}

impl CartView {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>, cache: Arc<CartCache>) -> Self {
        Self {
            carts,
            cache,
            cart_id: None,
        }
    }

    /// Resolve the cart id and fetch the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    pub async fn open(&mut self, session: &Session) -> Result<Cart, CartViewError> {
        let cart_id = self.carts.get_cart_id(session).await?;

        self.cart_id = Some(cart_id);

        self.refresh(session).await
    }

    /// Refetch the cart. Stale responses are kept out of the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart was never opened or the request fails.
    pub async fn refresh(&self, session: &Session) -> Result<Cart, CartViewError> {
        let cart_id = self.cart_id()?;
        let ticket = self.cache.begin_fetch(cart_id);

        let cart = self.carts.get_cart(session).await?;

        if !self.cache.complete(ticket, cart.clone()) {
            debug!(cart = %cart_id, "a newer cart response is already cached");
        }

        Ok(self.cache.get(cart_id).unwrap_or(cart))
    }

    /// The cart as last fetched.
    ///
    /// # Errors
    ///
    /// Returns [`CartViewError::NotLoaded`] before a successful fetch.
    pub fn cart(&self) -> Result<Cart, CartViewError> {
        self.cache
            .get(self.cart_id()?)
            .ok_or(CartViewError::NotLoaded)
    }

    /// Press a line's stepper.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is unknown or a request fails.
    pub async fn step(
        &self,
        session: &Session,
        item: CartItemId,
        step: Step,
    ) -> Result<StepOutcome, CartViewError> {
        let current = self
            .cart()?
            .item(item)
            .map(|line| line.quantity)
            .ok_or(CartViewError::UnknownItem(item))?;

        match current.step(step) {
            Some(quantity) => Ok(StepOutcome::Updated(
                self.set_quantity(session, item, quantity).await?,
            )),
            None => Ok(StepOutcome::Unchanged),
        }
    }

    /// Set a line's quantity and refetch.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails.
    pub async fn set_quantity(
        &self,
        session: &Session,
        item: CartItemId,
        quantity: Quantity,
    ) -> Result<Cart, CartViewError> {
        let cart_id = self.cart_id()?;

        self.carts.update_quantity(session, item, quantity).await?;
        self.cache.invalidate(cart_id);

        self.refresh(session).await
    }

    /// Delete a line. Succeeds only when the server acknowledges the removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server does not confirm it.
    pub async fn remove(&self, session: &Session, item: CartItemId) -> Result<Cart, CartViewError> {
        let cart_id = self.cart_id()?;

        self.carts
            .remove_item(session, item)
            .await?
            .expect_ack(Ack::ProductRemoved)?;

        self.cache.invalidate(cart_id);
        info!(%item, "cart item removed");

        self.refresh(session).await
    }

    /// Add a product for the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the session has no customer id or a request fails.
    pub async fn add(
        &self,
        session: &Session,
        product: ProductId,
        quantity: Quantity,
        size: impl Into<String>,
    ) -> Result<Cart, CartViewError> {
        let cart_id = self.cart_id()?;
        let customer_id = session
            .customer_id()
            .ok_or(CartViewError::MissingCustomer)?;

        self.carts
            .add_item(
                session,
                NewCartItem {
                    customer_id,
                    product_id: product,
                    quantity,
                    size: size.into(),
                },
            )
            .await?;

        self.cache.invalidate(cart_id);
        info!(%product, %quantity, "product added to cart");

        self.refresh(session).await
    }

    /// Line items of the last fetched cart.
    ///
    /// # Errors
    ///
    /// Returns an error before the first fetch or if an amount is unrepresentable.
    pub fn lines(&self) -> Result<Vec<CartLine>, CartViewError> {
        Ok(self.cart()?.lines()?)
    }

    /// Sum of the server's line totals.
    ///
    /// # Errors
    ///
    /// Returns an error before the first fetch or if the sum overflows.
    pub fn running_total(&self) -> Result<Dong, CartViewError> {
        Ok(pizzeria::carts::running_total(&self.lines()?)?)
    }

    /// Sum of unit price times quantity, for cross-checking the server.
    ///
    /// # Errors
    ///
    /// Returns an error before the first fetch or if the sum overflows.
    pub fn computed_total(&self) -> Result<Dong, CartViewError> {
        Ok(pizzeria::carts::computed_total(&self.lines()?)?)
    }

    fn cart_id(&self) -> Result<CartId, CartViewError> {
        self.cart_id.ok_or(CartViewError::NotLoaded)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use pizzeria::money::dong;
    use testresult::TestResult;

    use crate::{
        domain::carts::MockCartsService,
        outcome::Outcome,
        test::{make_cart, session},
    };

    use super::*;

    const CART: CartId = CartId::new(77);

    fn opened(mut carts: MockCartsService) -> MockCartsService {
        carts.expect_get_cart_id().once().returning(|_| Ok(CART));
        carts
    }

    async fn open_view(carts: MockCartsService) -> Result<CartView, CartViewError> {
        let mut view = CartView::new(Arc::new(carts), Arc::new(CartCache::new()));

        view.open(&session()).await?;

        Ok(view)
    }

    #[tokio::test]
    async fn running_total_sums_server_line_totals() -> TestResult {
        let mut carts = opened(MockCartsService::new());
        carts
            .expect_get_cart()
            .once()
            .returning(|_| Ok(make_cart(&[(1, 100_000, 2), (2, 50_000, 1)])));

        let view = open_view(carts).await?;

        assert_eq!(view.running_total()?, dong(250_000));
        assert_eq!(view.computed_total()?, dong(250_000));

        Ok(())
    }

    #[tokio::test]
    async fn decrement_at_one_does_not_call_the_server() -> TestResult {
        let mut carts = opened(MockCartsService::new());
        carts
            .expect_get_cart()
            .once()
            .returning(|_| Ok(make_cart(&[(1, 100_000, 1)])));
        carts.expect_update_quantity().never();

        let view = open_view(carts).await?;

        let outcome = view
            .step(&session(), CartItemId::new(1), Step::Decrement)
            .await?;

        assert_eq!(outcome, StepOutcome::Unchanged);

        Ok(())
    }

    #[tokio::test]
    async fn increment_updates_and_refetches() -> TestResult {
        let mut carts = opened(MockCartsService::new());
        let mut fetches = 0;
        carts.expect_get_cart().times(2).returning(move |_| {
            fetches += 1;
            Ok(make_cart(&[(1, 100_000, fetches)]))
        });
        carts
            .expect_update_quantity()
            .once()
            .withf(|_, item, quantity| *item == CartItemId::new(1) && quantity.get() == 2)
            .returning(|_, _, _| Ok(()));

        let view = open_view(carts).await?;

        let outcome = view
            .step(&session(), CartItemId::new(1), Step::Increment)
            .await?;

        let StepOutcome::Updated(cart) = outcome else {
            return Err("expected an update".into());
        };

        assert_eq!(cart.items.first().map(|item| item.quantity.get()), Some(2));
        assert_eq!(view.running_total()?, dong(200_000));

        Ok(())
    }

    #[tokio::test]
    async fn remove_requires_exact_acknowledgement() -> TestResult {
        let mut carts = opened(MockCartsService::new());
        carts
            .expect_get_cart()
            .once()
            .returning(|_| Ok(make_cart(&[(1, 100_000, 1)])));
        carts
            .expect_remove_item()
            .with(mockall::predicate::always(), eq(CartItemId::new(1)))
            .once()
            .returning(|_, _| {
                Ok(Outcome::Rejected {
                    message: "Product removed".to_string(),
                })
            });

        let view = open_view(carts).await?;

        let result = view.remove(&session(), CartItemId::new(1)).await;

        assert!(
            matches!(result, Err(CartViewError::Api(ApiError::Rejected { .. }))),
            "expected rejection, got {result:?}"
        );
        assert_eq!(view.running_total()?, dong(100_000));

        Ok(())
    }

    #[tokio::test]
    async fn remove_refetches_after_acknowledgement() -> TestResult {
        let mut carts = opened(MockCartsService::new());
        let mut fetches = 0;
        carts.expect_get_cart().times(2).returning(move |_| {
            fetches += 1;
            Ok(if fetches == 1 {
                make_cart(&[(1, 100_000, 1)])
            } else {
                make_cart(&[])
            })
        });
        carts
            .expect_remove_item()
            .once()
            .returning(|_, _| Ok(Outcome::Success(Ack::ProductRemoved)));

        let view = open_view(carts).await?;

        let cart = view.remove(&session(), CartItemId::new(1)).await?;

        assert!(cart.is_empty(), "cart should be empty after removal");

        Ok(())
    }

    #[tokio::test]
    async fn add_uses_the_session_customer() -> TestResult {
        let mut carts = opened(MockCartsService::new());
        carts
            .expect_get_cart()
            .times(2)
            .returning(|_| Ok(make_cart(&[])));
        carts
            .expect_add_item()
            .once()
            .withf(|session, item| {
                Some(item.customer_id) == session.customer_id()
                    && item.product_id == ProductId::new(5)
                    && item.size == "L"
            })
            .returning(|_, _| Ok(()));

        let view = open_view(carts).await?;

        view.add(&session(), ProductId::new(5), Quantity::ONE, "L")
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn mutations_need_an_open_cart() {
        let mut carts = MockCartsService::new();
        carts.expect_update_quantity().never();

        let view = CartView::new(Arc::new(carts), Arc::new(CartCache::new()));

        let result = view
            .step(&session(), CartItemId::new(1), Step::Increment)
            .await;

        assert!(
            matches!(result, Err(CartViewError::NotLoaded)),
            "expected not loaded, got {result:?}"
        );
    }
}
