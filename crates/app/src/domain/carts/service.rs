//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use pizzeria::carts::Quantity;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    domain::carts::models::{Cart, CartId, CartItemId, NewCartItem},
    outcome::Outcome,
};

/// `GET /cart/getCartId` answers with either a bare id or a small object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CartIdResponse {
    Bare(CartId),
    Wrapped {
        #[serde(alias = "cartId", alias = "Cart_ID", alias = "id")]
        cart_id: CartId,
    },
}

impl From<CartIdResponse> for CartId {
    fn from(response: CartIdResponse) -> Self {
        match response {
            CartIdResponse::Bare(id) | CartIdResponse::Wrapped { cart_id: id } => id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpCartsService {
    api: ApiClient,
}

impl HttpCartsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn update_request(
        &self,
        session: &Session,
        item: CartItemId,
        quantity: Quantity,
    ) -> RequestBuilder {
        self.api
            .authed(Method::PUT, "/cart/update/", session)
            .query(&[
                ("cart_item_id", item.get()),
                ("quantity", i64::from(quantity.get())),
            ])
    }

    fn remove_request(&self, session: &Session, item: CartItemId) -> RequestBuilder {
        self.api
            .authed(Method::DELETE, "/cart/remove/", session)
            .query(&[("cart_item_id", item.get())])
    }
}

#[async_trait]
impl CartsService for HttpCartsService {
    async fn get_cart(&self, session: &Session) -> Result<Cart, ApiError> {
        let request = self.api.authed(Method::GET, "/cart/get", session);

        self.api.json(request).await
    }

    async fn get_cart_id(&self, session: &Session) -> Result<CartId, ApiError> {
        let request = self.api.authed(Method::GET, "/cart/getCartId", session);

        let response: CartIdResponse = self.api.json(request).await?;

        Ok(response.into())
    }

    async fn add_item(&self, session: &Session, item: NewCartItem) -> Result<(), ApiError> {
        let request = self
            .api
            .authed(Method::POST, "/cart/add", session)
            .json(&item);

        self.api.message(request).await?;

        Ok(())
    }

    async fn update_quantity(
        &self,
        session: &Session,
        item: CartItemId,
        quantity: Quantity,
    ) -> Result<(), ApiError> {
        self.api
            .message(self.update_request(session, item, quantity))
            .await?;

        Ok(())
    }

    async fn remove_item(&self, session: &Session, item: CartItemId) -> Result<Outcome, ApiError> {
        let body = self.api.message(self.remove_request(session, item)).await?;

        Ok(body.outcome())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the signed-in customer's cart.
    async fn get_cart(&self, session: &Session) -> Result<Cart, ApiError>;

    /// Resolve the id of the signed-in customer's cart.
    async fn get_cart_id(&self, session: &Session) -> Result<CartId, ApiError>;

    /// Add a product to the cart.
    async fn add_item(&self, session: &Session, item: NewCartItem) -> Result<(), ApiError>;

    /// Set a line's quantity.
    async fn update_quantity(
        &self,
        session: &Session,
        item: CartItemId,
        quantity: Quantity,
    ) -> Result<(), ApiError>;

    /// Delete a line. The caller decides what the server's answer means.
    async fn remove_item(&self, session: &Session, item: CartItemId) -> Result<Outcome, ApiError>;
}
