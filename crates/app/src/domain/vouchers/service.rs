//! Vouchers service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use tracing::info;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    domain::carts::models::CartId,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyVoucher<'a> {
    cart_id: CartId,
    voucher_code: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpVouchersService {
    api: ApiClient,
}

impl HttpVouchersService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn apply_request(&self, session: &Session, cart: CartId, code: &str) -> RequestBuilder {
        self.api
            .authed(Method::POST, "/voucher/applyVch", session)
            .json(&ApplyVoucher {
                cart_id: cart,
                voucher_code: code,
            })
    }

    fn remove_request(&self, session: &Session, cart: CartId) -> RequestBuilder {
        self.api
            .authed(Method::POST, "/voucher/removeVch", session)
            .query(&[("cartId", cart.get())])
    }
}

#[async_trait]
impl VouchersService for HttpVouchersService {
    async fn apply_voucher(
        &self,
        session: &Session,
        cart: CartId,
        code: &str,
    ) -> Result<(), ApiError> {
        self.api
            .message(self.apply_request(session, cart, code))
            .await?;

        info!(%cart, code, "voucher applied");

        Ok(())
    }

    async fn remove_voucher(&self, session: &Session, cart: CartId) -> Result<(), ApiError> {
        self.api.message(self.remove_request(session, cart)).await?;

        info!(%cart, "voucher removed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait VouchersService: Send + Sync {
    /// Apply a voucher code to a cart.
    async fn apply_voucher(
        &self,
        session: &Session,
        cart: CartId,
        code: &str,
    ) -> Result<(), ApiError>;

    /// Remove whatever voucher the cart carries.
    async fn remove_voucher(&self, session: &Session, cart: CartId) -> Result<(), ApiError>;
}
