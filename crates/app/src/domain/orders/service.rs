//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use pizzeria::orders::OrderStatus;
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    domain::{
        customers::CustomerId,
        orders::models::{Order, OrderId},
    },
    outcome::Outcome,
};

#[derive(Debug, Serialize)]
struct NewOrder {
    customer_id: CustomerId,
}

#[derive(Debug, Deserialize)]
struct CreatedOrder {
    #[serde(alias = "orderId")]
    order_id: OrderId,
}

#[derive(Debug, Serialize)]
struct AddressUpdate<'a> {
    order_id: OrderId,
    address: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: ApiClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn address_request(&self, session: &Session, order: OrderId, address: &str) -> RequestBuilder {
        self.api
            .authed(Method::PUT, "/order/updateAddr", session)
            .json(&AddressUpdate {
                order_id: order,
                address,
            })
    }

    fn cancel_request(&self, session: &Session, order: OrderId) -> RequestBuilder {
        self.api
            .authed(Method::PUT, "/order/cancel", session)
            .query(&[("orderId", order.get())])
    }

    fn status_request(
        &self,
        session: &Session,
        order: OrderId,
        status: OrderStatus,
    ) -> RequestBuilder {
        self.api
            .authed(Method::PUT, "/order/update", session)
            .query(&[("newStatus", status.label())])
            .query(&[("orderId", order.get())])
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_order(
        &self,
        session: &Session,
        customer: CustomerId,
    ) -> Result<OrderId, ApiError> {
        let request = self
            .api
            .authed(Method::POST, "/order/create", session)
            .json(&NewOrder {
                customer_id: customer,
            });

        let created: CreatedOrder = self.api.json(request).await?;

        info!(order = %created.order_id, "order created");

        Ok(created.order_id)
    }

    async fn update_address(
        &self,
        session: &Session,
        order: OrderId,
        address: &str,
    ) -> Result<(), ApiError> {
        self.api
            .message(self.address_request(session, order, address))
            .await?;

        Ok(())
    }

    async fn list_orders(&self, session: &Session) -> Result<Vec<Order>, ApiError> {
        let request = self
            .api
            .authed(Method::GET, "/order/getByCustomer", session);

        self.api.json(request).await
    }

    async fn list_all_orders(&self, session: &Session) -> Result<Vec<Order>, ApiError> {
        let request = self.api.authed(Method::GET, "/order/getAll", session);

        self.api.json(request).await
    }

    async fn cancel_order(&self, session: &Session, order: OrderId) -> Result<Outcome, ApiError> {
        let body = self.api.message(self.cancel_request(session, order)).await?;

        Ok(body.outcome())
    }

    async fn update_status(
        &self,
        session: &Session,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        self.api
            .message(self.status_request(session, order, status))
            .await?;

        info!(%order, %status, "order status updated");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the customer's cart into an order.
    async fn create_order(
        &self,
        session: &Session,
        customer: CustomerId,
    ) -> Result<OrderId, ApiError>;

    /// Attach a delivery address to an order.
    async fn update_address(
        &self,
        session: &Session,
        order: OrderId,
        address: &str,
    ) -> Result<(), ApiError>;

    /// Orders placed by the signed-in customer.
    async fn list_orders(&self, session: &Session) -> Result<Vec<Order>, ApiError>;

    /// Every order, for staff.
    async fn list_all_orders(&self, session: &Session) -> Result<Vec<Order>, ApiError>;

    /// Ask the server to cancel an order.
    async fn cancel_order(&self, session: &Session, order: OrderId) -> Result<Outcome, ApiError>;

    /// Move an order to a new status.
    async fn update_status(
        &self,
        session: &Session,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError>;
}
