//! Order history and tracking

use std::sync::Arc;

use pizzeria::orders::{OrderStatus, SortDirection, sort_by_date};
use thiserror::Error;
use tracing::info;

use crate::{
    api::ApiError,
    auth::Session,
    domain::orders::{
        OrdersService,
        models::{Order, OrderId},
    },
    outcome::Ack,
};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("order {0} is not in the list")]
    UnknownOrder(OrderId),

    #[error("order {order_id} is {status} and can no longer be cancelled")]
    NotCancellable {
        order_id: OrderId,
        status: OrderStatus,
    },
}

/// Whose orders the history shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderScope {
    /// The signed-in customer's orders.
    #[default]
    Customer,

    /// Every order, for staff.
    All,
}

#[derive(Clone)]
pub struct OrderHistory {
    orders: Arc<dyn OrdersService>,
    scope: OrderScope,
    direction: SortDirection,
    loaded: Vec<Order>,
}

impl std::fmt::Debug for OrderHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderHistory")
            .field("scope", &self.scope)
            .field("direction", &self.direction)
            .field("loaded", &self.loaded.len())
            .finish_non_exhaustive()
    }
}

impl OrderHistory {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>, scope: OrderScope) -> Self {
        Self {
            orders,
            scope,
            direction: SortDirection::default(),
            loaded: Vec::new(),
        }
    }

    /// Fetch the orders and sort them by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load(
        &mut self,
        session: &Session,
        direction: SortDirection,
    ) -> Result<&[Order], HistoryError> {
        self.direction = direction;

        self.reload(session).await
    }

    /// Orders as last fetched, in the chosen order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.loaded
    }

    #[must_use]
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.loaded.iter().find(|order| order.order_id == order_id)
    }

    /// Whether the cancel action should be offered for a loaded order.
    #[must_use]
    pub fn can_cancel(&self, order_id: OrderId) -> bool {
        self.order(order_id)
            .is_some_and(|order| order.status.can_cancel())
    }

    /// Cancel a pending order, then refetch once the server confirms it.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is unknown or past `Pending`, the request
    /// fails, or the server does not confirm the cancellation.
    pub async fn cancel(
        &mut self,
        session: &Session,
        order_id: OrderId,
    ) -> Result<&[Order], HistoryError> {
        let status = self
            .order(order_id)
            .map(|order| order.status)
            .ok_or(HistoryError::UnknownOrder(order_id))?;

        if !status.can_cancel() {
            return Err(HistoryError::NotCancellable { order_id, status });
        }

        self.orders
            .cancel_order(session, order_id)
            .await?
            .expect_ack(Ack::OrderCancelled)?;

        info!(order = %order_id, "order cancelled");

        self.reload(session).await
    }

    /// Move an order to a new status, then refetch.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    pub async fn update_status(
        &mut self,
        session: &Session,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<&[Order], HistoryError> {
        self.orders.update_status(session, order_id, status).await?;

        self.reload(session).await
    }

    async fn reload(&mut self, session: &Session) -> Result<&[Order], HistoryError> {
        let mut orders = match self.scope {
            OrderScope::Customer => self.orders.list_orders(session).await?,
            OrderScope::All => self.orders.list_all_orders(session).await?,
        };

        sort_by_date(&mut orders, self.direction, |order| order.order_date);

        self.loaded = orders;

        Ok(&self.loaded)
    }
}
