//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    api::{ApiClient, ApiConfig, ApiError},
    auth::{AuthService, HttpAuthService},
    domain::{
        carts::{CartsService, HttpCartsService},
        catalog::{CatalogService, HttpCatalogService},
        orders::{HttpOrdersService, OrdersService},
        vouchers::{HttpVouchersService, VouchersService},
    },
    flows::CartCache,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build the HTTP client")]
    Client(#[source] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub carts: Arc<dyn CartsService>,
    pub vouchers: Arc<dyn VouchersService>,
    pub orders: Arc<dyn OrdersService>,
    pub catalog: Arc<dyn CatalogService>,
    pub cart_cache: Arc<CartCache>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context around one shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_api_config(config: &ApiConfig) -> Result<Self, AppInitError> {
        let api = ApiClient::new(config).map_err(AppInitError::Client)?;

        Ok(Self {
            auth: Arc::new(HttpAuthService::new(api.clone())),
            carts: Arc::new(HttpCartsService::new(api.clone())),
            vouchers: Arc::new(HttpVouchersService::new(api.clone())),
            orders: Arc::new(HttpOrdersService::new(api.clone())),
            catalog: Arc::new(HttpCatalogService::new(api)),
            cart_cache: Arc::new(CartCache::new()),
        })
    }
}
