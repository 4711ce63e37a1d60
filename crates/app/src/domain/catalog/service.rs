//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Method, RequestBuilder};
use tracing::info;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    domain::catalog::models::{Product, Record, RecordId, Resource},
};

#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    api: ApiClient,
}

impl HttpCatalogService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn list_request(&self, session: &Session, resource: Resource) -> RequestBuilder {
        self.api.authed(Method::GET, &resource.list_path(), session)
    }

    fn delete_request(
        &self,
        session: &Session,
        resource: Resource,
        id: RecordId,
    ) -> RequestBuilder {
        self.api
            .authed(Method::DELETE, &resource.delete_path(), session)
            .query(&[("id", id.get())])
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list_products(&self, session: &Session) -> Result<Vec<Product>, ApiError> {
        self.api
            .json(self.list_request(session, Resource::Product))
            .await
    }

    async fn list(&self, session: &Session, resource: Resource) -> Result<Vec<Record>, ApiError> {
        self.api.json(self.list_request(session, resource)).await
    }

    async fn delete(
        &self,
        session: &Session,
        resource: Resource,
        id: RecordId,
    ) -> Result<(), ApiError> {
        self.api
            .message(self.delete_request(session, resource, id))
            .await?;

        info!(%resource, %id, "record deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// The product menu.
    async fn list_products(&self, session: &Session) -> Result<Vec<Product>, ApiError>;

    /// Every row of a back-office resource.
    async fn list(&self, session: &Session, resource: Resource) -> Result<Vec<Record>, ApiError>;

    /// Delete one row. Any 2xx answer counts as success.
    async fn delete(
        &self,
        session: &Session,
        resource: Resource,
        id: RecordId,
    ) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{api_client, session};

    use super::*;

    #[test]
    fn lists_hit_get_all() -> TestResult {
        let service = HttpCatalogService::new(api_client()?);

        let products = service.list_request(&session(), Resource::Product).build()?;
        let vouchers = service.list_request(&session(), Resource::Voucher).build()?;

        assert_eq!(products.method(), Method::GET);
        assert_eq!(products.url().path(), "/product/getAll");
        assert_eq!(vouchers.url().path(), "/voucher/getAll");
        assert_eq!(
            vouchers
                .headers()
                .get("token")
                .map(reqwest::header::HeaderValue::to_str)
                .transpose()?,
            Some("test-token")
        );

        Ok(())
    }

    #[test]
    fn delete_targets_resource_and_id() -> TestResult {
        let service = HttpCatalogService::new(api_client()?);

        let request = service
            .delete_request(&session(), Resource::Supplier, RecordId::new(8))
            .build()?;

        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.url().path(), "/supplier/delete");
        assert_eq!(request.url().query(), Some("id=8"));

        Ok(())
    }
}
