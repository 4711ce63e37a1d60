//! Auth service.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    api::{ApiClient, ApiError},
    auth::{AuthToken, Session},
    domain::customers::CustomerId,
};

/// Login form.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken")]
    token: String,

    #[serde(default, alias = "customerId")]
    customer_id: Option<CustomerId>,

    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn login_request(&self, credentials: &Credentials) -> RequestBuilder {
        self.api
            .public(Method::POST, "/userAuth/login")
            .json(credentials)
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: Credentials) -> Result<Session, ApiError> {
        let response: LoginResponse = self.api.json(self.login_request(&credentials)).await?;

        let token = AuthToken::new(response.token).map_err(|_empty| ApiError::Rejected {
            message: "login response carried an empty token".to_string(),
        })?;

        info!(username = %credentials.username, "signed in");

        Ok(Session::new(
            credentials.username,
            token,
            response.customer_id,
            response.role,
        ))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, credentials: Credentials) -> Result<Session, ApiError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::api_client;

    use super::*;

    #[test]
    fn login_posts_credentials_without_token() -> TestResult {
        let service = HttpAuthService::new(api_client()?);

        let request = service
            .login_request(&Credentials {
                username: "luigi".to_string(),
                password: "hunter2".to_string(),
            })
            .build()?;

        let body = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .ok_or("request should have a body")?;

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().path(), "/userAuth/login");
        assert!(request.headers().get("token").is_none());
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(body)?,
            serde_json::json!({"username": "luigi", "password": "hunter2"})
        );

        Ok(())
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "luigi".to_string(),
            password: "hunter2".to_string(),
        };

        let debug = format!("{credentials:?}");

        assert!(
            debug.contains("luigi"),
            "username should be visible: {debug}"
        );
        assert!(!debug.contains("hunter2"), "password leaked: {debug}");
    }

    #[test]
    fn login_response_accepts_camel_case() -> TestResult {
        let response: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"abc","customerId":"12","role":"customer"}"#)?;

        assert_eq!(response.token, "abc");
        assert_eq!(response.customer_id, Some(CustomerId::new(12)));

        Ok(())
    }
}
