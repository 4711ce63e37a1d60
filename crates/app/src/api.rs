//! HTTP client for the storefront REST API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{auth::Session, outcome::ServerMessage};

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

/// Longest slice of an unexpected body kept in error messages.
const BODY_EXCERPT_CHARS: usize = 200;

/// Connection settings for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API root, e.g. `"http://localhost:8080"`.
    pub base_url: String,

    /// Upper bound on a single request, connect to last byte.
    pub timeout: Duration,
}

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connection, TLS or timeout failure.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// The server answered 2xx but without the acknowledgement the call needs.
    #[error("server did not confirm the request: {message}")]
    Rejected { message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response body")]
    Decode(#[source] serde_json::Error),

    /// The call needs a signed-in session.
    #[error("not signed in")]
    Unauthenticated,
}

/// Thin wrapper over `reqwest` that knows the API root and the token header.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Start an unauthenticated request.
    pub fn public(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");

        self.http.request(method, self.url(path))
    }

    /// Start a request carrying the session token.
    pub fn authed(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        self.public(method, path)
            .header(TOKEN_HEADER, session.token().expose())
    }

    /// Send a request and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an unexpected body.
    pub async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.execute(request).await?;

        decode_body(status, &body)
    }

    /// Send a request whose body, if any, is a `{ "message": ... }` payload.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn message(&self, request: RequestBuilder) -> Result<ServerMessage, ApiError> {
        let (status, body) = self.execute(request).await?;

        decode_message(status, &body)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await.inspect_err(|error| {
            warn!("api request failed: {error}");
        })?;

        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), "api response");

        Ok((status, body))
    }
}

/// Decode a JSON body, turning non-2xx statuses into [`ApiError::Status`].
///
/// # Errors
///
/// Returns [`ApiError::Status`] for non-2xx statuses and [`ApiError::Decode`] for bodies
/// of the wrong shape.
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    ensure_success(status, body)?;

    serde_json::from_str(body).map_err(|error| {
        warn!(body = %excerpt(body), "could not decode api response: {error}");

        ApiError::Decode(error)
    })
}

/// Decode a message body. An empty or non-JSON 2xx body yields an empty message,
/// which never matches an acknowledgement.
///
/// # Errors
///
/// Returns [`ApiError::Status`] for non-2xx statuses.
pub fn decode_message(status: StatusCode, body: &str) -> Result<ServerMessage, ApiError> {
    ensure_success(status, body)?;

    Ok(serde_json::from_str(body).unwrap_or_default())
}

fn ensure_success(status: StatusCode, body: &str) -> Result<(), ApiError> {
    if status.is_success() {
        return Ok(());
    }

    let message = serde_json::from_str::<ServerMessage>(body)
        .ok()
        .map(|parsed| parsed.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| excerpt(body));

    warn!(status = status.as_u16(), %message, "api request rejected");

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
