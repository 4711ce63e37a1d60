//! Signed-in session state, passed explicitly to every authenticated call.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

use crate::domain::customers::CustomerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session token is empty")]
    EmptyToken,
}

/// Opaque token issued by `/userAuth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for an empty or whitespace token.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionError> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }

        Ok(Self(raw))
    }

    /// The raw token, for the request header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AuthToken {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0.clone()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(**redacted**)")?;
        Ok(())
    }
}

impl Drop for AuthToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Who is signed in and how to prove it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    username: String,
    token: AuthToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    customer_id: Option<CustomerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        token: AuthToken,
        customer_id: Option<CustomerId>,
        role: Option<String>,
    ) -> Self {
        Self {
            username: username.into(),
            token,
            customer_id,
            role,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Present for customer accounts; staff accounts have none.
    #[must_use]
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}
