//! Typed acknowledgements.
//!
//! Some endpoints report success only through the text of a `message` field.
//! The exact texts live here and nowhere else; callers match on [`Ack`].

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// A `{ "message": ..., "code": ... }` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    /// Human-readable text.
    #[serde(default)]
    pub message: String,

    /// Machine-readable code, for servers that send one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ServerMessage {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Classify this body.
    ///
    /// A recognised `code` wins. Otherwise the message must equal a known
    /// acknowledgement text byte for byte.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        let by_code = self
            .code
            .as_deref()
            .and_then(|code| Ack::ALL.into_iter().find(|ack| ack.code() == code));

        let by_text = || {
            Ack::ALL
                .into_iter()
                .find(|ack| ack.message() == self.message)
        };

        match by_code.or_else(by_text) {
            Some(ack) => Outcome::Success(ack),
            None => Outcome::Rejected {
                message: self.message.clone(),
            },
        }
    }
}

/// Acknowledgements the server sends on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// A cart line was deleted.
    ProductRemoved,

    /// An order was cancelled.
    OrderCancelled,
}

impl Ack {
    pub const ALL: [Self; 2] = [Self::ProductRemoved, Self::OrderCancelled];

    /// Exact success text the server sends.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ProductRemoved => "Product removed from cart",
            Self::OrderCancelled => "Order cancelled successfully",
        }
    }

    /// Machine-readable equivalent.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ProductRemoved => "PRODUCT_REMOVED",
            Self::OrderCancelled => "ORDER_CANCELLED",
        }
    }
}

/// Result of classifying a 2xx message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server confirmed the action.
    Success(Ack),

    /// Anything else, including 2xx bodies with different wording.
    Rejected { message: String },
}

impl Outcome {
    /// Require a specific acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for any other outcome.
    pub fn expect_ack(self, expected: Ack) -> Result<(), ApiError> {
        match self {
            Self::Success(ack) if ack == expected => Ok(()),
            Self::Success(ack) => Err(ApiError::Rejected {
                message: ack.message().to_string(),
            }),
            Self::Rejected { message } => Err(ApiError::Rejected { message }),
        }
    }
}
