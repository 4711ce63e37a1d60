use std::io;

use pizzeria::{carts::ZeroQuantity, money::AmountError, render::RenderError};
use pizzeria_app::{
    api::ApiError,
    auth::SessionStoreError,
    context::AppInitError,
    domain::carts::CartPricingError,
    flows::{CartViewError, CheckoutError, HistoryError},
    notice::Notice,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Init(#[from] AppInitError),

    #[error(transparent)]
    Session(#[from] SessionStoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cart(#[from] CartViewError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Pricing(#[from] CartPricingError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Quantity(#[from] ZeroQuantity),

    #[error("cart has no line #{0}")]
    NoSuchLine(usize),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("could not write output")]
    Output(#[from] io::Error),
}

impl CliError {
    /// What to tell the user. The error itself goes to the log.
    pub(crate) fn notice(&self) -> Notice {
        match self {
            Self::Api(error) => error.into(),
            Self::Cart(error) => error.into(),
            Self::Checkout(error) => error.into(),
            Self::History(error) => error.into(),
            Self::Quantity(_) => Notice::ZeroQuantity,
            Self::NoSuchLine(position) => Notice::NoSuchLine {
                position: *position,
            },
            Self::Init(_) => Notice::ServerUnreachable,
            Self::Session(_)
            | Self::Pricing(_)
            | Self::Amount(_)
            | Self::Render(_)
            | Self::Output(_) => Notice::RequestFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use pizzeria_app::domain::orders::models::OrderId;

    use super::*;

    #[test]
    fn orphaned_order_surfaces_its_id() {
        let error = CliError::from(CheckoutError::AttachAddress {
            order_id: OrderId::new(12),
            source: ApiError::Unauthenticated,
        });

        assert_eq!(
            error.notice(),
            Notice::AddressNotAttached {
                order_id: OrderId::new(12)
            }
        );
    }

    #[test]
    fn missing_session_asks_to_sign_in() {
        assert_eq!(
            CliError::from(ApiError::Unauthenticated).notice(),
            Notice::NotSignedIn
        );
    }
}
