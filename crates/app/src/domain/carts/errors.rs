//! Cart pricing errors.

use pizzeria::{checkout::SummaryError, money::AmountError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CartPricingError {
    #[error("cart amount is invalid")]
    Amount(#[from] AmountError),

    #[error("checkout summary could not be computed")]
    Summary(#[from] SummaryError),
}
