//! Carts

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CartPricingError;
pub use service::*;
