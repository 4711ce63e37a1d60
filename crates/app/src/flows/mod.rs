//! View flows
//!
//! Each flow owns the state one screen needs and talks to the services
//! behind trait objects, so tests can drive them with mocks.

pub mod cache;
pub mod cart;
pub mod checkout;
pub mod history;

pub use cache::CartCache;
pub use cart::{CartView, CartViewError, StepOutcome};
pub use checkout::{Checkout, CheckoutError, PlacedOrder};
pub use history::{HistoryError, OrderHistory, OrderScope};
