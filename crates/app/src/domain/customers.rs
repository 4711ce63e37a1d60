//! Customers

use crate::ids::TypedId;

/// Customer account. Only its id travels through the storefront flows.
#[derive(Debug)]
pub struct Customer;

/// Customer Id
pub type CustomerId = TypedId<Customer>;
