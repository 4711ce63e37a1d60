//! Authentication

mod service;
mod session;
mod store;

pub use service::*;
pub use session::*;
pub use store::*;
