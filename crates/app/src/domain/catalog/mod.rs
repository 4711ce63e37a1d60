//! Catalog and back-office resources

pub mod models;
pub mod service;

pub use service::*;
