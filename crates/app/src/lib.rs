//! Pizzeria storefront client: HTTP services, view flows and configuration.

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod flows;
pub mod ids;
pub mod notice;
pub mod observability;
pub mod outcome;

#[cfg(test)]
mod test;
