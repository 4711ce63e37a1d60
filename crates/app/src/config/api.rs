//! API Config

use std::time::Duration;

use clap::Args;

use crate::api::ApiConfig;

/// Backend connection settings.
#[derive(Debug, Args)]
pub struct ApiSettings {
    /// Storefront API root
    #[arg(
        long,
        env = "PIZZERIA_API_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "PIZZERIA_REQUEST_TIMEOUT_SECS",
        default_value_t = 30,
        global = true
    )]
    pub request_timeout_secs: u64,
}

impl ApiSettings {
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
