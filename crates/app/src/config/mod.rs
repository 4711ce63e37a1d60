//! Client configuration

use std::path::PathBuf;

use clap::Args;

use crate::auth::SessionStore;

pub mod api;
pub mod logging;
pub mod storefront;

pub use api::ApiSettings;
pub use logging::{LogFormat, LoggingConfig};
pub use storefront::StorefrontConfig;

/// Settings shared by every command, read from flags or the environment.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Backend connection settings.
    #[command(flatten)]
    pub api: ApiSettings,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Checkout and display settings.
    #[command(flatten)]
    pub storefront: StorefrontConfig,

    /// Where the signed-in session is kept
    #[arg(long, env = "PIZZERIA_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Session store at the configured path, or the platform default.
    #[must_use]
    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(
            self.session_file
                .clone()
                .unwrap_or_else(SessionStore::default_path),
        )
    }
}
