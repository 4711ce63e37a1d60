//! Storefront Config

use clap::Args;
use pizzeria::money::{Dong, dong};

use crate::notice::Locale;

/// Checkout and display settings.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Delivery fee added at checkout, in đồng
    #[arg(long, env = "PIZZERIA_DELIVERY_FEE", default_value_t = 0, global = true)]
    pub delivery_fee: i64,

    /// Language for user-facing messages
    #[arg(long, env = "PIZZERIA_LOCALE", value_enum, default_value_t = Locale::Vi, global = true)]
    pub locale: Locale,
}

impl StorefrontConfig {
    #[must_use]
    pub fn delivery_fee(&self) -> Dong {
        dong(self.delivery_fee)
    }
}
