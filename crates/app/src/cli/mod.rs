use clap::{Parser, Subcommand};
use pizzeria_app::{
    api::ApiError,
    auth::{Session, SessionStore},
    config::ClientConfig,
    context::AppContext,
    notice::{Locale, Notice},
};

mod admin;
mod auth;
mod cart;
mod checkout;
mod errors;
mod menu;
mod orders;
mod tables;
mod voucher;

pub(crate) use errors::CliError;

#[derive(Debug, Parser)]
#[command(name = "pizzeria-app", about = "Pizzeria storefront client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login(auth::LoginArgs),
    /// Forget the stored session
    Logout,
    /// Browse the menu
    Menu(menu::MenuArgs),
    /// View and change the cart
    Cart(cart::CartCommand),
    /// Apply or remove a voucher
    Voucher(voucher::VoucherCommand),
    /// Review the payment summary and place the order
    Checkout(checkout::CheckoutCommand),
    /// Order history and tracking
    Orders(orders::OrdersCommand),
    /// Back-office lists, deletes and order status
    Admin(admin::AdminCommand),
}

/// What every command needs once configuration is resolved.
pub(crate) struct Runtime {
    pub(crate) context: AppContext,
    pub(crate) store: SessionStore,
    pub(crate) config: ClientConfig,
}

impl Runtime {
    pub(crate) fn session(&self) -> Result<Session, CliError> {
        Ok(self.store.load()?.ok_or(ApiError::Unauthenticated)?)
    }

    pub(crate) fn locale(&self) -> Locale {
        self.config.storefront.locale
    }

    pub(crate) fn say(&self, notice: &Notice) {
        println!("{}", notice.text(self.locale()));
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        let context = AppContext::from_api_config(&self.config.api.api_config())?;
        let store = self.config.session_store();

        let runtime = Runtime {
            context,
            store,
            config: self.config,
        };

        match self.command {
            Commands::Login(args) => auth::login(&runtime, args).await,
            Commands::Logout => auth::logout(&runtime),
            Commands::Menu(args) => menu::run(&runtime, args).await,
            Commands::Cart(command) => cart::run(&runtime, command).await,
            Commands::Voucher(command) => voucher::run(&runtime, command).await,
            Commands::Checkout(command) => checkout::run(&runtime, command).await,
            Commands::Orders(command) => orders::run(&runtime, command).await,
            Commands::Admin(command) => admin::run(&runtime, command).await,
        }
    }
}
