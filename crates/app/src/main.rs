//! Pizzeria Storefront CLI

use std::process::ExitCode;

use clap::Parser;
use pizzeria_app::observability::init_subscriber;
use tracing::error;

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let locale = cli.config.storefront.locale;

    if let Err(error) = init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("{}", error.notice().text(locale));

            ExitCode::FAILURE
        }
    }
}
