use std::io;

use clap::Args;
use pizzeria_app::domain::catalog::models::filter_by_category;

use super::{CliError, Runtime, tables};

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Only show this category
    #[arg(long)]
    category: Option<String>,
}

pub(crate) async fn run(runtime: &Runtime, args: MenuArgs) -> Result<(), CliError> {
    let session = runtime.session()?;

    let products = runtime.context.catalog.list_products(&session).await?;
    let products = filter_by_category(products, args.category.as_deref());

    tables::write_products(io::stdout().lock(), &products)
}
