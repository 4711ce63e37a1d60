use std::io::{self, Write};

use clap::{Args, Subcommand};
use pizzeria::render::{write_cart, write_summary};
use pizzeria_app::{domain::orders::models::OrderId, flows::Checkout, notice::Notice};

use super::{CliError, Runtime};

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct CheckoutCommand {
    #[command(subcommand)]
    command: Option<CheckoutSubcommand>,

    /// Delivery address
    #[arg(long)]
    address: Option<String>,

    /// Place the order after showing the summary
    #[arg(long, requires = "address")]
    place: bool,
}

#[derive(Debug, Subcommand)]
enum CheckoutSubcommand {
    /// Attach the address to an order created without one
    RetryAddress {
        order: OrderId,

        #[arg(long)]
        address: String,
    },
}

pub(crate) fn checkout(runtime: &Runtime) -> Checkout {
    Checkout::new(
        runtime.context.carts.clone(),
        runtime.context.vouchers.clone(),
        runtime.context.orders.clone(),
        runtime.context.cart_cache.clone(),
        runtime.config.storefront.delivery_fee(),
    )
}

pub(crate) async fn run(runtime: &Runtime, command: CheckoutCommand) -> Result<(), CliError> {
    let session = runtime.session()?;
    let mut checkout = checkout(runtime);

    if let Some(CheckoutSubcommand::RetryAddress { order, address }) = command.command {
        let placed = checkout.retry_address(&session, order, &address).await?;

        runtime.say(&Notice::OrderPlaced {
            order_id: placed.order_id,
        });

        return Ok(());
    }

    let summary = checkout.load(&session).await?;
    let cart = checkout.cart()?;
    let voucher = cart.applied_voucher().map(ToString::to_string);

    {
        let mut out = io::stdout().lock();

        write_cart(&mut out, &cart.lines()?)?;
        writeln!(out)?;
        write_summary(&mut out, &summary, voucher.as_deref())?;
    }

    if let Some(address) = command.address.filter(|_| command.place) {
        let placed = checkout.place_order(&session, &address).await?;

        runtime.say(&Notice::OrderPlaced {
            order_id: placed.order_id,
        });
    }

    Ok(())
}
