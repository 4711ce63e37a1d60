use std::io;

use clap::{Args, Subcommand};
use pizzeria::orders::SortDirection;
use pizzeria_app::{
    domain::orders::models::OrderId,
    flows::{OrderHistory, OrderScope},
    notice::Notice,
};

use super::{CliError, Runtime, tables};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List your orders, newest first
    List {
        /// Oldest first instead
        #[arg(long)]
        oldest: bool,
    },
    /// Cancel an order that is still pending
    Cancel { order: OrderId },
}

pub(crate) async fn run(runtime: &Runtime, command: OrdersCommand) -> Result<(), CliError> {
    let session = runtime.session()?;
    let mut history = OrderHistory::new(runtime.context.orders.clone(), OrderScope::Customer);

    let orders = match command.command {
        OrdersSubcommand::List { oldest } => {
            let direction = if oldest {
                SortDirection::OldestFirst
            } else {
                SortDirection::NewestFirst
            };

            history.load(&session, direction).await?
        }
        OrdersSubcommand::Cancel { order } => {
            history.load(&session, SortDirection::default()).await?;

            let orders = history.cancel(&session, order).await?;
            runtime.say(&Notice::OrderCancelled);
            orders
        }
    };

    tables::write_orders(io::stdout().lock(), orders)
}
