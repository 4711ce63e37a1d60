use std::io;

use clap::{Args, Subcommand};
use pizzeria::orders::{OrderStatus, SortDirection};
use pizzeria_app::{
    domain::{
        catalog::models::{RecordId, Resource},
        orders::models::OrderId,
    },
    flows::{OrderHistory, OrderScope},
    notice::Notice,
};

use super::{CliError, Runtime, tables};

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// List every order, or move one to a new status
    Status {
        order: Option<OrderId>,

        /// Pending, "In Progress", Delivered or Cancelled
        #[arg(requires = "order")]
        status: Option<OrderStatus>,
    },
    /// List a back-office resource
    List { resource: Resource },
    /// Delete one row of a back-office resource
    Delete { resource: Resource, id: RecordId },
}

pub(crate) async fn run(runtime: &Runtime, command: AdminCommand) -> Result<(), CliError> {
    let session = runtime.session()?;

    match command.command {
        AdminSubcommand::Status { order, status } => {
            let mut history = OrderHistory::new(runtime.context.orders.clone(), OrderScope::All);

            let orders = match order.zip(status) {
                Some((order, status)) => {
                    let orders = history.update_status(&session, order, status).await?;
                    runtime.say(&Notice::StatusUpdated);
                    orders
                }
                None => history.load(&session, SortDirection::default()).await?,
            };

            tables::write_orders(io::stdout().lock(), orders)
        }
        AdminSubcommand::List { resource } => {
            let records = runtime.context.catalog.list(&session, resource).await?;

            tables::write_records(io::stdout().lock(), &records)
        }
        AdminSubcommand::Delete { resource, id } => {
            runtime.context.catalog.delete(&session, resource, id).await?;
            runtime.say(&Notice::RecordDeleted);

            Ok(())
        }
    }
}
