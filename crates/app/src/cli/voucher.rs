use std::io;

use clap::{Args, Subcommand};
use pizzeria::render::write_summary;
use pizzeria_app::notice::Notice;

use super::{CliError, Runtime};

#[derive(Debug, Args)]
pub(crate) struct VoucherCommand {
    #[command(subcommand)]
    command: VoucherSubcommand,
}

#[derive(Debug, Subcommand)]
enum VoucherSubcommand {
    /// Apply a voucher code; a cart holds one voucher at a time
    Apply {
        code: String,
    },
    /// Remove the applied voucher
    Remove,
}

pub(crate) async fn run(runtime: &Runtime, command: VoucherCommand) -> Result<(), CliError> {
    let session = runtime.session()?;
    let mut checkout = super::checkout::checkout(runtime);

    checkout.load(&session).await?;

    let summary = match command.command {
        VoucherSubcommand::Apply { code } => {
            let summary = checkout.apply_voucher(&session, &code).await?;
            runtime.say(&Notice::VoucherApplied);
            summary
        }
        VoucherSubcommand::Remove => {
            let summary = checkout.remove_voucher(&session).await?;
            runtime.say(&Notice::VoucherRemoved);
            summary
        }
    };

    let voucher = checkout.cart()?.applied_voucher().map(ToString::to_string);

    write_summary(io::stdout().lock(), &summary, voucher.as_deref())?;

    Ok(())
}
