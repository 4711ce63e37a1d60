use std::io;

use clap::{Args, Subcommand};
use pizzeria::{
    carts::{Quantity, Step},
    render::write_cart,
};
use pizzeria_app::{
    auth::Session,
    domain::{
        carts::models::{Cart, CartItemId},
        catalog::models::ProductId,
    },
    flows::{CartView, StepOutcome},
    notice::Notice,
};

use super::{CliError, Runtime};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its running total
    Show,
    /// Add a product
    Add(AddArgs),
    /// Increase a line's quantity by one
    Inc(LineArgs),
    /// Decrease a line's quantity by one, never below 1
    Dec(LineArgs),
    /// Set a line's quantity
    Set(SetArgs),
    /// Remove a line
    Remove(LineArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id from the menu
    product: ProductId,

    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Size, e.g. S, M or L
    #[arg(long, default_value = "M")]
    size: String,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Line number as shown by `cart show`
    line: usize,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Line number as shown by `cart show`
    line: usize,

    quantity: u32,
}

pub(crate) async fn run(runtime: &Runtime, command: CartCommand) -> Result<(), CliError> {
    let session = runtime.session()?;
    let mut view = CartView::new(
        runtime.context.carts.clone(),
        runtime.context.cart_cache.clone(),
    );

    let opened = view.open(&session).await?;

    let cart = match command.command {
        CartSubcommand::Show => opened,
        CartSubcommand::Add(args) => {
            let cart = view
                .add(
                    &session,
                    args.product,
                    Quantity::try_from(args.quantity)?,
                    args.size,
                )
                .await?;
            runtime.say(&Notice::AddedToCart);
            cart
        }
        CartSubcommand::Inc(args) => {
            step(
                runtime,
                &view,
                &session,
                &opened,
                args.line,
                Step::Increment,
            )
            .await?
        }
        CartSubcommand::Dec(args) => {
            step(
                runtime,
                &view,
                &session,
                &opened,
                args.line,
                Step::Decrement,
            )
            .await?
        }
        CartSubcommand::Set(args) => {
            let item = line_item(&opened, args.line)?;
            let cart = view
                .set_quantity(&session, item, Quantity::try_from(args.quantity)?)
                .await?;
            runtime.say(&Notice::CartUpdated);
            cart
        }
        CartSubcommand::Remove(args) => {
            let item = line_item(&opened, args.line)?;
            let cart = view.remove(&session, item).await?;
            runtime.say(&Notice::ProductRemoved);
            cart
        }
    };

    write_cart(io::stdout().lock(), &cart.lines()?)?;

    Ok(())
}

async fn step(
    runtime: &Runtime,
    view: &CartView,
    session: &Session,
    opened: &Cart,
    line: usize,
    step: Step,
) -> Result<Cart, CliError> {
    let item = line_item(opened, line)?;

    match view.step(session, item, step).await? {
        StepOutcome::Updated(cart) => {
            runtime.say(&Notice::CartUpdated);
            Ok(cart)
        }
        StepOutcome::Unchanged => Ok(opened.clone()),
    }
}

/// Lines are numbered from 1 in the order the server lists them.
fn line_item(cart: &Cart, line: usize) -> Result<CartItemId, CliError> {
    line.checked_sub(1)
        .and_then(|idx| cart.items.get(idx))
        .map(|item| item.cart_item_id)
        .ok_or(CliError::NoSuchLine(line))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn cart() -> Result<Cart, serde_json::Error> {
        serde_json::from_value(serde_json::json!({
            "items": [
                {"cart_item_id": 10, "Product_Name": "Hawaiian", "price_per_item": 100_000,
                 "quantity": 1, "size": "M", "total_price": 100_000},
                {"cart_item_id": 20, "Product_Name": "Coke", "price_per_item": 15_000,
                 "quantity": 2, "size": "", "total_price": 30_000}
            ],
            "subTotal": 130_000
        }))
    }

    #[test]
    fn lines_are_numbered_from_one() -> TestResult {
        let cart = cart()?;

        assert_eq!(line_item(&cart, 1)?, CartItemId::new(10));
        assert_eq!(line_item(&cart, 2)?, CartItemId::new(20));
        assert_eq!(cart.sub_total, Decimal::from(130_000));

        Ok(())
    }

    #[test]
    fn out_of_range_lines_are_rejected() -> TestResult {
        let cart = cart()?;

        for line in [0, 3] {
            assert!(
                matches!(line_item(&cart, line), Err(CliError::NoSuchLine(n)) if n == line),
                "line {line} should not resolve"
            );
        }

        Ok(())
    }
}
