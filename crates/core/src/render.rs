//! Terminal rendering for carts, checkout summaries and order progress.

use std::io;

use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    carts::{CartLine, running_total},
    checkout::CheckoutSummary,
    money::{AmountError, format_dong},
    orders::{ORDER_STEPS, OrderStatus, Progress, progress},
};

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The cart total could not be computed.
    #[error(transparent)]
    Total(#[from] AmountError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes the cart sidebar: one row per line, then the running total.
///
/// # Errors
///
/// Returns an error if the total cannot be computed or the output cannot be written.
pub fn write_cart(mut out: impl io::Write, lines: &[CartLine]) -> Result<(), RenderError> {
    if lines.is_empty() {
        return writeln!(out, "Your cart is empty.").map_err(|_err| RenderError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Size", "Price", "Qty", "Total"]);

    for (idx, line) in lines.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.name.clone(),
            line.size.clone(),
            format_dong(&line.unit_price),
            line.quantity.to_string(),
            format_dong(&line.total_price),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    let total = running_total(lines)?;

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)?;
    writeln!(out, " \x1b[1mTotal:\x1b[0m {}", format_dong(&total))
        .map_err(|_err| RenderError::IO)
}

/// Writes the payment summary block.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_summary(
    mut out: impl io::Write,
    summary: &CheckoutSummary,
    voucher_label: Option<&str>,
) -> Result<(), RenderError> {
    let voucher_label = voucher_label.map_or_else(
        || " Voucher:".to_string(),
        |label| format!(" Voucher ({label}):"),
    );

    let rows: SmallVec<[(String, String); 5]> = SmallVec::from_buf([
        (" Subtotal:".to_string(), format_dong(&summary.subtotal())),
        (
            " Loyalty:".to_string(),
            format!("-{}", format_dong(&summary.loyalty_discount())),
        ),
        (
            voucher_label,
            format!("-{}", format_dong(&summary.voucher_discount())),
        ),
        (" Delivery:".to_string(), format_dong(&summary.delivery_fee())),
        (" Total:".to_string(), format_dong(&summary.final_total())),
    ]);

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, "{label:<label_width$} {value:>value_width$}")
            .map_err(|_err| RenderError::IO)?;
    }

    Ok(())
}

/// One-line tracking bar, e.g. `● Pending ── ● In Progress ── ○ Delivered`.
pub fn progress_line(status: OrderStatus) -> String {
    match progress(status) {
        Progress::Cancelled => "✕ Cancelled".to_string(),
        Progress::Step { index, .. } => ORDER_STEPS
            .iter()
            .enumerate()
            .map(|(step_idx, step)| {
                let marker = if step_idx <= index { '●' } else { '○' };

                format!("{marker} {step}")
            })
            .collect::<Vec<_>>()
            .join(" ── "),
    }
}
