//! Tables for listings the core crate does not render.

use std::io;

use pizzeria::{money::format_dong, render::progress_line};
use pizzeria_app::domain::{
    catalog::models::{Product, Record},
    orders::models::Order,
};
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use super::CliError;

fn finish(builder: Builder) -> Table {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    table
}

pub(crate) fn write_products(
    mut out: impl io::Write,
    products: &[Product],
) -> Result<(), CliError> {
    if products.is_empty() {
        writeln!(out, "No products.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Category", "Price"]);

    for product in products {
        builder.push_record([
            product.product_id.to_string(),
            product.product_name.clone(),
            product.category.clone().unwrap_or_default(),
            format_dong(&product.price()?),
        ]);
    }

    let mut table = finish(builder);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

pub(crate) fn write_orders(mut out: impl io::Write, orders: &[Order]) -> Result<(), CliError> {
    if orders.is_empty() {
        writeln!(out, "No orders yet.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Placed", "Progress", "Total", "Address"]);

    for order in orders {
        builder.push_record([
            format!("#{}", order.order_id),
            order.order_date.to_string(),
            progress_line(order.status),
            format_dong(&order.amount_due()?),
            order.address.clone().unwrap_or_default(),
        ]);
    }

    let mut table = finish(builder);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Columns are the union of every record's fields. The first record's fields
/// come in key order; fields only later records carry are appended after them.
pub(crate) fn write_records(mut out: impl io::Write, records: &[Record]) -> Result<(), CliError> {
    if records.is_empty() {
        writeln!(out, "No records.")?;

        return Ok(());
    }

    let mut columns: Vec<&str> = Vec::new();

    for column in records.iter().flat_map(Record::columns) {
        if !columns.contains(&column) {
            columns.push(column);
        }
    }

    let mut builder = Builder::default();

    builder.push_record(columns.iter().copied());

    for record in records {
        builder.push_record(columns.iter().map(|column| record.display(column)));
    }

    writeln!(out, "{}", finish(builder))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pizzeria::orders::OrderStatus;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn orders_show_progress_and_amount() -> TestResult {
        let order: Order = serde_json::from_str(
            r#"{"order_id": 4, "order_date": "2024-05-01 12:30:00", "status": "Pending",
                "OrderTotal": 250000, "address": "12 Lê Lợi"}"#,
        )?;

        let mut out = Vec::new();
        write_orders(&mut out, &[order])?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("#4"), "missing order id: {rendered}");
        assert!(rendered.contains("250,000đ"), "missing total: {rendered}");
        assert!(
            rendered.contains(&progress_line(OrderStatus::Pending)),
            "missing progress: {rendered}"
        );

        Ok(())
    }

    #[test]
    fn records_use_union_of_columns() -> TestResult {
        let records: Vec<Record> = serde_json::from_str(
            r#"[{"Supplier_ID": 1, "Name": "Dalat Farm"}, {"Supplier_ID": 2, "Phone": "0909"}]"#,
        )?;

        let mut out = Vec::new();
        write_records(&mut out, &records)?;
        let rendered = String::from_utf8(out)?;

        for header in ["Supplier_ID", "Name", "Phone", "Dalat Farm", "0909"] {
            assert!(rendered.contains(header), "missing {header}: {rendered}");
        }

        let header_line = rendered.lines().nth(1).ok_or("table should have a header")?;
        let position = |name: &str| header_line.find(name);

        assert!(
            position("Name") < position("Supplier_ID"),
            "key order: {header_line}"
        );
        assert!(
            position("Supplier_ID") < position("Phone"),
            "appended last: {header_line}"
        );

        Ok(())
    }

    #[test]
    fn empty_lists_say_so() -> TestResult {
        let mut out = Vec::new();
        write_products(&mut out, &[])?;

        assert_eq!(String::from_utf8(out)?, "No products.\n");

        Ok(())
    }
}
