//! Catalog Models

use std::fmt;

use clap::ValueEnum;
use pizzeria::money::{AmountError, Dong, from_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Record Id
pub type RecordId = TypedId<Record>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "Product_ID", alias = "id")]
    pub product_id: ProductId,

    #[serde(alias = "Product_Name", alias = "name")]
    pub product_name: String,

    #[serde(default, alias = "Category")]
    pub category: Option<String>,

    #[serde(default, alias = "Price")]
    pub price: Decimal,

    #[serde(default, alias = "Description")]
    pub description: Option<String>,
}

impl Product {
    /// List price in đồng.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be represented in whole đồng.
    pub fn price(&self) -> Result<Dong, AmountError> {
        from_decimal(self.price)
    }

    /// Whether this product sits in `category`, ignoring case and surrounding spaces.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(category.trim()))
    }
}

/// Products in `category`, or all of them when no category is given.
#[must_use]
pub fn filter_by_category(products: Vec<Product>, category: Option<&str>) -> Vec<Product> {
    match category {
        Some(category) => products
            .into_iter()
            .filter(|product| product.in_category(category))
            .collect(),
        None => products,
    }
}

/// Back-office resources that share the `getAll`/`delete` endpoint shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Resource {
    Product,
    Ingredient,
    Supplier,
    Employee,
    Customer,
    Voucher,
}

impl Resource {
    /// Path segment, e.g. `ingredient` in `/ingredient/getAll`.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Ingredient => "ingredient",
            Self::Supplier => "supplier",
            Self::Employee => "employee",
            Self::Customer => "customer",
            Self::Voucher => "voucher",
        }
    }

    #[must_use]
    pub fn list_path(self) -> String {
        format!("/{}/getAll", self.segment())
    }

    #[must_use]
    pub fn delete_path(self) -> String {
        format!("/{}/delete", self.segment())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A back-office row, kept as the server sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Field names.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// A field rendered for display. Strings lose their quotes, nulls become blank.
    #[must_use]
    pub fn display(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(name: &str, category: Option<&str>) -> Product {
        Product {
            product_id: ProductId::new(1),
            product_name: name.to_string(),
            category: category.map(str::to_string),
            price: Decimal::from(100_000),
            description: None,
        }
    }

    #[test]
    fn product_accepts_backend_names() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{"Product_ID": "3", "Product_Name": "Margherita", "Category": "Pizza", "Price": "89000.00"}"#,
        )?;

        assert_eq!(product.product_id, ProductId::new(3));
        assert_eq!(product.price()?, pizzeria::money::dong(89_000));

        Ok(())
    }

    #[test]
    fn category_filter_ignores_case() {
        let products = vec![
            product("Margherita", Some("Pizza")),
            product("Coke", Some("Drinks")),
            product("Mystery", None),
        ];

        let pizzas = filter_by_category(products.clone(), Some(" pizza"));

        assert_eq!(pizzas.len(), 1);
        assert_eq!(filter_by_category(products, None).len(), 3);
    }

    #[test]
    fn resource_paths() {
        assert_eq!(Resource::Ingredient.list_path(), "/ingredient/getAll");
        assert_eq!(Resource::Voucher.delete_path(), "/voucher/delete");
    }

    #[test]
    fn record_display_strips_quotes() -> TestResult {
        let record: Record =
            serde_json::from_str(r#"{"Supplier_Name": "Dalat Farm", "Phone": null, "Rating": 4}"#)?;

        assert_eq!(record.display("Supplier_Name"), "Dalat Farm");
        assert_eq!(record.display("Phone"), "");
        assert_eq!(record.display("Rating"), "4");
        assert_eq!(record.display("Missing"), "");

        Ok(())
    }
}
