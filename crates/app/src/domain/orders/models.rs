//! Order Models

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil, tz::TimeZone};
use pizzeria::{
    carts::Quantity,
    money::{AmountError, Dong, from_decimal},
    orders::OrderStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use thiserror::Error;

use crate::{domain::customers::CustomerId, ids::TypedId};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Order Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,

    #[serde(default)]
    pub customer_id: Option<CustomerId>,

    #[serde(default)]
    pub address: Option<String>,

    pub order_date: OrderDate,

    pub status: OrderStatus,

    #[serde(rename = "OrderTotal", default)]
    pub order_total: Decimal,

    #[serde(rename = "finalPrice", default)]
    pub final_price: Option<Decimal>,

    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Amount charged: the final price when present, otherwise the order total.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount cannot be represented in whole đồng.
    pub fn amount_due(&self) -> Result<Dong, AmountError> {
        from_decimal(self.final_price.unwrap_or(self.order_total))
    }
}

/// Order line as echoed back by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(alias = "Product_Name")]
    pub product_name: String,

    pub quantity: Quantity,

    #[serde(default)]
    pub size: String,

    #[serde(default, alias = "price_per_item")]
    pub price: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised order date: {0}")]
pub struct OrderDateError(String);

/// When an order was placed.
///
/// Accepts RFC 3339 timestamps as well as offset-less `YYYY-MM-DD HH:MM:SS`
/// and `YYYY-MM-DD` values, which are read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderDate(Timestamp);

impl FromStr for OrderDate {
    type Err = OrderDateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if let Ok(timestamp) = value.parse::<Timestamp>() {
            return Ok(Self(timestamp));
        }

        let parsed = value
            .parse::<civil::DateTime>()
            .or_else(|_err| {
                value
                    .parse::<civil::Date>()
                    .map(|date| date.to_datetime(civil::Time::midnight()))
            });

        parsed
            .and_then(|datetime| datetime.to_zoned(TimeZone::UTC))
            .map(|zoned| Self(zoned.timestamp()))
            .map_err(|_err| OrderDateError(value.to_string()))
    }
}

impl fmt::Display for OrderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y-%m-%d %H:%M"))
    }
}

impl Serialize for OrderDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OrderDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        raw.parse().map_err(D::Error::custom)
    }
}
