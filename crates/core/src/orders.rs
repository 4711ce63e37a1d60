//! Order status and tracking

use std::{cmp::Reverse, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order lifecycle state. Transitions belong to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet picked up by the kitchen.
    Pending,

    /// Being prepared or out for delivery.
    #[serde(rename = "In Progress")]
    InProgress,

    /// Handed to the customer.
    Delivered,

    /// Cancelled by the customer or staff. Terminal.
    Cancelled,
}

/// The three steps of the tracking bar, in order.
pub const ORDER_STEPS: [OrderStatus; 3] = [
    OrderStatus::Pending,
    OrderStatus::InProgress,
    OrderStatus::Delivered,
];

impl OrderStatus {
    /// Wire and display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Customers may only cancel orders the kitchen has not started.
    pub const fn can_cancel(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognised status text.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded: String = value
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" => Ok(Self::InProgress),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// Where an order sits on the tracking bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// On the bar at `index` of `of` steps.
    Step {
        /// Zero-based position in [`ORDER_STEPS`].
        index: usize,

        /// Number of steps on the bar.
        of: usize,
    },

    /// Off the bar entirely.
    Cancelled,
}

/// Maps a status onto the tracking bar.
pub fn progress(status: OrderStatus) -> Progress {
    ORDER_STEPS
        .iter()
        .position(|step| *step == status)
        .map_or(Progress::Cancelled, |index| Progress::Step {
            index,
            of: ORDER_STEPS.len(),
        })
}

/// Order history sort direction, by order date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Most recent first.
    #[default]
    NewestFirst,

    /// Oldest first.
    OldestFirst,
}

/// Sorts orders by the date `key` returns. The sort is stable, so orders placed
/// at the same instant keep the server's order.
pub fn sort_by_date<T, K, F>(orders: &mut [T], direction: SortDirection, key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    match direction {
        SortDirection::NewestFirst => orders.sort_by_key(|order| Reverse(key(order))),
        SortDirection::OldestFirst => orders.sort_by_key(key),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn steps_map_to_bar_positions() {
        assert_eq!(
            progress(OrderStatus::Pending),
            Progress::Step { index: 0, of: 3 }
        );
        assert_eq!(
            progress(OrderStatus::InProgress),
            Progress::Step { index: 1, of: 3 }
        );
        assert_eq!(
            progress(OrderStatus::Delivered),
            Progress::Step { index: 2, of: 3 }
        );
    }

    #[test]
    fn cancelled_is_off_the_bar() {
        assert_eq!(progress(OrderStatus::Cancelled), Progress::Cancelled);
    }

    #[test]
    fn only_pending_can_be_cancelled() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(!OrderStatus::InProgress.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
    }

    #[test]
    fn parses_loose_status_text() -> TestResult {
        assert_eq!(
            "In Progress".parse::<OrderStatus>()?,
            OrderStatus::InProgress
        );
        assert_eq!(
            "in-progress".parse::<OrderStatus>()?,
            OrderStatus::InProgress
        );
        assert_eq!("canceled".parse::<OrderStatus>()?, OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn status_wire_names() -> TestResult {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress)?,
            r#""In Progress""#
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>(r#""Delivered""#)?,
            OrderStatus::Delivered
        );

        Ok(())
    }

    #[test]
    fn sorts_both_directions() {
        let mut orders = [(1, 20), (2, 10), (3, 30)];

        sort_by_date(&mut orders, SortDirection::NewestFirst, |(_, date)| *date);
        assert_eq!(orders.map(|(id, _)| id), [3, 1, 2]);

        sort_by_date(&mut orders, SortDirection::OldestFirst, |(_, date)| *date);
        assert_eq!(orders.map(|(id, _)| id), [2, 1, 3]);
    }
}
