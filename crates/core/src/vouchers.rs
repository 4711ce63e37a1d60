//! Vouchers

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, percent_of_minor, percentage_from_points},
    money::{Dong, dong, from_decimal},
};

/// How a voucher's value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountType {
    /// `value` percent of the subtotal.
    Percent,

    /// `value` đồng off, whatever the subtotal.
    #[default]
    Fixed,
}

/// Voucher lifecycle state as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherStatus {
    /// Usable.
    Active,

    /// Disabled by staff.
    Inactive,

    /// Past its end date.
    Expired,

    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A voucher, either from the back-office list or as applied to a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    /// Code the customer types in.
    #[serde(rename = "Voucher_Code", default, deserialize_with = "null_as_default")]
    pub code: String,

    /// Percent or fixed.
    #[serde(rename = "Discount_Type", default, deserialize_with = "null_as_default")]
    pub discount_type: DiscountType,

    /// Percentage points or đồng, depending on `discount_type`.
    #[serde(rename = "Discount_Value", default, deserialize_with = "null_as_default")]
    pub value: Decimal,

    /// Lifecycle state, when the server includes it.
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VoucherStatus>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Voucher {
    /// A cart carries a voucher only when its code is non-empty.
    pub fn is_applied(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

impl fmt::Display for Voucher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.discount_type {
            DiscountType::Percent => write!(f, "{} (-{}%)", self.code, self.value.normalize()),
            DiscountType::Fixed => write!(f, "{} (-{}đ)", self.code, self.value.normalize()),
        }
    }
}

/// Local voucher rejections, raised before any request is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoucherError {
    /// The code was empty or whitespace.
    #[error("voucher code is empty")]
    EmptyCode,

    /// The cart already carries a voucher; it must be removed first.
    #[error("voucher {0} is already applied to this cart")]
    AlreadyApplied(String),
}

/// Computes the display discount for `voucher` against `subtotal`.
///
/// Percent vouchers take `subtotal * value / 100`, rounded half away from zero.
/// Fixed vouchers take `value` as-is; it is not clamped to the subtotal.
///
/// # Errors
///
/// Returns a [`DiscountError`] if the amount cannot be represented.
pub fn voucher_discount(voucher: &Voucher, subtotal: Dong) -> Result<Dong, DiscountError> {
    match voucher.discount_type {
        DiscountType::Percent => {
            let percent = percentage_from_points(voucher.value);

            Ok(dong(percent_of_minor(&percent, subtotal.to_minor_units())?))
        }
        DiscountType::Fixed => Ok(from_decimal(voucher.value)?),
    }
}

/// Trims a user-entered code and rejects blanks.
///
/// # Errors
///
/// Returns [`VoucherError::EmptyCode`] for an empty or whitespace-only code.
pub fn normalise_code(code: &str) -> Result<&str, VoucherError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(VoucherError::EmptyCode);
    }

    Ok(code)
}

/// Enforces one voucher per cart.
///
/// # Errors
///
/// Returns [`VoucherError::AlreadyApplied`] when `current` holds an applied voucher.
pub fn ensure_slot_free(current: Option<&Voucher>) -> Result<(), VoucherError> {
    match current {
        Some(voucher) if voucher.is_applied() => {
            Err(VoucherError::AlreadyApplied(voucher.code.clone()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn voucher(discount_type: DiscountType, value: i64) -> Voucher {
        Voucher {
            code: "PIZZA10".to_string(),
            discount_type,
            value: Decimal::from(value),
            status: Some(VoucherStatus::Active),
        }
    }

    #[test]
    fn percent_voucher_takes_share_of_subtotal() -> TestResult {
        let discount = voucher_discount(&voucher(DiscountType::Percent, 10), dong(200_000))?;

        assert_eq!(discount, dong(20_000));

        Ok(())
    }

    #[test]
    fn fixed_voucher_ignores_subtotal() -> TestResult {
        let fixed = voucher(DiscountType::Fixed, 30_000);

        assert_eq!(voucher_discount(&fixed, dong(200_000))?, dong(30_000));
        assert_eq!(voucher_discount(&fixed, dong(10_000))?, dong(30_000));

        Ok(())
    }

    #[test]
    fn blank_code_is_not_applied() {
        let mut blank = voucher(DiscountType::Fixed, 1);
        blank.code = "  ".to_string();

        assert!(!blank.is_applied());
        assert_eq!(ensure_slot_free(Some(&blank)), Ok(()));
    }

    #[test]
    fn applied_voucher_blocks_another() {
        let applied = voucher(DiscountType::Percent, 10);

        assert_eq!(
            ensure_slot_free(Some(&applied)),
            Err(VoucherError::AlreadyApplied("PIZZA10".to_string()))
        );
        assert_eq!(ensure_slot_free(None), Ok(()));
    }

    #[test]
    fn normalise_trims_and_rejects_blank() {
        assert_eq!(normalise_code("  SUMMER  "), Ok("SUMMER"));
        assert_eq!(normalise_code("\t"), Err(VoucherError::EmptyCode));
    }

    #[test]
    fn deserializes_wire_names() -> TestResult {
        let voucher: Voucher = serde_json::from_str(
            r#"{"Voucher_Code":"FREESHIP","Discount_Type":"Fixed","Discount_Value":"15000.00","Status":"Active"}"#,
        )?;

        assert_eq!(voucher.code, "FREESHIP");
        assert_eq!(voucher.discount_type, DiscountType::Fixed);
        assert_eq!(voucher_discount(&voucher, dong(0))?, dong(15_000));
        assert_eq!(voucher.status, Some(VoucherStatus::Active));

        Ok(())
    }

    #[test]
    fn null_fields_read_as_no_voucher() -> TestResult {
        let voucher: Voucher = serde_json::from_str(
            r#"{"Voucher_Code":null,"Discount_Type":null,"Discount_Value":null,"Status":null}"#,
        )?;

        assert!(!voucher.is_applied());
        assert_eq!(voucher.discount_type, DiscountType::Fixed);
        assert_eq!(voucher.value, Decimal::ZERO);
        assert_eq!(ensure_slot_free(Some(&voucher)), Ok(()));

        Ok(())
    }

    #[test]
    fn unknown_status_is_tolerated() -> TestResult {
        let voucher: Voucher = serde_json::from_str(
            r#"{"Voucher_Code":"X","Discount_Type":"Percent","Discount_Value":5,"Status":"Paused"}"#,
        )?;

        assert_eq!(voucher.status, Some(VoucherStatus::Unknown));

        Ok(())
    }
}
