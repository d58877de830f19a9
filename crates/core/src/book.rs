//! Book catalog rules: cover types and fee/inventory bounds.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Largest fee representable by the `NUMERIC(5,2)` column.
const MAX_DAILY_FEE_CENTS: i64 = 99_999;

/// Physical binding of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Cover {
    #[default]
    Hardcover,
    Softcover,
}

impl Cover {
    /// The value stored in `books.cover`.
    pub fn as_str(self) -> &'static str {
        match self {
            Cover::Hardcover => "HARDCOVER",
            Cover::Softcover => "SOFTCOVER",
        }
    }
}

impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cover {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HARDCOVER" => Ok(Cover::Hardcover),
            "SOFTCOVER" => Ok(Cover::Softcover),
            other => Err(CoreError::invalid_field(
                "cover",
                format!("Unknown cover '{other}'. Must be one of: HARDCOVER, SOFTCOVER"),
            )),
        }
    }
}

impl TryFrom<String> for Cover {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validate a daily fee: non-negative, at most two decimal places, and small
/// enough for `NUMERIC(5,2)`.
pub fn validate_daily_fee(fee: Decimal) -> Result<(), CoreError> {
    if fee.is_sign_negative() && !fee.is_zero() {
        return Err(CoreError::invalid_field(
            "daily_fee",
            "Daily fee must not be negative",
        ));
    }
    if fee.normalize().scale() > 2 {
        return Err(CoreError::invalid_field(
            "daily_fee",
            "Daily fee must have at most two decimal places",
        ));
    }
    if fee > Decimal::new(MAX_DAILY_FEE_CENTS, 2) {
        return Err(CoreError::invalid_field(
            "daily_fee",
            "Daily fee must not exceed 999.99",
        ));
    }
    Ok(())
}

/// Inventory is a count of copies on the shelf and can never be negative.
pub fn validate_inventory(inventory: i32) -> Result<(), CoreError> {
    if inventory < 0 {
        return Err(CoreError::invalid_field(
            "inventory",
            "Inventory must not be negative",
        ));
    }
    Ok(())
}
