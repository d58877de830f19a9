//! Borrowing lifecycle rules.
//!
//! A borrowing is [`BorrowingState::Active`] until its `actual_return_date`
//! is stamped, after which it is [`BorrowingState::Returned`] for good. The
//! repository enforces the same rules atomically in SQL; these functions let
//! handlers reject bad requests with a precise error before touching the
//! database.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Date;

/// Message returned when a return is attempted on a returned borrowing.
pub const ALREADY_RETURNED: &str = "This book has already been returned";

/// Message returned when a book has no copies left to lend.
pub const OUT_OF_STOCK: &str = "This book is currently not available for borrowing";

/// Message returned when the due date does not follow the borrow date.
pub const DUE_DATE_NOT_AFTER_BORROW: &str =
    "Expected return date should be later than borrow date";

/// The two states of a borrowing. `Active -> Returned` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorrowingState {
    Active,
    Returned,
}

impl BorrowingState {
    /// Derive the state from the nullable `actual_return_date` column.
    pub fn from_return_date(actual_return_date: Option<Date>) -> Self {
        match actual_return_date {
            None => BorrowingState::Active,
            Some(_) => BorrowingState::Returned,
        }
    }

    pub fn is_active(self) -> bool {
        self == BorrowingState::Active
    }
}

/// Today's date in UTC. Borrow and return dates are stamped from this.
pub fn today() -> Date {
    chrono::Utc::now().date_naive()
}

/// The expected return date must be strictly later than the borrow date.
pub fn validate_expected_return_date(
    expected_return_date: Date,
    borrow_date: Date,
) -> Result<(), CoreError> {
    if expected_return_date <= borrow_date {
        return Err(CoreError::invalid_field(
            "expected_return_date",
            DUE_DATE_NOT_AFTER_BORROW,
        ));
    }
    Ok(())
}

/// A book can only be lent while at least one copy is on the shelf.
pub fn ensure_available(inventory: i32) -> Result<(), CoreError> {
    if inventory <= 0 {
        return Err(CoreError::invalid_field("book", OUT_OF_STOCK));
    }
    Ok(())
}

/// Decide the return date to stamp on a borrowing.
///
/// Fails if the borrowing was already returned. The stamped date never
/// precedes `borrow_date`, even if the clock has gone backwards.
pub fn plan_return(
    actual_return_date: Option<Date>,
    borrow_date: Date,
    today: Date,
) -> Result<Date, CoreError> {
    if !BorrowingState::from_return_date(actual_return_date).is_active() {
        return Err(CoreError::InvalidTransition(ALREADY_RETURNED.to_string()));
    }
    Ok(today.max(borrow_date))
}

/// Parse the `is_active` query parameter.
///
/// `"true"` / `"false"` (any case) select active / returned borrowings.
/// Anything else means "no filter".
pub fn parse_is_active(raw: Option<&str>) -> Option<bool> {
    match raw?.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
