//! Borrowing entity model, DTOs and transition outcomes.

use libris_core::borrowing::BorrowingState;
use libris_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::book::BookSummary;

/// A borrowing row from the `borrowings` table.
///
/// `actual_return_date` is `None` while the book is still out.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Borrowing {
    pub id: DbId,
    pub borrow_date: Date,
    pub expected_return_date: Date,
    pub actual_return_date: Option<Date>,
    pub book_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Borrowing {
    pub fn state(&self) -> BorrowingState {
        BorrowingState::from_return_date(self.actual_return_date)
    }
}

/// A borrowing together with the book it refers to.
#[derive(Debug, Clone, Serialize)]
pub struct BorrowingDetail {
    #[serde(flatten)]
    pub borrowing: Borrowing,
    pub state: BorrowingState,
    pub book: BookSummary,
}

/// DTO for borrowing a book. The borrower and borrow date are never taken
/// from the request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBorrowing {
    #[serde(rename = "book", alias = "book_id")]
    pub book_id: DbId,
    pub expected_return_date: Date,
}

/// Filters and paging for borrowing listings.
#[derive(Debug, Clone, Default)]
pub struct BorrowingFilter {
    /// Restrict to one borrower.
    pub user_id: Option<DbId>,
    /// `Some(true)` = active only, `Some(false)` = returned only.
    pub is_active: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

/// Result of [`BorrowingRepo::checkout`](crate::repositories::BorrowingRepo::checkout).
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Inventory was decremented and the borrowing persisted.
    Created(Borrowing),
    BookNotFound,
    /// The book exists but no copies are left. Nothing was written.
    OutOfStock,
}

/// Result of [`BorrowingRepo::mark_returned`](crate::repositories::BorrowingRepo::mark_returned).
#[derive(Debug)]
pub enum ReturnOutcome {
    /// The return date was stamped and inventory restored.
    Returned(Borrowing),
    NotFound,
    /// The borrowing was already closed. Nothing was written.
    AlreadyReturned,
}
