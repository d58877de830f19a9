//! Book entity model and DTOs.

use libris_core::book::Cover;
use libris_core::search::BookOrdering;
use libris_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A book row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author: String,
    #[sqlx(try_from = "String")]
    pub cover: Cover,
    /// Copies currently on the shelf. Never negative.
    pub inventory: i32,
    pub daily_fee: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The subset of a book embedded in borrowing detail responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookSummary {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub daily_fee: Decimal,
}

/// DTO for creating a new book.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: String,
    /// Defaults to HARDCOVER if omitted.
    #[serde(default)]
    pub cover: Cover,
    pub inventory: i32,
    pub daily_fee: Decimal,
}

/// DTO for updating an existing book. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: Option<String>,
    pub cover: Option<Cover>,
    pub inventory: Option<i32>,
    pub daily_fee: Option<Decimal>,
}

/// Filters and paging for the catalog listing.
#[derive(Debug, Clone, Default)]
pub struct BookListParams {
    /// Case-insensitive substring match on the title.
    pub title: Option<String>,
    pub ordering: BookOrdering,
    pub limit: i64,
    pub offset: i64,
}
