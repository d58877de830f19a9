//! Repository for the `books` table.

use libris_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, BookListParams, BookSummary, CreateBook, UpdateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author, cover, inventory, daily_fee, created_at, updated_at";

/// Provides CRUD operations for the book catalog.
///
/// Inventory is only moved by [`BorrowingRepo`](super::BorrowingRepo); here it
/// is set directly by staff edits.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, author, cover, inventory, daily_fee)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(input.cover.as_str())
            .bind(input.inventory)
            .bind(input.daily_fee)
            .fetch_one(pool)
            .await
    }

    /// Find a book by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the summary embedded in borrowing detail responses.
    pub async fn find_summary(pool: &PgPool, id: DbId) -> Result<Option<BookSummary>, sqlx::Error> {
        sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, author, daily_fee FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List books, optionally filtered by a title substring, in the requested order.
    pub async fn list(pool: &PgPool, params: &BookListParams) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books
             WHERE ($1::TEXT IS NULL OR title ILIKE $1)
             ORDER BY {order}
             LIMIT $2 OFFSET $3",
            order = params.ordering.order_by_clause(),
        );
        let pattern = params.title.as_deref().map(contains_pattern);
        sqlx::query_as::<_, Book>(&query)
            .bind(pattern)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a book. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                cover = COALESCE($4, cover),
                inventory = COALESCE($5, inventory),
                daily_fee = COALESCE($6, daily_fee)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(input.cover.map(|c| c.as_str()))
            .bind(input.inventory)
            .bind(input.daily_fee)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a book by ID. Its borrowings are removed by cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build an `ILIKE` pattern matching `needle` anywhere, with LIKE
/// metacharacters in the needle taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_wraps_needle() {
        assert_eq!(contains_pattern("dune"), "%dune%");
    }

    #[test]
    fn contains_pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern("100%_off\\"), "%100\\%\\_off\\\\%");
    }
}
