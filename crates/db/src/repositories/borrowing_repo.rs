//! Repository for the `borrowings` table.
//!
//! Borrowing and returning both move `books.inventory`, so those two
//! operations run in a single transaction each. The inventory decrement is a
//! conditional `UPDATE ... WHERE inventory > 0`: two concurrent borrows of the
//! last copy cannot both succeed, whatever the isolation level.

use libris_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::borrowing::{
    Borrowing, BorrowingFilter, CheckoutOutcome, CreateBorrowing, ReturnOutcome,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, borrow_date, expected_return_date, actual_return_date, \
                       book_id, user_id, created_at, updated_at";

/// Provides the borrowing lifecycle and read operations.
pub struct BorrowingRepo;

impl BorrowingRepo {
    /// Lend a copy of `input.book_id` to `user_id`.
    ///
    /// Decrements the book's inventory and inserts the borrowing in one
    /// transaction. When the book is missing or out of stock nothing is written.
    pub async fn checkout(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateBorrowing,
        borrow_date: Date,
    ) -> Result<CheckoutOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let taken: Option<(DbId,)> = sqlx::query_as(
            "UPDATE books SET inventory = inventory - 1
             WHERE id = $1 AND inventory > 0
             RETURNING id",
        )
        .bind(input.book_id)
        .fetch_optional(&mut *tx)
        .await?;

        if taken.is_none() {
            let exists: (bool,) =
                sqlx::query_as("SELECT EXISTS (SELECT 1 FROM books WHERE id = $1)")
                    .bind(input.book_id)
                    .fetch_one(&mut *tx)
                    .await?;
            tx.rollback().await?;
            return Ok(if exists.0 {
                CheckoutOutcome::OutOfStock
            } else {
                CheckoutOutcome::BookNotFound
            });
        }

        let query = format!(
            "INSERT INTO borrowings (borrow_date, expected_return_date, book_id, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let borrowing = sqlx::query_as::<_, Borrowing>(&query)
            .bind(borrow_date)
            .bind(input.expected_return_date)
            .bind(input.book_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            borrowing_id = borrowing.id,
            book_id = borrowing.book_id,
            user_id = borrowing.user_id,
            "Book checked out",
        );
        Ok(CheckoutOutcome::Created(borrowing))
    }

    /// Close an active borrowing: stamp `return_date` and put the copy back.
    ///
    /// The stamp only applies while `actual_return_date IS NULL`, so a second
    /// return (or a concurrent one) writes nothing and reports
    /// [`ReturnOutcome::AlreadyReturned`].
    pub async fn mark_returned(
        pool: &PgPool,
        id: DbId,
        return_date: Date,
    ) -> Result<ReturnOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE borrowings SET actual_return_date = $2
             WHERE id = $1 AND actual_return_date IS NULL
             RETURNING {COLUMNS}"
        );
        let stamped = sqlx::query_as::<_, Borrowing>(&query)
            .bind(id)
            .bind(return_date)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(borrowing) = stamped else {
            let exists: (bool,) =
                sqlx::query_as("SELECT EXISTS (SELECT 1 FROM borrowings WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
            tx.rollback().await?;
            return Ok(if exists.0 {
                ReturnOutcome::AlreadyReturned
            } else {
                ReturnOutcome::NotFound
            });
        };

        sqlx::query("UPDATE books SET inventory = inventory + 1 WHERE id = $1")
            .bind(borrowing.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            borrowing_id = borrowing.id,
            book_id = borrowing.book_id,
            %return_date,
            "Book returned",
        );
        Ok(ReturnOutcome::Returned(borrowing))
    }

    /// Find a borrowing by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Borrowing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM borrowings WHERE id = $1");
        sqlx::query_as::<_, Borrowing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a borrowing by ID only if it belongs to `user_id`.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Borrowing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM borrowings WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Borrowing>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List borrowings matching `filter`, most recent borrow date first.
    pub async fn list(
        pool: &PgPool,
        filter: &BorrowingFilter,
    ) -> Result<Vec<Borrowing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM borrowings
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BOOLEAN IS NULL OR (actual_return_date IS NULL) = $2)
             ORDER BY borrow_date DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Borrowing>(&query)
            .bind(filter.user_id)
            .bind(filter.is_active)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a borrowing. An active borrowing gives its copy back to the
    /// shelf in the same transaction.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed: Option<(DbId, Option<Date>)> = sqlx::query_as(
            "DELETE FROM borrowings WHERE id = $1 RETURNING book_id, actual_return_date",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((book_id, actual_return_date)) = removed else {
            tx.rollback().await?;
            return Ok(false);
        };

        if actual_return_date.is_none() {
            sqlx::query("UPDATE books SET inventory = inventory + 1 WHERE id = $1")
                .bind(book_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
