//! Shared query parameter types for API handlers.
//!
//! Limits and offsets are clamped in the handlers via `clamp_limit` /
//! `clamp_offset` before they reach the repositories.

use serde::Deserialize;

/// Query parameters for `GET /books`.
#[derive(Debug, Deserialize)]
pub struct BookListQuery {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// `title`, `author`, `inventory`, `daily_fee`, optionally `-`-prefixed.
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /borrowings`.
#[derive(Debug, Deserialize)]
pub struct BorrowingListQuery {
    /// `true` / `false`; any other value is ignored.
    pub is_active: Option<String>,
    /// Honoured for staff only. Kept raw so a member's value is ignored
    /// rather than rejected.
    pub user_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
