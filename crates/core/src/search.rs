//! Listing helpers: pagination clamps and catalog ordering.

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 20;

/// Maximum page size for list endpoints.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided limit into `1..=max`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Sort orders accepted by the book catalog's `ordering` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookOrdering {
    /// Title, then author. Used when `ordering` is absent or unrecognised.
    #[default]
    Default,
    Title { descending: bool },
    Author { descending: bool },
    Inventory { descending: bool },
    DailyFee { descending: bool },
}

impl BookOrdering {
    /// Parse an ordering string, `-` prefix for descending (`title`, `-daily_fee`, ...).
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return BookOrdering::Default;
        };
        let (descending, field) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        match field {
            "title" => BookOrdering::Title { descending },
            "author" => BookOrdering::Author { descending },
            "inventory" => BookOrdering::Inventory { descending },
            "daily_fee" => BookOrdering::DailyFee { descending },
            _ => BookOrdering::Default,
        }
    }

    /// SQL `ORDER BY` body. Always ends with `id` so pages are stable.
    pub fn order_by_clause(self) -> &'static str {
        match self {
            BookOrdering::Default => "title ASC, author ASC, id ASC",
            BookOrdering::Title { descending: false } => "title ASC, id ASC",
            BookOrdering::Title { descending: true } => "title DESC, id DESC",
            BookOrdering::Author { descending: false } => "author ASC, id ASC",
            BookOrdering::Author { descending: true } => "author DESC, id DESC",
            BookOrdering::Inventory { descending: false } => "inventory ASC, id ASC",
            BookOrdering::Inventory { descending: true } => "inventory DESC, id DESC",
            BookOrdering::DailyFee { descending: false } => "daily_fee ASC, id ASC",
            BookOrdering::DailyFee { descending: true } => "daily_fee DESC, id DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
