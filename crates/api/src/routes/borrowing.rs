//! Route definitions for the `/borrowings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::borrowing;
use crate::state::AppState;

/// Routes mounted at `/borrowings`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// DELETE /{id}          -> delete
/// POST   /{id}/return   -> mark_returned
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(borrowing::list).post(borrowing::create))
        .route(
            "/{id}",
            get(borrowing::get_by_id).delete(borrowing::delete),
        )
        .route("/{id}/return", post(borrowing::mark_returned))
}
