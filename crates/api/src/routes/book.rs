//! Route definitions for the `/books` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::book;
use crate::state::AppState;

/// Routes mounted at `/books`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(book::list).post(book::create))
        .route(
            "/{id}",
            get(book::get_by_id).put(book::update).delete(book::delete),
        )
}
