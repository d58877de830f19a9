pub mod book;
pub mod borrowing;
pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /books                          list (public), create (staff)
/// /books/{id}                     get (public), update, delete (staff)
///
/// /borrowings                     list, create (auth)
/// /borrowings/{id}                get (auth), delete (staff)
/// /borrowings/{id}/return         return (staff)
///
/// /users                          register (public)
/// /users/token                    obtain token pair (public)
/// /users/token/refresh            rotate refresh token (public)
/// /users/token/verify             verify access token (public)
/// /users/me                       get, update own profile (auth)
/// /users/logout                   revoke sessions (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/books", book::router())
        .nest("/borrowings", borrowing::router())
        .nest("/users", user::router())
}
