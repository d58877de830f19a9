//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                 -> register
/// POST   /token            -> obtain_token
/// POST   /token/refresh    -> refresh_token
/// POST   /token/verify     -> verify_token
/// GET    /me               -> me
/// PUT    /me               -> update_me
/// POST   /logout           -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::register))
        .route("/token", post(user::obtain_token))
        .route("/token/refresh", post(user::refresh_token))
        .route("/token/verify", post(user::verify_token))
        .route("/me", get(user::me).put(user::update_me))
        .route("/logout", post(user::logout))
}
