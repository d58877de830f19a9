#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use libris_api::auth::jwt::{generate_access_token, JwtConfig};
use libris_api::auth::password::hash_password;
use libris_api::config::ServerConfig;
use libris_api::router::build_app_router;
use libris_api::state::AppState;
use libris_core::book::Cover;
use libris_core::roles::{ROLE_MEMBER, ROLE_STAFF};
use libris_db::models::book::{Book, CreateBook};
use libris_db::models::user::{CreateUser, User};
use libris_db::repositories::{BookRepo, RoleRepo, UserRepo};

/// Password given to every seeded user.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-key".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router, with the same middleware stack as
/// production, around the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST with no body, e.g. action endpoints like `/borrowings/{id}/return`.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with the given role name and [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let role = RoleRepo::find_by_name(pool, role)
        .await
        .unwrap()
        .expect("role should be seeded");
    let input = CreateUser {
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role_id: role.id,
    };
    UserRepo::create(pool, &input).await.unwrap()
}

/// Insert a member and return it with a valid access token.
pub async fn member_with_token(pool: &PgPool, email: &str) -> (User, String) {
    let user = create_user(pool, email, ROLE_MEMBER).await;
    let token = generate_access_token(user.id, ROLE_MEMBER, &test_config().jwt).unwrap();
    (user, token)
}

/// Insert a staff user and return it with a valid access token.
pub async fn staff_with_token(pool: &PgPool, email: &str) -> (User, String) {
    let user = create_user(pool, email, ROLE_STAFF).await;
    let token = generate_access_token(user.id, ROLE_STAFF, &test_config().jwt).unwrap();
    (user, token)
}

pub async fn create_book(pool: &PgPool, title: &str, inventory: i32) -> Book {
    let input = CreateBook {
        title: title.to_string(),
        author: "Test Author".to_string(),
        cover: Cover::Hardcover,
        inventory,
        daily_fee: Decimal::new(150, 2),
    };
    BookRepo::create(pool, &input).await.unwrap()
}

pub async fn book_inventory(pool: &PgPool, id: i64) -> i32 {
    BookRepo::find_by_id(pool, id).await.unwrap().unwrap().inventory
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A due date `days` from today, formatted for a JSON body.
pub fn due_in(days: i64) -> String {
    (today() + Duration::days(days)).to_string()
}
