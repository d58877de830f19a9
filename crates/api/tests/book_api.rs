//! HTTP-level integration tests for the `/books` catalog.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_book, delete_auth, get, member_with_token, post_json, post_json_auth,
    put_json_auth, staff_with_token,
};
use serde_json::json;
use sqlx::PgPool;

fn new_book() -> serde_json::Value {
    json!({
        "title": "The Left Hand of Darkness",
        "author": "Ursula K. Le Guin",
        "cover": "SOFTCOVER",
        "inventory": 3,
        "daily_fee": "1.25"
    })
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_books_is_public_and_ordered_by_title(pool: PgPool) {
    create_book(&pool, "Zen", 1).await;
    create_book(&pool, "Atlas", 1).await;

    let response = get(common::build_test_app(pool), "/api/v1/books").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Atlas", "Zen"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_books_honours_ordering_and_title_filter(pool: PgPool) {
    create_book(&pool, "Dune", 5).await;
    create_book(&pool, "Dune Messiah", 1).await;
    create_book(&pool, "Emma", 9).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/books?title=dune&ordering=-inventory").await;
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["title"], "Dune");
    assert_eq!(data[1]["title"], "Dune Messiah");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_books_paginates(pool: PgPool) {
    for title in ["A", "B", "C"] {
        create_book(&pool, title, 1).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/books?limit=1&offset=2").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "C");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_book_serializes_cover_and_fee(pool: PgPool) {
    let book = create_book(&pool, "Dune", 2).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/books/{}", book.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["cover"], "HARDCOVER");
    assert_eq!(json["data"]["daily_fee"], "1.50");
    assert_eq!(json["data"]["inventory"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_unknown_book_is_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/books/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Staff writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_can_create_book(pool: PgPool) {
    let (_staff, token) = staff_with_token(&pool, "staff@library.test").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/books",
        new_book(),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["cover"], "SOFTCOVER");
    assert_eq!(json["data"]["daily_fee"], "1.25");
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cover_defaults_to_hardcover(pool: PgPool) {
    let (_staff, token) = staff_with_token(&pool, "staff@library.test").await;
    let body = json!({
        "title": "Emma",
        "author": "Jane Austen",
        "inventory": 1,
        "daily_fee": "0.50"
    });

    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/books", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["cover"], "HARDCOVER");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_write_is_401(pool: PgPool) {
    let response = post_json(common::build_test_app(pool), "/api/v1/books", new_book()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn member_write_is_403(pool: PgPool) {
    let (_member, token) = member_with_token(&pool, "reader@library.test").await;
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/books", new_book(), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_book_fields_are_rejected(pool: PgPool) {
    let (_staff, token) = staff_with_token(&pool, "staff@library.test").await;

    let mut negative = new_book();
    negative["inventory"] = json!(-1);
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/books",
        negative,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "inventory");

    let mut precise = new_book();
    precise["daily_fee"] = json!("1.255");
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/books",
        precise,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "daily_fee");

    let mut untitled = new_book();
    untitled["title"] = json!("");
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/books", untitled, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_cover_is_a_json_field_error(pool: PgPool) {
    let (_staff, token) = staff_with_token(&pool, "staff@library.test").await;

    let mut paperback = new_book();
    paperback["cover"] = json!("PAPERBACK");
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/books", paperback, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "cover");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_book_id_is_json_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/books/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_is_partial(pool: PgPool) {
    let (_staff, token) = staff_with_token(&pool, "staff@library.test").await;
    let book = create_book(&pool, "Dune", 2).await;

    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/books/{}", book.id),
        json!({ "inventory": 7 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["inventory"], 7);
    assert_eq!(json["data"]["title"], "Dune");
    assert_eq!(json["data"]["cover"], "HARDCOVER");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_unknown_book_is_404(pool: PgPool) {
    let (_staff, token) = staff_with_token(&pool, "staff@library.test").await;
    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/books/424242",
        json!({ "title": "Nothing" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_book_then_404(pool: PgPool) {
    let (_staff, token) = staff_with_token(&pool, "staff@library.test").await;
    let book = create_book(&pool, "Dune", 2).await;
    let uri = format!("/api/v1/books/{}", book.id);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(common::build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
