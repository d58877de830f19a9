//! Handlers for the `/books` resource.
//!
//! Reads are public. Writes require the staff role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use libris_core::book::{validate_daily_fee, validate_inventory};
use libris_core::error::CoreError;
use libris_core::search::{clamp_limit, clamp_offset, BookOrdering, DEFAULT_LIMIT, MAX_LIMIT};
use libris_core::types::DbId;
use libris_db::models::book::{Book, BookListParams, CreateBook, UpdateBook};
use libris_db::repositories::BookRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireStaff;
use crate::query::BookListQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/books
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<BookListQuery>,
) -> AppResult<Json<DataResponse<Vec<Book>>>> {
    let params = BookListParams {
        title: params.title.filter(|t| !t.trim().is_empty()),
        ordering: BookOrdering::parse(params.ordering.as_deref()),
        limit: clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let books = BookRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: books }))
}

/// GET /api/v1/books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Book>>> {
    let book = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    Ok(Json(DataResponse { data: book }))
}

/// POST /api/v1/books
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<DataResponse<Book>>)> {
    input.validate()?;
    validate_inventory(input.inventory)?;
    validate_daily_fee(input.daily_fee)?;

    let book = BookRepo::create(&state.pool, &input).await?;
    tracing::info!(book_id = book.id, user_id = staff.user_id, "Book added to catalog");
    Ok((StatusCode::CREATED, Json(DataResponse { data: book })))
}

/// PUT /api/v1/books/{id}
///
/// Partial update: omitted fields keep their current value.
pub async fn update(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateBook>,
) -> AppResult<Json<DataResponse<Book>>> {
    input.validate()?;
    if let Some(inventory) = input.inventory {
        validate_inventory(inventory)?;
    }
    if let Some(fee) = input.daily_fee {
        validate_daily_fee(fee)?;
    }

    let book = BookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    Ok(Json(DataResponse { data: book }))
}

/// DELETE /api/v1/books/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if BookRepo::delete(&state.pool, id).await? {
        tracing::info!(book_id = id, user_id = staff.user_id, "Book removed from catalog");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Book", id }))
    }
}
