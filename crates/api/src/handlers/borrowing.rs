//! Handlers for the `/borrowings` resource.
//!
//! Members create and see their own borrowings. Staff see everyone's and are
//! the only ones who can close (`/return`) or remove a borrowing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use libris_core::borrowing::{
    ensure_available, parse_is_active, plan_return, today, validate_expected_return_date,
    ALREADY_RETURNED, OUT_OF_STOCK,
};
use libris_core::error::CoreError;
use libris_core::search::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use libris_core::types::DbId;
use libris_db::models::borrowing::{
    Borrowing, BorrowingDetail, BorrowingFilter, CheckoutOutcome, CreateBorrowing, ReturnOutcome,
};
use libris_db::repositories::{BookRepo, BorrowingRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::BorrowingListQuery;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Message sent with a successful return.
pub const RETURN_SUCCESS: &str = "Borrowing returned successfully";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Borrowing",
        id,
    })
}

fn missing_book(book_id: DbId) -> AppError {
    AppError::Core(CoreError::invalid_field(
        "book",
        format!("Book with id {book_id} does not exist"),
    ))
}

/// POST /api/v1/borrowings
///
/// The borrower is the caller and the borrow date is today; both are ignored
/// if present in the body.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateBorrowing>,
) -> AppResult<(StatusCode, Json<DataResponse<Borrowing>>)> {
    let borrow_date = today();
    validate_expected_return_date(input.expected_return_date, borrow_date)?;

    let book = BookRepo::find_by_id(&state.pool, input.book_id)
        .await?
        .ok_or_else(|| missing_book(input.book_id))?;
    ensure_available(book.inventory)?;

    // The copy may still be taken by a concurrent request; the repository
    // decides atomically.
    match BorrowingRepo::checkout(&state.pool, user.user_id, &input, borrow_date).await? {
        CheckoutOutcome::Created(borrowing) => {
            Ok((StatusCode::CREATED, Json(DataResponse { data: borrowing })))
        }
        CheckoutOutcome::OutOfStock => {
            Err(AppError::Core(CoreError::invalid_field("book", OUT_OF_STOCK)))
        }
        CheckoutOutcome::BookNotFound => Err(missing_book(input.book_id)),
    }
}

/// GET /api/v1/borrowings
///
/// Members always get their own borrowings; `user_id` only applies to staff.
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<BorrowingListQuery>,
) -> AppResult<Json<DataResponse<Vec<Borrowing>>>> {
    let user_id = if user.is_staff() {
        params
            .user_id
            .as_deref()
            .map(str::parse::<DbId>)
            .transpose()
            .map_err(|_| CoreError::invalid_field("user_id", "user_id must be an integer"))?
    } else {
        Some(user.user_id)
    };

    let filter = BorrowingFilter {
        user_id,
        is_active: parse_is_active(params.is_active.as_deref()),
        limit: clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let borrowings = BorrowingRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: borrowings }))
}

/// GET /api/v1/borrowings/{id}
///
/// Includes a summary of the borrowed book. Another member's borrowing is
/// reported as not found.
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<BorrowingDetail>>> {
    let visible = if user.is_staff() {
        BorrowingRepo::find_by_id(&state.pool, id).await?
    } else {
        BorrowingRepo::find_by_id_for_user(&state.pool, id, user.user_id).await?
    };
    let borrowing = visible.ok_or_else(|| not_found(id))?;

    let book = BookRepo::find_summary(&state.pool, borrowing.book_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Borrowing {id} references missing book {}",
                borrowing.book_id
            ))
        })?;

    let detail = BorrowingDetail {
        state: borrowing.state(),
        borrowing,
        book,
    };
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/borrowings/{id}/return
pub async fn mark_returned(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse<Borrowing>>> {
    let current = BorrowingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let return_date = plan_return(current.actual_return_date, current.borrow_date, today())?;

    match BorrowingRepo::mark_returned(&state.pool, id, return_date).await? {
        ReturnOutcome::Returned(borrowing) => {
            tracing::debug!(borrowing_id = id, user_id = staff.user_id, "Return accepted");
            Ok(Json(MessageResponse {
                message: RETURN_SUCCESS,
                data: borrowing,
            }))
        }
        ReturnOutcome::AlreadyReturned => Err(AppError::Core(CoreError::InvalidTransition(
            ALREADY_RETURNED.to_string(),
        ))),
        ReturnOutcome::NotFound => Err(not_found(id)),
    }
}

/// DELETE /api/v1/borrowings/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if BorrowingRepo::delete(&state.pool, id).await? {
        tracing::info!(borrowing_id = id, user_id = staff.user_id, "Borrowing deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
