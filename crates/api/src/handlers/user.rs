//! Handlers for the `/users` resource: registration, tokens and the caller's
//! own profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use libris_core::error::CoreError;
use libris_core::roles::MEMBER_ROLE_ID;
use libris_core::types::DbId;
use libris_db::models::session::CreateSession;
use libris_db::models::user::{CreateUser, UpdateProfile, User, UserResponse};
use libris_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, hash_refresh_token, validate_token,
};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: String,
}

/// Request body for `POST /users/token`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /users/token/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Request body for `POST /users/token/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// Request body for `PUT /users/me`. All fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,
    pub password: Option<String>,
}

/// Token pair returned by obtain and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Self-registration. New accounts always get the member role.
pub async fn register(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.email = normalize_email(&input.email);
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::invalid_field("password", msg)))?;

    if UserRepo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            password_hash,
            role_id: MEMBER_ROLE_ID,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "User registered");

    let response = user_response(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/v1/users/token
///
/// Exchange email + password for an access/refresh token pair.
pub async fn obtain_token(
    State(state): State<AppState>,
    AppJson(input): AppJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    Ok(Json(issue_tokens(&state, &user).await?))
}

/// POST /api/v1/users/token/refresh
///
/// Exchange a live refresh token for a new pair. The old session is revoked.
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let token_hash = hash_refresh_token(&input.refresh);
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid)?;

    // Losing a concurrent rotation of the same token counts as invalid.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(invalid());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    Ok(Json(issue_tokens(&state, &user).await?))
}

/// POST /api/v1/users/token/verify
///
/// Returns `{}` for a valid access token, 401 otherwise.
pub async fn verify_token(
    State(state): State<AppState>,
    AppJson(input): AppJson<VerifyRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_token(&input.token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Token is invalid or expired".into()))
    })?;
    Ok(Json(serde_json::json!({})))
}

/// GET /api/v1/users/me
pub async fn me(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = find_user(&state, auth.user_id).await?;
    let response = user_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// PUT /api/v1/users/me
///
/// Update the caller's names and, optionally, password. Changing the password
/// revokes every refresh session.
pub async fn update_me(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateMeRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    if let Some(password) = &input.password {
        validate_password_strength(password, MIN_PASSWORD_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::invalid_field("password", msg)))?;
        let password_hash = hash_password(password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        UserRepo::update_password(&state.pool, auth.user_id, &password_hash).await?;
        SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
        tracing::info!(user_id = auth.user_id, "Password changed");
    }

    let profile = UpdateProfile {
        first_name: input.first_name.map(|s| s.trim().to_string()),
        last_name: input.last_name.map(|s| s.trim().to_string()),
    };
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &profile)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let response = user_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/users/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Emails are matched case-insensitively by storing them lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

async fn user_response(state: &AppState, user: &User) -> AppResult<UserResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(UserResponse::from_user(user, role))
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn issue_tokens(state: &AppState, user: &User) -> AppResult<TokenResponse> {
    let response = user_response(state, user).await?;

    let access = generate_access_token(user.id, &response.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh.hash,
            expires_at: state.config.jwt.refresh_expires_at(Utc::now()),
        },
    )
    .await?;

    Ok(TokenResponse {
        access,
        refresh: refresh.plaintext,
        expires_in: state.config.jwt.access_ttl_secs(),
        user: response,
    })
}
