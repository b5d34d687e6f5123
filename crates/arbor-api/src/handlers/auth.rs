//! Auth handlers — register, register-admin, login, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use arbor_core::error::AppError;
use arbor_entity::user::UserRole;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_service
        .register(&req.username, &req.password, UserRole::User)
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// POST /api/auth/register-admin
pub async fn register_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_admin(&auth)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_service
        .register(&req.username, &req.password, UserRole::Administrator)
        .await?;

    tracing::info!(
        admin = %auth.username,
        username = %user.username,
        "Administrator account created"
    );

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.user_service.login(&req.username, &req.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: outcome.token.token,
        expires_at: outcome.token.expires_at,
        user: UserResponse::from(&outcome.user),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
