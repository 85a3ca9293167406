//! Auth handlers — register, login, refresh, profile, logout, users.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use gatehouse_core::error::AppError;
use gatehouse_entity::user::Permission;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest, UpdateProfileRequest};
use crate::dto::response::{
    LoginResponse, LogoutResponse, PaginationDto, ProfileResponse, RefreshResponse,
    RegisterResponse, UserDto, UsersResponse,
};
use crate::extractors::{AuthUser, ValidatedJson, ValidatedPagination};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = state.auth_service.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserDto::from(user),
            next_steps: vec![
                "Check your email for verification link".to_string(),
                "Complete your profile setup".to_string(),
                "Explore the system features".to_string(),
            ],
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserDto::from(outcome.user),
        access_token: outcome.tokens.access_token,
        refresh_token: outcome.tokens.refresh_token,
        expires_in: outcome.tokens.expires_in,
        next_steps: vec![
            "Use the access token in Authorization header".to_string(),
            "Store refresh token securely".to_string(),
            "Token expires in 15 minutes".to_string(),
        ],
    }))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(RefreshResponse {
        message: "Token refreshed successfully".to_string(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
    }))
}

/// GET /auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.auth_service.get_profile(&auth).await?;

    Ok(Json(ProfileResponse {
        message: "Profile retrieved successfully".to_string(),
        user: UserDto::from(user),
    }))
}

/// PUT /auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.auth_service.update_profile(&auth, req.into()).await?;

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: UserDto::from(user),
    }))
}

/// POST /auth/logout
///
/// Stateless: issued tokens stay valid until their embedded expiry, so
/// the response tells the client what to discard.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<LogoutResponse>, AppError> {
    state.auth_service.logout(&auth).await;

    Ok(Json(LogoutResponse {
        message: "Logout successful".to_string(),
        next_steps: vec![
            "Remove the access token from your client".to_string(),
            "Remove the refresh token from your client".to_string(),
            "You will need to log in again to access protected resources".to_string(),
        ],
    }))
}

/// GET /auth/users
///
/// Requires the `read:users` permission.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedPagination(page): ValidatedPagination,
) -> Result<Json<UsersResponse>, AppError> {
    state
        .rbac
        .require_permissions(&auth.permissions, &[Permission::ReadUsers])?;

    let result = state.auth_service.list_users(&page).await?;

    Ok(Json(UsersResponse {
        message: "Users retrieved successfully".to_string(),
        users: result.items.into_iter().map(UserDto::from).collect(),
        pagination: PaginationDto {
            page: result.page,
            limit: result.page_size,
            total_users: result.total_items,
            total_pages: result.total_pages,
            has_next: result.has_next,
            has_prev: result.has_previous,
        },
    }))
}
