//! Auth HTTP handlers: login and current-user lookup.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::PasswordService;
use crate::db::{user_find_by_email, user_get_by_id};
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please include a valid email."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Body of every successful registration or login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub created_at: String,
}

/// POST /api/auth — authenticate and get a token.
///
/// Unknown email and wrong password produce the identical response so the
/// endpoint never confirms which emails are registered.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    body.validate().map_err(|e| AppError::from_validation(&e))?;

    let user = user_find_by_email(state.db(), &body.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !PasswordService::verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.token_signer().issue(user.id)?;
    Ok(Json(TokenResponse { token }))
}

/// GET /api/auth — the authenticated user's record, password hash stripped.
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    // A valid token can outlive its account; treat that as a bad request
    // rather than a server fault.
    let user = user_get_by_id(state.db(), user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("User not found.".to_string()))?;

    Ok(Json(UserResponse {
        id: user.id.to_string(),
        name: user.name,
        email: user.email,
        avatar: user.avatar,
        created_at: user.created_at.to_rfc3339(),
    }))
}
