//! Registration HTTP handler.

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{PasswordService, TokenResponse};
use crate::db::{user_create, user_find_by_email};
use crate::error::AppError;
use crate::state::AppState;
use crate::users::gravatar_url;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[validate(email(message = "Please include a valid email."))]
    pub email: String,
    #[validate(length(
        min = 6,
        message = "Please enter a password with 6 or more characters."
    ))]
    pub password: String,
}

/// POST /api/users — register a user and return a token.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    body.validate().map_err(|e| AppError::from_validation(&e))?;

    if user_find_by_email(state.db(), &body.email).await?.is_some() {
        return Err(AppError::UserAlreadyExists);
    }

    let avatar = gravatar_url(&body.email);
    let password_hash = PasswordService::hash_password(&body.password)?;
    let user = user_create(state.db(), &body.name, &body.email, &password_hash, &avatar).await?;

    let token = state.token_signer().issue(user.id)?;
    Ok(Json(TokenResponse { token }))
}
