//! Profile HTTP handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::db::{profile_find_by_user, user_get_by_id};
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Display fields pulled from the user record; never includes the password
/// hash or email.
#[derive(Debug, Serialize)]
pub struct ProfileUser {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub user: ProfileUser,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub created_at: String,
}

/// GET /api/profile/me — the authenticated user's profile, with the user's
/// name and avatar resolved from the user record.
pub async fn my_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = profile_find_by_user(state.db(), user_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("There is no profile for this user.".to_string())
        })?;

    let user = user_get_by_id(state.db(), profile.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("User not found.".to_string()))?;

    Ok(Json(ProfileResponse {
        id: profile.id.to_string(),
        user: ProfileUser {
            id: user.id.to_string(),
            name: user.name,
            avatar: user.avatar,
        },
        status: profile.status,
        skills: profile.skills,
        company: profile.company,
        website: profile.website,
        location: profile.location,
        bio: profile.bio,
        created_at: profile.created_at.to_rfc3339(),
    }))
}
