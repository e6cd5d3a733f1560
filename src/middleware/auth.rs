//! Auth gate: verifies the `x-auth-token` header before a protected handler
//! runs. On failure the handler is never executed.

use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

const HEADER_AUTH_TOKEN: &str = "x-auth-token";

/// Extractor: authenticated user ID from the signed token.
///
/// A missing header and an invalid token are distinct failures with distinct
/// messages, but both reject with 401.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub Uuid);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(HEADER_AUTH_TOKEN)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("No token, authorization denied.".to_string())
            })?;
        let user_id = state.token_signer().verify(token)?;
        Ok(AuthUser(user_id))
    }
}
