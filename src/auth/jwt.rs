//! JWT issue and validation.

use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime: 100 hours.
const TOKEN_TTL_SECS: i64 = 360_000;

/// Identity embedded in the token, nested under `user` as the API has
/// always shipped it: `{ "user": { "id": "..." } }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaim {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: UserClaim,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies signed identity tokens with a process-wide secret.
///
/// Verification is stateless: the embedded id is not re-checked against the
/// user table, so a token outlives account deletion until its expiry. That
/// trade-off is deliberate.
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Sign a token for `user_id`. The id is trusted to reference an
    /// existing user; callers issue only after a create or a lookup.
    pub fn issue(&self, user_id: Uuid) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            user: UserClaim { id: user_id },
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Check signature and expiry, returning the embedded user id. Any
    /// failure (bad signature, tampering, elapsed expiry) is `Unauthorized`;
    /// no partial trust.
    pub fn verify(&self, token: &str) -> AppResult<Uuid> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::Unauthorized("Token is not valid.".to_string()))?;
        Ok(data.claims.user.id)
    }
}
