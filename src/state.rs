//! Shared application state.

use crate::auth::TokenSigner;
use crate::db::DbPool;

/// Shared application state for all handlers. The signer is immutable and the
/// pool manages its own concurrency; nothing else is shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub token_signer: TokenSigner,
}

impl AppState {
    pub fn db(&self) -> &DbPool {
        &self.db
    }
    pub fn token_signer(&self) -> &TokenSigner {
        &self.token_signer
    }
}
