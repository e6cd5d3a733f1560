//! Deterministic Gravatar URL derived from an email address.

use sha2::{Digest, Sha256};

/// Gravatar address hash over the trimmed, lowercased email. Query options:
/// 200px, PG-rated, mystery-man fallback for unregistered addresses.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let hash = hex::encode(Sha256::digest(normalized.as_bytes()));
    format!("https://www.gravatar.com/avatar/{hash}?s=200&r=pg&d=mm")
}
