//! Authentication: login, current-user lookup, token signing, password
//! hashing.

mod handlers;
mod jwt;
mod service;

pub use handlers::{current_user, login, TokenResponse};
pub use jwt::{Claims, TokenSigner, UserClaim};
pub use service::PasswordService;
