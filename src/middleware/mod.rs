//! Request middleware: the auth gate for protected routes.

pub mod auth;

pub use auth::AuthUser;
