//! Developer network REST API built with Rust.
//!
//! User registration, JWT-based login, and an authenticated user/profile
//! read surface over PostgreSQL.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod profile;
pub mod state;
pub mod users;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;

use axum::routing::{get, post};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(|| async { "API Running" }))
        .route("/api/users", post(users::register))
        .route("/api/auth", get(auth::current_user).post(auth::login))
        .route("/api/profile/me", get(profile::my_profile))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
