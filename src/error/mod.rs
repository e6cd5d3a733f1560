//! Application error types and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One violated validation rule, in the shape the API has always returned:
/// `{ "msg": "...", "param": "email" }`.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl AppError {
    /// Flatten `validator` output into the errors array, keeping every
    /// violated rule rather than just the first.
    pub fn from_validation(errors: &validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .flat_map(|(param, violations)| {
                violations.iter().map(move |v| FieldError {
                    msg: v
                        .message
                        .as_deref()
                        .unwrap_or(v.code.as_ref())
                        .to_string(),
                    param: Some(param.to_string()),
                })
            })
            .collect();
        AppError::Validation(fields)
    }
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input validation failed; every violated rule is listed.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Login failed. Deliberately identical for unknown email and wrong
    /// password so the response never reveals which emails are registered.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Registration with an email that already has a record.
    #[error("User already exists.")]
    UserAlreadyExists,

    /// Missing or invalid token; the message distinguishes the two.
    #[error("{0}")]
    Unauthorized(String),

    /// Business-rule miss reported as a 400 with a `msg` body (e.g. no
    /// profile record yet).
    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": [{ "msg": "Invalid credentials." }] })),
            )
                .into_response(),
            AppError::UserAlreadyExists => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": [{ "msg": "User already exists." }] })),
            )
                .into_response(),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "msg": msg }))).into_response()
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "msg": msg }))).into_response()
            }
            // Anything unanticipated: log the detail, return an opaque 500.
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error.").into_response()
            }
            AppError::Token(e) => {
                tracing::error!(error = %e, "token signing error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error.").into_response()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error.").into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
