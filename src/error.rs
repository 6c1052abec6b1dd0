use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Exercise does not belong to user")]
    ForbiddenReference,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Password hash error")]
    PasswordHash,
}

impl AppError {
    /// True for failures of the persistence layer itself.
    pub fn is_storage(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Pool(_))
    }
}

const UNEXPECTED: &str = "Unexpected error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED.to_string())
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED.to_string())
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthenticated => return Redirect::to("/login").into_response(),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),
            AppError::ForbiddenReference => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED.to_string())
            }
            AppError::PasswordHash => {
                tracing::error!("Password hash error");
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED.to_string())
            }
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
